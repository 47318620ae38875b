//! Reader preferences, horizontal post-list scrolling, and the site shell for
//! the blog front end.
//!
//! This crate is compiled to WebAssembly and loaded by the server-rendered
//! blog pages. Each controller is split into a core that holds state and
//! decides what should happen, and a browser host (feature `browser`) that
//! owns the `web-sys` handles, feeds DOM events into the core, and applies
//! the [`action::Action`]s it returns. Cores build and test natively.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`reader`] | Font size / theme / view mode preferences |
//! | [`scroll`] | Wheel and drag horizontal scrolling, mobile gating |
//! | [`shell`] | 3-state theme toggle and mobile drawer |
//! | [`progress`] | Reading-progress percentage and frame coalescing |
//! | [`prefs`] | Preference enums and their string forms |
//! | [`bus`] | View-mode publish/subscribe between controllers |
//! | [`store`] | Key-value persistence seam and in-memory store |
//! | [`input`] | Modifier keys, focus classification, key mappings |
//! | [`action`] | DOM effects returned by the cores |
//! | [`config`] | Runtime configuration |
//! | [`consts`] | Storage keys, attribute names, tuning defaults |
//! | [`error`] | Error types |
//! | `browser` | DOM hosts and the wasm entry points (feature `browser`) |

pub mod action;
pub mod bus;
pub mod config;
pub mod consts;
pub mod error;
pub mod input;
pub mod prefs;
pub mod progress;
pub mod reader;
pub mod scroll;
pub mod shell;
pub mod store;

#[cfg(feature = "browser")]
pub mod browser;
