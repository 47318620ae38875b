//! Input model: modifier keys, focus context, and keyboard mappings.
//!
//! The browser host reduces DOM keyboard events to a key string plus
//! [`Modifiers`] and a [`Focus`] classification; the mappings here decide
//! what, if anything, the key means.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::prefs::{FontSize, Preference, Theme};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows or Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Where keyboard focus sits when a key event arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Page body, a link, a button, or anything else not accepting text.
    #[default]
    Page,
    /// An input, textarea, select, or contenteditable element.
    TextEntry,
}

impl Focus {
    /// Classify the active element by tag name and contenteditable state.
    #[must_use]
    pub fn classify(tag_name: &str, content_editable: bool) -> Self {
        if content_editable || matches!(tag_name.to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT") {
            Self::TextEntry
        } else {
            Self::Page
        }
    }
}

/// Reader shortcut bound to `key` with `modifiers`, if any.
///
/// Ctrl/Cmd + `1`/`2`/`3` choose font size S/M/L; Ctrl/Cmd + `d`/`l` choose
/// the dark/light theme (either case).
#[must_use]
pub fn reader_shortcut(key: &str, modifiers: Modifiers) -> Option<Preference> {
    if !modifiers.command() {
        return None;
    }
    match key {
        "1" => Some(Preference::FontSize(FontSize::S)),
        "2" => Some(Preference::FontSize(FontSize::M)),
        "3" => Some(Preference::FontSize(FontSize::L)),
        "d" | "D" => Some(Preference::Theme(Theme::Dark)),
        "l" | "L" => Some(Preference::Theme(Theme::Light)),
        _ => None,
    }
}

/// Horizontal direction for an arrow key: `-1.0` left, `1.0` right.
#[must_use]
pub fn arrow_direction(key: &str) -> Option<f64> {
    match key {
        "ArrowLeft" => Some(-1.0),
        "ArrowRight" => Some(1.0),
        _ => None,
    }
}
