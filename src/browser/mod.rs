//! Browser entry points.
//!
//! `start` runs when the module is instantiated. It reads the optional inline
//! config, installs logging, and mounts the three controllers once the DOM
//! is parsed. Controllers live in a thread-local [`App`] until `teardown`.

mod dom;
mod reader;
mod scroll;
mod shell;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::bus::ViewModeBus;
use crate::config::Config;

pub use reader::ReaderControls;
pub use scroll::HorizontalScroll;
pub use shell::Shell;
pub use storage::LocalStore;

/// Mounted controllers. Dropping an `App` detaches everything.
struct App {
    scroll: Option<Rc<HorizontalScroll>>,
    reader: Option<Rc<ReaderControls>>,
    shell: Option<Rc<Shell>>,
}

impl App {
    /// Scroll mounts first so it hears the reader's initial view-mode publish.
    /// Shell mounts last so its resolved theme is what `<html>` ends up with.
    fn mount(window: &Window, document: &Document, config: &Config) -> Self {
        let bus = ViewModeBus::new();
        let scroll = HorizontalScroll::init(window, document, config, &bus);
        let reader = ReaderControls::init(window, document, config, LocalStore::open(), bus);
        let shell = Shell::init(window, document, config, LocalStore::open());
        Self { scroll, reader, shell }
    }

    fn teardown(&self) {
        if let Some(scroll) = &self.scroll {
            scroll.teardown();
        }
        if let Some(reader) = &self.reader {
            reader.teardown();
        }
        if let Some(shell) = &self.shell {
            shell.teardown();
        }
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static PENDING: RefCell<Option<EventListener>> = const { RefCell::new(None) };
    static RESET_GLOBAL: RefCell<Option<Closure<dyn Fn()>>> = const { RefCell::new(None) };
}

fn init_logging(config: &Config) {
    console_error_panic_hook::set_once();
    let level = config.log_level();
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

fn boot(config: Config) {
    init_logging(&config);
    let Some((window, document)) = dom::window_and_document() else {
        log::warn!("no window/document; blog-ui not started");
        return;
    };
    shutdown();

    if document.ready_state() == "loading" {
        let listener = EventListener::once(&document, "DOMContentLoaded", move |_event| {
            mount(&window, &config);
        });
        PENDING.with(|pending| *pending.borrow_mut() = Some(listener));
    } else {
        mount(&window, &config);
    }
}

fn mount(window: &Window, config: &Config) {
    let Some(document) = window.document() else {
        return;
    };
    let app = App::mount(window, &document, config);
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    expose_reset(window);
}

/// Make `resetReaderSettings()` callable from the devtools console.
fn expose_reset(window: &Window) {
    RESET_GLOBAL.with(|slot| {
        let mut slot = slot.borrow_mut();
        let callback = slot.get_or_insert_with(|| Closure::<dyn Fn()>::new(reset_reader_settings));
        dom::check(
            "expose resetReaderSettings",
            js_sys::Reflect::set(window, &JsValue::from_str("resetReaderSettings"), callback.as_ref()),
        );
    });
}

fn shutdown() {
    PENDING.with(|pending| pending.borrow_mut().take());
    let app = APP.with(|slot| slot.borrow_mut().take());
    if let Some(app) = app {
        app.teardown();
        log::info!("blog-ui torn down");
    }
}

/// Module entry point. Uses the inline `<script id="blog-ui-config">` config
/// when present, defaults otherwise.
#[wasm_bindgen(start)]
pub fn start() {
    let config = match dom::window_and_document().map(|(_, document)| dom::inline_config(&document)) {
        Some(Ok(Some(config))) => config,
        Some(Err(e)) => {
            init_logging(&Config::default());
            log::warn!("inline config ignored: {e}");
            Config::default()
        }
        Some(Ok(None)) | None => Config::default(),
    };
    boot(config);
}

/// Remount every controller with an explicit JSON config.
///
/// # Errors
///
/// Returns the parse error message when `json` is not a valid config; the
/// running controllers are left untouched.
#[wasm_bindgen]
pub fn start_with_config(json: &str) -> Result<(), JsValue> {
    let config = Config::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    boot(config);
    Ok(())
}

/// Clear stored reader preferences and restore the defaults on the page.
#[wasm_bindgen(js_name = resetReaderSettings)]
pub fn reset_reader_settings() {
    let reader = APP.with(|slot| slot.borrow().as_ref().and_then(|app| app.reader.clone()));
    match reader {
        Some(reader) => reader.reset(),
        None => log::warn!("resetReaderSettings: reader controls are not mounted"),
    }
}

/// Detach every controller.
#[wasm_bindgen]
pub fn teardown() {
    shutdown();
}
