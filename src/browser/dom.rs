//! Thin `web-sys` helpers shared by the controller hosts: lookups, event
//! decoding, and applying core [`Action`]s to real elements.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::action::{Action, Target};
use crate::config::{CONFIG_ELEMENT_ID, Config};
use crate::consts::CLASS_ACTIVE;
use crate::error::ConfigError;
use crate::input::{Focus, Modifiers};
use crate::prefs::PreferenceKind;
use crate::scroll::MobileSignals;

/// Resolves action targets to live elements for one controller.
pub trait Targets {
    /// Element for `target`, or `None` when this page lacks it.
    fn element(&self, target: Target) -> Option<Element>;

    /// Buttons declaring values for `kind`.
    fn buttons(&self, _kind: PreferenceKind) -> &[Element] {
        &[]
    }
}

/// Log a failed DOM call and carry on.
pub fn check<T>(what: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("{what} failed: {e:?}");
            None
        }
    }
}

pub fn window_and_document() -> Option<(Window, Document)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// First element matching `selector`.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    check("querySelector", document.query_selector(selector)).flatten()
}

/// Every element matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Some(list) = check("querySelectorAll", document.query_selector_all(selector)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

pub fn by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

pub fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

/// Config from the inline `<script id="blog-ui-config">` element, if any.
pub fn inline_config(document: &Document) -> Result<Option<Config>, ConfigError> {
    let Some(raw) = by_id(document, CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return Ok(None);
    };
    Config::from_json(&raw).map(Some)
}

/// Device signals for mobile gating.
pub fn mobile_signals(window: &Window) -> MobileSignals {
    let navigator = window.navigator();
    let user_agent = check("navigator.userAgent", navigator.user_agent()).unwrap_or_default();
    let touch_handler = check("ontouchstart lookup", js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")));
    let has_touch = touch_handler.unwrap_or(false) || navigator.max_touch_points() > 0;
    let viewport_width = check("innerWidth", window.inner_width()).and_then(|v| v.as_f64()).unwrap_or(0.0);
    MobileSignals { user_agent, has_touch, viewport_width }
}

/// `(scroll_top, document_height, viewport_height)` for the progress readout.
pub fn page_metrics(window: &Window, root: &Element) -> (f64, f64, f64) {
    let scroll_top = check("scrollY", window.scroll_y()).unwrap_or_else(|| f64::from(root.scroll_top()));
    let document_height = f64::from(root.scroll_height());
    let viewport_height = check("innerHeight", window.inner_height()).and_then(|v| v.as_f64()).unwrap_or(0.0);
    (scroll_top, document_height, viewport_height)
}

pub fn modifiers(event: &KeyboardEvent) -> Modifiers {
    Modifiers { shift: event.shift_key(), ctrl: event.ctrl_key(), alt: event.alt_key(), meta: event.meta_key() }
}

/// Classify the document's active element.
pub fn focus(document: &Document) -> Focus {
    let Some(active) = document.active_element() else {
        return Focus::Page;
    };
    let editable = as_html(&active).is_some_and(HtmlElement::is_content_editable);
    Focus::classify(&active.tag_name(), editable)
}

/// Apply `actions` in order. Actions whose target is missing are skipped.
pub fn apply(actions: &[Action], targets: &impl Targets) {
    for action in actions {
        apply_one(action, targets);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn apply_one(action: &Action, targets: &impl Targets) {
    match action {
        Action::SetAttribute { target, name, value } => {
            if let Some(el) = targets.element(*target) {
                check("setAttribute", el.set_attribute(name, value));
            }
        }
        Action::MarkActive { kind, value } => {
            for button in targets.buttons(*kind) {
                let on = button.get_attribute(kind.attribute()).as_deref() == Some(*value);
                check("classList.toggle", button.class_list().toggle_with_force(CLASS_ACTIVE, on));
            }
        }
        Action::ToggleClass { target, class, on } => {
            if let Some(el) = targets.element(*target) {
                check("classList.toggle", el.class_list().toggle_with_force(class, *on));
            }
        }
        Action::SetStyle { target, property, value } => {
            let Some(el) = targets.element(*target) else {
                return;
            };
            let Some(html) = as_html(&el) else {
                return;
            };
            let style = html.style();
            match value {
                Some(v) => {
                    check("style.setProperty", style.set_property(property, v));
                }
                None => {
                    check("style.removeProperty", style.remove_property(property));
                }
            }
        }
        Action::SetText { target, text } => {
            if let Some(el) = targets.element(*target) {
                el.set_text_content(Some(text.as_str()));
            }
        }
        Action::SetScrollLeft(offset) => {
            if let Some(el) = targets.element(Target::PostList) {
                el.set_scroll_left(offset.round() as i32);
            }
        }
        Action::ScrollBy(dx) => {
            if let Some(el) = targets.element(Target::PostList) {
                let options = ScrollToOptions::new();
                options.set_left(*dx);
                options.set_behavior(ScrollBehavior::Smooth);
                el.scroll_by_with_scroll_to_options(&options);
            }
        }
        Action::Focus(target) => {
            if let Some(el) = targets.element(*target) {
                if let Some(html) = as_html(&el) {
                    check("focus", html.focus());
                }
            }
        }
        Action::FocusFirstLink(target) => {
            let first = targets.element(*target).and_then(|el| check("querySelector", el.query_selector("a")).flatten());
            if let Some(link) = first {
                if let Some(html) = as_html(&link) {
                    check("focus", html.focus());
                }
            }
        }
    }
}
