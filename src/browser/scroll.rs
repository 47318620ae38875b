//! Horizontal scroll host for the post list.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, MouseEvent, WheelEvent, Window};

use super::dom::{self, Targets};
use crate::action::{Action, Target};
use crate::bus::{Subscription, ViewModeBus};
use crate::config::Config;
use crate::consts::ATTR_VIEW;
use crate::prefs::ViewMode;
use crate::scroll::{Gesture, ScrollCore, should_activate};

/// View mode the server rendered onto the post list.
fn initial_view_mode(post_list: &HtmlElement) -> ViewMode {
    let Some(raw) = post_list.get_attribute(ATTR_VIEW) else {
        return ViewMode::default();
    };
    match raw.parse() {
        Ok(mode) => mode,
        Err(e) => {
            log::warn!("post list {ATTR_VIEW}: {e}");
            ViewMode::default()
        }
    }
}

pub struct HorizontalScroll {
    core: RefCell<ScrollCore>,
    document: Document,
    post_list: HtmlElement,
    listeners: RefCell<Vec<EventListener>>,
    subscription: RefCell<Option<Subscription<ViewMode>>>,
}

impl Targets for HorizontalScroll {
    fn element(&self, target: Target) -> Option<Element> {
        match target {
            Target::PostList => Some(self.post_list.clone().into()),
            _ => None,
        }
    }
}

impl HorizontalScroll {
    /// Attach to the post list. `None` when the page has no post list or
    /// the device looks mobile.
    pub fn init(window: &Window, document: &Document, config: &Config, bus: &ViewModeBus) -> Option<Rc<Self>> {
        let element = dom::query(document, &config.selectors.post_list);
        let signals = dom::mobile_signals(window);
        if !should_activate(element.is_some(), &signals, config.scroll.mobile_max_width_px) {
            log::info!("horizontal scroll inactive (post list present: {})", element.is_some());
            return None;
        }
        let post_list = element.as_ref().and_then(dom::as_html).cloned()?;
        let view_mode = initial_view_mode(&post_list);

        let this = Rc::new(Self {
            core: RefCell::new(ScrollCore::new(config.scroll, view_mode)),
            document: document.clone(),
            post_list,
            listeners: RefCell::new(Vec::new()),
            subscription: RefCell::new(None),
        });

        this.register_pointer();
        if config.keyboard_scroll {
            this.register_arrow_keys();
        }

        let weak = Rc::downgrade(&this);
        let subscription = bus.subscribe(move |mode| {
            if let Some(this) = weak.upgrade() {
                let actions = this.core.borrow_mut().on_view_mode(mode);
                this.apply(&actions);
            }
        });
        *this.subscription.borrow_mut() = Some(subscription);

        let cursor = this.core.borrow().idle_cursor();
        this.apply(&[cursor]);
        log::info!("horizontal scroll ready (view: {})", view_mode.as_str());
        Some(this)
    }

    /// Detach listeners, leave the bus, and clear the cursor styles.
    pub fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        self.subscription.borrow_mut().take();
        self.apply(&[Action::cursor(None), Action::user_select(None)]);
    }

    fn apply(&self, actions: &[Action]) {
        dom::apply(actions, self);
    }

    fn scroll_left(&self) -> f64 {
        f64::from(self.post_list.scroll_left())
    }

    /// Pointer x relative to the post list.
    fn local_x(&self, event: &MouseEvent) -> f64 {
        f64::from(event.page_x() - self.post_list.offset_left())
    }

    fn listen(self: &Rc<Self>, event: &'static str, options: EventListenerOptions, handler: fn(&Self, &Event)) {
        let weak = Rc::downgrade(self);
        let listener = EventListener::new_with_options(&self.post_list, event, options, move |e: &Event| {
            if let Some(this) = weak.upgrade() {
                handler(&this, e);
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn register_pointer(self: &Rc<Self>) {
        self.listen("wheel", EventListenerOptions::enable_prevent_default(), Self::on_wheel);
        self.listen("mousedown", EventListenerOptions::default(), Self::on_mouse_down);
        self.listen("mousemove", EventListenerOptions::enable_prevent_default(), Self::on_mouse_move);
        self.listen("mouseup", EventListenerOptions::default(), Self::on_mouse_up);
        self.listen("mouseleave", EventListenerOptions::default(), Self::on_mouse_leave);
        self.listen(
            "click",
            EventListenerOptions { phase: EventListenerPhase::Capture, passive: false },
            Self::on_click_capture,
        );
    }

    fn register_arrow_keys(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let listener = EventListener::new_with_options(
            &self.document,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(this) = weak.upgrade() else {
                    return;
                };
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let action = this.core.borrow().on_arrow_key(&event.key(), dom::focus(&this.document));
                if let Some(action) = action {
                    event.prevent_default();
                    this.apply(&[action]);
                }
            },
        );
        self.listeners.borrow_mut().push(listener);
        log::info!("arrow-key scrolling enabled");
    }

    fn on_wheel(&self, event: &Event) {
        let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        let action = self.core.borrow().on_wheel(wheel.delta_y(), self.scroll_left());
        if let Some(action) = action {
            event.prevent_default();
            self.apply(&[action]);
        }
    }

    fn on_mouse_down(&self, event: &Event) {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let actions = self.core.borrow_mut().on_press(self.local_x(mouse), self.scroll_left());
        self.apply(&actions);
    }

    fn on_mouse_move(&self, event: &Event) {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let action = self.core.borrow().on_move(self.local_x(mouse));
        if let Some(action) = action {
            event.prevent_default();
            self.apply(&[action]);
        }
    }

    fn on_mouse_up(&self, event: &Event) {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let released = self.core.borrow_mut().on_release(self.local_x(mouse));
        if let Some((gesture, actions)) = released {
            if gesture == Gesture::Drag {
                log::trace!("drag ended, next click suppressed");
            }
            self.apply(&actions);
        }
    }

    fn on_mouse_leave(&self, _event: &Event) {
        let actions = self.core.borrow_mut().on_leave();
        self.apply(&actions);
    }

    fn on_click_capture(&self, event: &Event) {
        if self.core.borrow_mut().take_click_suppression() {
            event.prevent_default();
            event.stop_propagation();
        }
    }
}
