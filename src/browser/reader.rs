//! Preference controller host: wires `[data-font-size]`, `[data-theme]`, and
//! `[data-view]` buttons, optional keyboard shortcuts, and the scroll
//! progress readout to [`ReaderCore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, Window};

use super::dom::{self, Targets};
use super::storage::LocalStore;
use crate::action::{Action, Target};
use crate::bus::ViewModeBus;
use crate::config::Config;
use crate::prefs::PreferenceKind;
use crate::progress::{FrameGate, readout};
use crate::reader::ReaderCore;

pub struct ReaderControls {
    core: RefCell<ReaderCore<LocalStore>>,
    window: Window,
    document: Document,
    root: Option<Element>,
    post_list: Option<Element>,
    progress_text: Option<Element>,
    buttons: HashMap<PreferenceKind, Vec<Element>>,
    gate: FrameGate,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Targets for ReaderControls {
    fn element(&self, target: Target) -> Option<Element> {
        match target {
            Target::Root => self.root.clone(),
            Target::PostList => self.post_list.clone(),
            Target::ProgressText => self.progress_text.clone(),
            Target::Body | Target::Shell(_) => None,
        }
    }

    fn buttons(&self, kind: PreferenceKind) -> &[Element] {
        self.buttons.get(&kind).map_or(&[], Vec::as_slice)
    }
}

impl ReaderControls {
    /// Look up the page regions, apply stored preferences, and attach
    /// listeners. `None` when the document has no root element.
    pub fn init(
        window: &Window,
        document: &Document,
        config: &Config,
        store: LocalStore,
        bus: ViewModeBus,
    ) -> Option<Rc<Self>> {
        let Some(root) = document.document_element() else {
            log::warn!("reader controls: document has no root element");
            return None;
        };
        let post_list = dom::query(document, &config.selectors.post_list);
        let buttons = PreferenceKind::ALL
            .iter()
            .map(|kind| (*kind, dom::query_all(document, &kind.button_selector(&config.selectors.post_list))))
            .collect();

        let this = Rc::new(Self {
            core: RefCell::new(ReaderCore::new(store, bus, post_list.is_some())),
            window: window.clone(),
            document: document.clone(),
            root: Some(root),
            post_list,
            progress_text: dom::query(document, &config.selectors.progress_text),
            buttons,
            gate: FrameGate::new(),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });

        let actions = this.core.borrow_mut().load_and_apply();
        this.apply(&actions);
        this.register_buttons();
        if config.keyboard_shortcuts {
            this.register_shortcuts();
            log::info!("reader keyboard shortcuts enabled");
        }
        if this.progress_text.is_some() {
            this.register_progress();
        }
        log::info!("reader controls ready");
        Some(this)
    }

    /// Restore default preferences and clear their stored values.
    pub fn reset(&self) {
        let actions = self.core.borrow_mut().reset();
        self.apply(&actions);
    }

    /// Detach every listener and cancel any queued frame.
    pub fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        self.frame.borrow_mut().take();
        self.gate.complete();
    }

    fn apply(&self, actions: &[Action]) {
        dom::apply(actions, self);
    }

    fn register_buttons(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        for (kind, buttons) in &self.buttons {
            for button in buttons {
                let weak = Rc::downgrade(self);
                let kind = *kind;
                let source = button.clone();
                listeners.push(EventListener::new(button, "click", move |_event: &Event| {
                    let Some(this) = weak.upgrade() else {
                        return;
                    };
                    let raw = source.get_attribute(kind.attribute()).unwrap_or_default();
                    let result = this.core.borrow_mut().set_from_attribute(kind, &raw);
                    match result {
                        Ok(actions) => this.apply(&actions),
                        Err(e) => log::warn!("ignoring button click: {e}"),
                    }
                }));
            }
        }
        self.listeners.borrow_mut().extend(listeners);
    }

    fn register_shortcuts(self: &Rc<Self>) {
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
                let focus = dom::focus(&this.document);
                let handled = this.core.borrow_mut().on_shortcut(&event.key(), dom::modifiers(event), focus);
                if let Some(actions) = handled {
                    event.prevent_default();
                    this.apply(&actions);
                }
            },
        );
        self.listeners.borrow_mut().push(listener);
    }

    fn register_progress(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let listener = EventListener::new(&self.window, "scroll", move |_event: &Event| {
            if let Some(this) = weak.upgrade() {
                this.schedule_progress();
            }
        });
        self.listeners.borrow_mut().push(listener);
        self.update_progress();
    }

    /// Queue one progress recompute for the next frame; further scroll
    /// events before it runs are absorbed.
    fn schedule_progress(self: &Rc<Self>) {
        if !self.gate.try_schedule() {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = request_animation_frame(move |_timestamp| {
            if let Some(this) = weak.upgrade() {
                this.frame.borrow_mut().take();
                this.update_progress();
                this.gate.complete();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn update_progress(&self) {
        let Some(root) = &self.root else {
            return;
        };
        let (scroll_top, document_height, viewport_height) = dom::page_metrics(&self.window, root);
        self.apply(&[readout(scroll_top, document_height, viewport_height)]);
    }
}
