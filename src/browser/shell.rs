//! Site shell host: header theme toggle and the mobile drawer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, MediaQueryList, Window};

use super::dom::{self, Targets};
use super::storage::LocalStore;
use crate::action::{Action, Target};
use crate::config::{Config, ShellIds};
use crate::prefs::PreferenceKind;
use crate::shell::{Drawer, ShellPart, ShellWiring, ThemeToggle};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub struct Shell {
    theme: RefCell<ThemeToggle<LocalStore>>,
    drawer: RefCell<Drawer>,
    root: Option<Element>,
    body: Option<Element>,
    parts: HashMap<ShellPart, Element>,
    theme_buttons: Vec<Element>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Targets for Shell {
    fn element(&self, target: Target) -> Option<Element> {
        match target {
            Target::Root => self.root.clone(),
            Target::Body => self.body.clone(),
            Target::Shell(part) => self.parts.get(&part).cloned(),
            Target::PostList | Target::ProgressText => None,
        }
    }

    fn buttons(&self, kind: PreferenceKind) -> &[Element] {
        match kind {
            PreferenceKind::Theme => self.theme_buttons.as_slice(),
            PreferenceKind::FontSize | PreferenceKind::ViewMode => &[],
        }
    }
}

fn lookup(document: &Document, ids: &ShellIds) -> HashMap<ShellPart, Element> {
    [
        (ShellPart::ThemeToggle, &ids.theme_toggle),
        (ShellPart::IconSystem, &ids.icon_system),
        (ShellPart::IconLight, &ids.icon_light),
        (ShellPart::IconDark, &ids.icon_dark),
        (ShellPart::DrawerOpen, &ids.drawer_open),
        (ShellPart::DrawerClose, &ids.drawer_close),
        (ShellPart::Overlay, &ids.drawer_overlay),
        (ShellPart::Drawer, &ids.drawer),
    ]
    .into_iter()
    .filter_map(|(part, id)| dom::by_id(document, id).map(|el| (part, el)))
    .collect()
}

impl Shell {
    /// Apply the stored theme, follow the OS color scheme, and wire whichever
    /// shell elements the page has. `None` when the document has no root.
    pub fn init(window: &Window, document: &Document, config: &Config, store: LocalStore) -> Option<Rc<Self>> {
        let Some(root) = document.document_element() else {
            log::warn!("shell: document has no root element");
            return None;
        };
        let parts = lookup(document, &config.shell);
        let wiring = ShellWiring::new(|part| parts.contains_key(&part));
        let theme_buttons =
            dom::query_all(document, &PreferenceKind::Theme.button_selector(&config.selectors.post_list));
        let scheme = dom::check("matchMedia", window.match_media(DARK_SCHEME_QUERY)).flatten();
        let system_dark = scheme.as_ref().is_some_and(MediaQueryList::matches);

        let this = Rc::new(Self {
            theme: RefCell::new(ThemeToggle::new(store, system_dark)),
            drawer: RefCell::new(Drawer::new()),
            root: Some(root),
            body: document.body().map(Into::into),
            parts,
            theme_buttons,
            listeners: RefCell::new(Vec::new()),
        });

        let actions = this.theme.borrow().init();
        this.apply(&actions);
        this.register_theme(scheme.as_ref(), wiring.toggle);
        if wiring.drawer {
            this.register_drawer(document);
        } else {
            log::debug!("no mobile drawer on this page");
        }
        log::info!("shell ready ({} elements found)", this.parts.len());
        Some(this)
    }

    /// Detach listeners, closing an open drawer first so the body scroll
    /// lock is released.
    pub fn teardown(&self) {
        let actions = self.drawer.borrow_mut().release();
        self.apply(&actions);
        self.listeners.borrow_mut().clear();
    }

    fn apply(&self, actions: &[Action]) {
        dom::apply(actions, self);
    }

    fn on_click(self: &Rc<Self>, part: ShellPart, handler: fn(&Self)) {
        let Some(element) = self.parts.get(&part) else {
            return;
        };
        let weak = Rc::downgrade(self);
        let listener = EventListener::new(element, "click", move |_event: &Event| {
            if let Some(this) = weak.upgrade() {
                handler(&this);
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn register_theme(self: &Rc<Self>, scheme: Option<&MediaQueryList>, toggle: bool) {
        if toggle {
            self.on_click(ShellPart::ThemeToggle, |this| {
                let actions = this.theme.borrow_mut().toggle();
                this.apply(&actions);
            });
        }

        let Some(scheme) = scheme else {
            return;
        };
        let weak = Rc::downgrade(self);
        let source = scheme.clone();
        let listener = EventListener::new(scheme, "change", move |_event: &Event| {
            if let Some(this) = weak.upgrade() {
                let actions = this.theme.borrow_mut().on_system_change(source.matches());
                this.apply(&actions);
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn register_drawer(self: &Rc<Self>, document: &Document) {
        self.on_click(ShellPart::DrawerOpen, |this| {
            let actions = this.drawer.borrow_mut().open();
            this.apply(&actions);
        });
        for part in [ShellPart::DrawerClose, ShellPart::Overlay] {
            self.on_click(part, Self::close_drawer);
        }

        let weak = Rc::downgrade(self);
        let listener = EventListener::new(document, "keydown", move |event: &Event| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let handled = this.drawer.borrow_mut().on_key(&event.key());
            if let Some(actions) = handled {
                this.apply(&actions);
            }
        });
        self.listeners.borrow_mut().push(listener);
    }

    fn close_drawer(&self) {
        let actions = self.drawer.borrow_mut().close();
        self.apply(&actions);
    }
}
