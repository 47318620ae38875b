use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::*;
use crate::prefs::{FontSize, Theme, ViewMode};
use crate::shell::ThemeToggle;
use crate::store::{MemoryStore, UnavailableStore};

// =============================================================
// Helpers
// =============================================================

/// Minimal stand-in for the page: attributes per target plus one button per
/// enum variant for each kind.
#[derive(Debug, Default, Clone, PartialEq)]
struct FakePage {
    attrs: HashMap<(Target, &'static str), &'static str>,
    classes: HashMap<(Target, &'static str), bool>,
    active: HashMap<PreferenceKind, Vec<(&'static str, bool)>>,
}

impl FakePage {
    fn new() -> Self {
        let mut active = HashMap::new();
        active.insert(PreferenceKind::FontSize, FontSize::ALL.iter().map(|v| (v.as_str(), false)).collect());
        active.insert(PreferenceKind::Theme, Theme::ALL.iter().map(|v| (v.as_str(), false)).collect());
        active.insert(PreferenceKind::ViewMode, ViewMode::ALL.iter().map(|v| (v.as_str(), false)).collect());
        Self { attrs: HashMap::new(), classes: HashMap::new(), active }
    }

    fn apply(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::SetAttribute { target, name, value } => {
                    self.attrs.insert((*target, *name), *value);
                }
                Action::MarkActive { kind, value } => {
                    for (button, on) in self.active.get_mut(kind).into_iter().flatten() {
                        *on = *button == *value;
                    }
                }
                Action::ToggleClass { target, class, on } => {
                    self.classes.insert((*target, *class), *on);
                }
                other => panic!("unexpected action {other:?}"),
            }
        }
    }

    fn attr(&self, target: Target, name: &'static str) -> Option<&'static str> {
        self.attrs.get(&(target, name)).copied()
    }

    fn has_class(&self, target: Target, class: &'static str) -> bool {
        self.classes.get(&(target, class)).copied().unwrap_or(false)
    }

    /// `data-theme` and the `dark` class name the same theme.
    fn root_theme_agrees(&self) -> bool {
        match self.attr(Target::Root, "data-theme") {
            Some("dark") => self.has_class(Target::Root, "dark"),
            Some("light") => !self.has_class(Target::Root, "dark"),
            _ => false,
        }
    }

    fn active_buttons(&self, kind: PreferenceKind) -> Vec<&'static str> {
        self.active[&kind].iter().filter(|(_, on)| *on).map(|(v, _)| *v).collect()
    }
}

fn core(store: &MemoryStore) -> ReaderCore<MemoryStore> {
    ReaderCore::new(store.clone(), ViewModeBus::new(), true)
}

fn loaded_page(store: &MemoryStore) -> FakePage {
    let mut page = FakePage::new();
    page.apply(&core(store).load_and_apply());
    page
}

// =============================================================
// load_and_apply
// =============================================================

#[test]
fn empty_storage_applies_defaults() {
    let page = loaded_page(&MemoryStore::new());
    assert_eq!(page.attr(Target::Root, "data-font-size"), Some("M"));
    assert_eq!(page.attr(Target::Root, "data-theme"), Some("dark"));
    assert_eq!(page.attr(Target::PostList, "data-view"), Some("default"));
}

#[test]
fn stored_values_are_applied() {
    let store = MemoryStore::new();
    store.set("blog-font-size", "L").unwrap();
    store.set("blog-theme", "light").unwrap();
    store.set("blog-view-mode", "image").unwrap();

    let page = loaded_page(&store);

    assert_eq!(page.attr(Target::Root, "data-font-size"), Some("L"));
    assert_eq!(page.attr(Target::Root, "data-theme"), Some("light"));
    assert_eq!(page.attr(Target::PostList, "data-view"), Some("image"));
}

#[test]
fn corrupted_stored_value_falls_back_to_default() {
    let store = MemoryStore::new();
    store.set("blog-font-size", "<script>").unwrap();
    store.set("blog-theme", "solarized").unwrap();

    let page = loaded_page(&store);

    assert_eq!(page.attr(Target::Root, "data-font-size"), Some("M"));
    assert_eq!(page.attr(Target::Root, "data-theme"), Some("dark"));
}

#[test]
fn unavailable_storage_falls_back_to_defaults() {
    let mut reader = ReaderCore::new(UnavailableStore, ViewModeBus::new(), true);
    let mut page = FakePage::new();
    page.apply(&reader.load_and_apply());
    assert_eq!(reader.preferences(), Preferences::default());
    assert_eq!(page.attr(Target::Root, "data-theme"), Some("dark"));
}

#[test]
fn load_does_not_write_storage() {
    let store = MemoryStore::new();
    loaded_page(&store);
    assert!(store.is_empty());
}

// =============================================================
// set_preference
// =============================================================

#[test]
fn set_then_reload_round_trips_every_kind() {
    let cases = [
        Preference::FontSize(FontSize::S),
        Preference::FontSize(FontSize::L),
        Preference::Theme(Theme::Light),
        Preference::ViewMode(ViewMode::Image),
    ];
    for pref in cases {
        let store = MemoryStore::new();
        core(&store).set_preference(pref);

        let page = loaded_page(&store);
        let target = if pref.kind() == PreferenceKind::ViewMode { Target::PostList } else { Target::Root };
        assert_eq!(page.attr(target, pref.kind().attribute()), Some(pref.as_str()), "{pref:?}");
    }
}

#[test]
fn set_writes_through_to_storage() {
    let store = MemoryStore::new();
    core(&store).set_preference(Preference::Theme(Theme::Light));
    assert_eq!(store.get("blog-theme"), Ok(Some("light".into())));
}

#[test]
fn applying_twice_is_idempotent() {
    let store = MemoryStore::new();
    let mut reader = core(&store);
    let mut once = FakePage::new();
    once.apply(&reader.set_preference(Preference::FontSize(FontSize::L)));

    let mut twice = once.clone();
    twice.apply(&reader.set_preference(Preference::FontSize(FontSize::L)));

    assert_eq!(once, twice);
}

#[test]
fn exactly_one_button_is_active_per_kind() {
    let store = MemoryStore::new();
    let mut reader = core(&store);
    let mut page = FakePage::new();
    page.apply(&reader.load_and_apply());

    for size in FontSize::ALL {
        page.apply(&reader.set_preference(Preference::FontSize(size)));
        assert_eq!(page.active_buttons(PreferenceKind::FontSize), vec![size.as_str()]);
    }
    for theme in Theme::ALL {
        page.apply(&reader.set_preference(Preference::Theme(theme)));
        assert_eq!(page.active_buttons(PreferenceKind::Theme), vec![theme.as_str()]);
    }
    for mode in ViewMode::ALL {
        page.apply(&reader.set_preference(Preference::ViewMode(mode)));
        assert_eq!(page.active_buttons(PreferenceKind::ViewMode), vec![mode.as_str()]);
    }
}

#[test]
fn set_from_attribute_parses_button_value() {
    let store = MemoryStore::new();
    let mut reader = core(&store);
    let actions = reader.set_from_attribute(PreferenceKind::FontSize, "S").unwrap();
    assert!(actions.contains(&Action::SetAttribute { target: Target::Root, name: "data-font-size", value: "S" }));
    assert_eq!(reader.preferences().font_size, FontSize::S);
}

#[test]
fn set_from_attribute_rejects_unknown_value_without_side_effects() {
    let store = MemoryStore::new();
    let mut reader = core(&store);
    let err = reader.set_from_attribute(PreferenceKind::Theme, "sepia").unwrap_err();
    assert_eq!(err, ParseError::UnknownVariant { kind: "theme", value: "sepia".into() });
    assert!(store.is_empty());
    assert_eq!(reader.preferences(), Preferences::default());
}

// =============================================================
// View mode target and bus
// =============================================================

#[test]
fn view_mode_without_post_list_is_stored_but_not_applied() {
    let store = MemoryStore::new();
    let mut reader = ReaderCore::new(store.clone(), ViewModeBus::new(), false);
    let actions = reader.set_preference(Preference::ViewMode(ViewMode::Image));
    assert!(actions.is_empty());
    assert_eq!(store.get("blog-view-mode"), Ok(Some("image".into())));
}

#[test]
fn view_mode_changes_are_published() {
    let bus = ViewModeBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = bus.subscribe(move |mode| sink.borrow_mut().push(mode));

    let mut reader = ReaderCore::new(MemoryStore::new(), bus, true);
    reader.load_and_apply();
    reader.set_preference(Preference::ViewMode(ViewMode::Image));
    reader.set_preference(Preference::FontSize(FontSize::S));

    assert_eq!(*seen.borrow(), vec![ViewMode::Default, ViewMode::Image]);
}

// =============================================================
// reset
// =============================================================

#[test]
fn reset_restores_defaults_and_clears_keys() {
    let store = MemoryStore::new();
    let mut reader = core(&store);
    let mut page = FakePage::new();
    page.apply(&reader.set_preference(Preference::FontSize(FontSize::L)));
    page.apply(&reader.set_preference(Preference::Theme(Theme::Light)));
    page.apply(&reader.set_preference(Preference::ViewMode(ViewMode::Image)));
    assert_eq!(store.len(), 4);

    page.apply(&reader.reset());

    assert!(store.is_empty());
    assert_eq!(reader.preferences(), Preferences::default());
    assert_eq!(page.attr(Target::Root, "data-font-size"), Some("M"));
    assert_eq!(page.attr(Target::Root, "data-theme"), Some("dark"));
    assert_eq!(page.attr(Target::PostList, "data-view"), Some("default"));
    assert_eq!(page.active_buttons(PreferenceKind::Theme), vec!["dark"]);
}

#[test]
fn reset_leaves_unrelated_keys_alone() {
    let store = MemoryStore::new();
    store.set("blog-draft", "hello").unwrap();
    core(&store).reset();
    assert_eq!(store.get("blog-draft"), Ok(Some("hello".into())));
}

#[test]
fn reset_unpins_shell_theme() {
    let store = MemoryStore::new();
    store.set("theme", "light").unwrap();
    core(&store).reset();
    assert_eq!(store.get("theme"), Ok(None));
}

// =============================================================
// Keyboard shortcuts
// =============================================================

#[test]
fn shortcut_sets_and_persists_preference() {
    let store = MemoryStore::new();
    let mut reader = core(&store);
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };

    let actions = reader.on_shortcut("3", ctrl, Focus::Page).unwrap();

    assert!(actions.contains(&Action::MarkActive { kind: PreferenceKind::FontSize, value: "L" }));
    assert_eq!(store.get("blog-font-size"), Ok(Some("L".into())));
}

#[test]
fn shortcut_is_ignored_while_typing() {
    let store = MemoryStore::new();
    let mut reader = core(&store);
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };

    assert_eq!(reader.on_shortcut("l", ctrl, Focus::TextEntry), None);
    assert!(store.is_empty());
}

#[test]
fn unbound_shortcut_is_not_consumed() {
    let mut reader = core(&MemoryStore::new());
    assert_eq!(reader.on_shortcut("1", Modifiers::default(), Focus::Page), None);
}

// =============================================================
// Shared root theme with the shell toggle
// =============================================================

#[test]
fn reader_then_shell_on_empty_storage_agree_on_root() {
    let store = MemoryStore::new();
    let mut page = FakePage::new();
    page.apply(&core(&store).load_and_apply());
    page.apply(&ThemeToggle::new(store.clone(), false).init());

    assert!(page.root_theme_agrees(), "{page:?}");
    assert_eq!(page.attr(Target::Root, "data-theme"), Some("light"));
    assert_eq!(page.active_buttons(PreferenceKind::Theme), vec!["light"]);
}

#[test]
fn pinned_shell_choice_wins_over_reader_key_on_load() {
    let store = MemoryStore::new();
    store.set("blog-theme", "light").unwrap();
    store.set("theme", "dark").unwrap();

    let mut reader = core(&store);
    let mut page = FakePage::new();
    page.apply(&reader.load_and_apply());

    assert_eq!(reader.preferences().theme, Theme::Dark);
    assert!(page.root_theme_agrees(), "{page:?}");
}

#[test]
fn reader_light_button_clears_shell_dark_class() {
    let store = MemoryStore::new();
    store.set("theme", "dark").unwrap();
    let mut reader = core(&store);
    let mut page = FakePage::new();
    page.apply(&reader.load_and_apply());
    page.apply(&ThemeToggle::new(store.clone(), true).init());
    assert!(page.has_class(Target::Root, "dark"));

    page.apply(&reader.set_preference(Preference::Theme(Theme::Light)));

    assert!(page.root_theme_agrees(), "{page:?}");
    assert!(!page.has_class(Target::Root, "dark"));
    assert_eq!(ThemeToggle::new(store.clone(), true).theme(), Theme::Light);
}

#[test]
fn shell_toggle_after_reader_keeps_root_consistent() {
    let store = MemoryStore::new();
    let mut reader = core(&store);
    let mut toggle = ThemeToggle::new(store.clone(), true);
    let mut page = FakePage::new();
    page.apply(&reader.load_and_apply());
    page.apply(&toggle.init());

    for _ in 0..3 {
        page.apply(&toggle.toggle());
        assert!(page.root_theme_agrees(), "{page:?}");
    }
    page.apply(&toggle.on_system_change(false));
    assert!(page.root_theme_agrees(), "{page:?}");
}
