//! Preference controller core.
//!
//! Owns the three reader preferences, persists them through a
//! [`KeyValueStore`], and turns every change into [`Action`]s for the host.
//! View-mode changes are also published on the [`ViewModeBus`] so the
//! horizontal scroll controller can follow along.
//!
//! Storage is the source of truth on load; after that this core is, with
//! every mutation written through before its actions are returned.
//!
//! The root theme is shared with the shell toggle. A theme change here pins
//! the shell's choice too, and a pinned shell choice wins over `blog-theme`
//! on load, so `data-theme` and the `dark` class always describe one theme.

#[cfg(test)]
#[path = "reader_test.rs"]
mod reader_test;

use crate::action::{Action, Target};
use crate::bus::ViewModeBus;
use crate::error::ParseError;
use crate::input::{Focus, Modifiers, reader_shortcut};
use crate::consts::KEY_SHELL_THEME;
use crate::prefs::{Preference, PreferenceKind, Preferences};
use crate::shell::{ThemeChoice, root_theme};
use crate::store::{KeyValueStore, read_logged, remove_logged, write_logged};

pub struct ReaderCore<S> {
    store: S,
    bus: ViewModeBus,
    prefs: Preferences,
    has_post_list: bool,
}

impl<S: KeyValueStore> ReaderCore<S> {
    /// `has_post_list` tells the core whether a view-mode target exists on
    /// this page; without one, view-mode changes are stored but not applied.
    pub fn new(store: S, bus: ViewModeBus, has_post_list: bool) -> Self {
        Self { store, bus, prefs: Preferences::default(), has_post_list }
    }

    #[must_use]
    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    /// Read all three preferences from storage and apply them.
    ///
    /// Absent keys, unreadable storage, and unrecognized stored strings all
    /// fall back to the kind's default.
    pub fn load_and_apply(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        for kind in PreferenceKind::ALL {
            let pref = self.load(kind);
            actions.extend(self.apply(pref));
        }
        actions
    }

    /// Persist `pref` and apply it.
    pub fn set_preference(&mut self, pref: Preference) -> Vec<Action> {
        write_logged(&self.store, pref.kind().storage_key(), pref.as_str());
        if let Preference::Theme(theme) = pref {
            write_logged(&self.store, KEY_SHELL_THEME, theme.as_str());
        }
        self.apply(pref)
    }

    /// Parse a raw button attribute value for `kind`, then persist and apply.
    ///
    /// Unknown values change nothing.
    pub fn set_from_attribute(&mut self, kind: PreferenceKind, raw: &str) -> Result<Vec<Action>, ParseError> {
        let pref = kind.parse(raw)?;
        Ok(self.set_preference(pref))
    }

    /// Clear every stored preference, including the shell's pinned theme,
    /// and re-apply the defaults.
    pub fn reset(&mut self) -> Vec<Action> {
        for kind in PreferenceKind::ALL {
            remove_logged(&self.store, kind.storage_key());
        }
        remove_logged(&self.store, KEY_SHELL_THEME);
        let mut actions = Vec::new();
        for kind in PreferenceKind::ALL {
            actions.extend(self.apply(kind.default_value()));
        }
        log::info!("reader settings reset to defaults");
        actions
    }

    /// Handle a keyboard shortcut. `None` means the key was not consumed and
    /// the host should leave the event alone.
    pub fn on_shortcut(&mut self, key: &str, modifiers: Modifiers, focus: Focus) -> Option<Vec<Action>> {
        if focus == Focus::TextEntry {
            return None;
        }
        let pref = reader_shortcut(key, modifiers)?;
        Some(self.set_preference(pref))
    }

    fn load(&self, kind: PreferenceKind) -> Preference {
        if kind == PreferenceKind::Theme {
            let shell = ThemeChoice::from_stored(read_logged(&self.store, KEY_SHELL_THEME).as_deref());
            if let Some(theme) = shell.pinned() {
                return Preference::Theme(theme);
            }
        }
        let Some(raw) = read_logged(&self.store, kind.storage_key()) else {
            return kind.default_value();
        };
        match kind.parse(&raw) {
            Ok(pref) => pref,
            Err(e) => {
                log::warn!("ignoring stored {}: {e}", kind.storage_key());
                kind.default_value()
            }
        }
    }

    fn apply(&mut self, pref: Preference) -> Vec<Action> {
        self.prefs.set(pref);
        let kind = pref.kind();
        let value = pref.as_str();
        let target = match pref {
            Preference::FontSize(_) | Preference::Theme(_) => Target::Root,
            Preference::ViewMode(_) if !self.has_post_list => {
                log::warn!("no post list on this page; view mode {value} not applied");
                return Vec::new();
            }
            Preference::ViewMode(_) => Target::PostList,
        };
        log::debug!("{} -> {value}", kind.attribute());

        match pref {
            Preference::Theme(theme) => return root_theme(theme),
            Preference::ViewMode(mode) => self.bus.publish(mode),
            Preference::FontSize(_) => {}
        }
        vec![Action::SetAttribute { target, name: kind.attribute(), value }, Action::MarkActive { kind, value }]
    }
}
