//! Shell controller core: header theme toggle and mobile navigation drawer.
//!
//! The theme toggle cycles a stored [`ThemeChoice`] through
//! `system -> light -> dark -> system`. `system` follows the OS color-scheme
//! signal; the other two pin the theme. The resolved [`Theme`] is the single
//! authority for `<html>`: it sets both the `dark` class and `data-theme`,
//! and marks the matching reader theme button.
//!
//! The drawer is a two-state machine (`Closed <-> Open`) driving classes,
//! ARIA attributes, body scroll lock, and focus.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use crate::action::{Action, Target};
use crate::consts::{ATTR_THEME, CLASS_DARK, CLASS_HIDDEN, KEY_SHELL_THEME};
use crate::prefs::{PreferenceKind, Theme};
use crate::store::{KeyValueStore, read_logged, write_logged};

const DRAWER_HIDDEN: &str = "translate-x-full";
const DRAWER_SHOWN: &str = "translate-x-0";
const OVERLAY_HIDDEN: [&str; 2] = ["opacity-0", "pointer-events-none"];
const OVERLAY_SHOWN: &str = "opacity-100";

/// Elements addressed by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellPart {
    ThemeToggle,
    IconSystem,
    IconLight,
    IconDark,
    DrawerOpen,
    DrawerClose,
    Overlay,
    Drawer,
}

/// Stored theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeChoice {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeChoice {
    pub const CYCLE: [Self; 3] = [Self::System, Self::Light, Self::Dark];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interpret a stored value. Only `light` and `dark` pin the theme;
    /// anything else, including nothing, means `system`.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            _ => Self::System,
        }
    }

    /// The theme this choice pins, or `None` for `system`.
    #[must_use]
    pub fn pinned(self) -> Option<Theme> {
        match self {
            Self::System => None,
            Self::Light => Some(Theme::Light),
            Self::Dark => Some(Theme::Dark),
        }
    }

    /// Next choice in the toggle cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
        }
    }

    /// Effective theme given the OS preference.
    #[must_use]
    pub fn resolve(self, system_dark: bool) -> Theme {
        match self {
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
            Self::System if system_dark => Theme::Dark,
            Self::System => Theme::Light,
        }
    }

    /// Icon shown while this choice is active.
    #[must_use]
    pub fn icon(self) -> ShellPart {
        match self {
            Self::System => ShellPart::IconSystem,
            Self::Light => ShellPart::IconLight,
            Self::Dark => ShellPart::IconDark,
        }
    }

    /// Accessible label for the toggle button.
    #[must_use]
    pub fn aria_label(self) -> &'static str {
        match self {
            Self::System => "Theme: system",
            Self::Light => "Theme: light",
            Self::Dark => "Theme: dark",
        }
    }
}

/// Root effects for a resolved theme: the `dark` class, `data-theme`, and
/// the active reader theme button.
#[must_use]
pub fn root_theme(theme: Theme) -> Vec<Action> {
    vec![
        Action::ToggleClass { target: Target::Root, class: CLASS_DARK, on: theme.is_dark() },
        Action::SetAttribute { target: Target::Root, name: ATTR_THEME, value: theme.as_str() },
        Action::MarkActive { kind: PreferenceKind::Theme, value: theme.as_str() },
    ]
}

/// Which shell features a page can wire, given the elements it has.
///
/// The resolved theme is applied and the OS color-scheme listener runs on
/// every page; only the click targets depend on markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellWiring {
    pub toggle: bool,
    pub drawer: bool,
}

impl ShellWiring {
    pub fn new(has: impl Fn(ShellPart) -> bool) -> Self {
        Self { toggle: has(ShellPart::ThemeToggle), drawer: has(ShellPart::DrawerOpen) && has(ShellPart::Drawer) }
    }
}

/// 3-state theme toggle backed by the `theme` storage key.
#[derive(Debug)]
pub struct ThemeToggle<S> {
    store: S,
    system_dark: bool,
}

impl<S: KeyValueStore> ThemeToggle<S> {
    /// `system_dark` is the current `(prefers-color-scheme: dark)` match.
    pub fn new(store: S, system_dark: bool) -> Self {
        Self { store, system_dark }
    }

    /// Current choice, read from storage every time so another tab's write
    /// is picked up on the next interaction.
    #[must_use]
    pub fn choice(&self) -> ThemeChoice {
        ThemeChoice::from_stored(read_logged(&self.store, KEY_SHELL_THEME).as_deref())
    }

    /// Effective theme right now.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.choice().resolve(self.system_dark)
    }

    /// Apply the stored choice and show its icon.
    #[must_use]
    pub fn init(&self) -> Vec<Action> {
        self.render(self.choice())
    }

    /// Advance the cycle, persist, and apply.
    pub fn toggle(&mut self) -> Vec<Action> {
        let next = self.choice().next();
        write_logged(&self.store, KEY_SHELL_THEME, next.as_str());
        log::debug!("theme choice -> {}", next.as_str());
        self.render(next)
    }

    /// OS color scheme changed. Re-applies only while the choice is `system`.
    pub fn on_system_change(&mut self, system_dark: bool) -> Vec<Action> {
        self.system_dark = system_dark;
        let choice = self.choice();
        if choice != ThemeChoice::System {
            return Vec::new();
        }
        root_theme(choice.resolve(self.system_dark))
    }

    fn render(&self, choice: ThemeChoice) -> Vec<Action> {
        let mut actions = root_theme(choice.resolve(self.system_dark));
        actions.extend(ThemeChoice::CYCLE.iter().map(|c| Action::ToggleClass {
            target: Target::Shell(c.icon()),
            class: CLASS_HIDDEN,
            on: *c != choice,
        }));
        actions.push(Action::SetAttribute {
            target: Target::Shell(ShellPart::ThemeToggle),
            name: "aria-label",
            value: choice.aria_label(),
        });
        actions
    }
}

/// Drawer visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

/// Mobile navigation drawer state machine.
#[derive(Debug, Clone, Default)]
pub struct Drawer {
    state: DrawerState,
}

impl Drawer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DrawerState {
        self.state
    }

    /// Slide the drawer in. No-op when already open.
    pub fn open(&mut self) -> Vec<Action> {
        if self.state == DrawerState::Open {
            return Vec::new();
        }
        self.state = DrawerState::Open;
        let mut actions = Self::visibility(true);
        actions.push(Action::FocusFirstLink(Target::Shell(ShellPart::Drawer)));
        actions
    }

    /// Slide the drawer out and return focus to the opener. No-op when
    /// already closed.
    pub fn close(&mut self) -> Vec<Action> {
        if self.state == DrawerState::Closed {
            return Vec::new();
        }
        self.state = DrawerState::Closed;
        let mut actions = Self::visibility(false);
        actions.push(Action::Focus(Target::Shell(ShellPart::DrawerOpen)));
        actions
    }

    /// Close without moving focus, for host teardown. No-op when closed.
    pub fn release(&mut self) -> Vec<Action> {
        if self.state == DrawerState::Closed {
            return Vec::new();
        }
        self.state = DrawerState::Closed;
        Self::visibility(false)
    }

    /// Document-level keydown. Escape closes an open drawer; `None` means
    /// the key was not handled.
    pub fn on_key(&mut self, key: &str) -> Option<Vec<Action>> {
        if key != "Escape" || self.state != DrawerState::Open {
            return None;
        }
        Some(self.close())
    }

    fn visibility(open: bool) -> Vec<Action> {
        let drawer = Target::Shell(ShellPart::Drawer);
        let overlay = Target::Shell(ShellPart::Overlay);
        let hidden = if open { "false" } else { "true" };
        let mut actions = vec![
            Action::ToggleClass { target: drawer, class: DRAWER_HIDDEN, on: !open },
            Action::ToggleClass { target: drawer, class: DRAWER_SHOWN, on: open },
            Action::SetAttribute { target: drawer, name: "aria-hidden", value: hidden },
        ];
        actions.extend(OVERLAY_HIDDEN.iter().map(|&class| Action::ToggleClass { target: overlay, class, on: !open }));
        actions.extend([
            Action::ToggleClass { target: overlay, class: OVERLAY_SHOWN, on: open },
            Action::SetAttribute { target: overlay, name: "aria-hidden", value: hidden },
            Action::SetAttribute {
                target: Target::Shell(ShellPart::DrawerOpen),
                name: "aria-expanded",
                value: if open { "true" } else { "false" },
            },
            Action::SetStyle { target: Target::Body, property: "overflow", value: open.then_some("hidden") },
        ]);
        actions
    }
}
