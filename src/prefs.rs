//! Reader preference types and their string forms.
//!
//! Each preference is a closed enum. Strings coming from button attributes or
//! from storage are parsed at the boundary; anything unrecognized is an
//! explicit [`ParseError`] rather than a value that flows into the DOM.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use std::fmt;
use std::str::FromStr;

use crate::consts::{ATTR_FONT_SIZE, ATTR_THEME, ATTR_VIEW, KEY_FONT_SIZE, KEY_THEME, KEY_VIEW_MODE};
use crate::error::ParseError;

/// Body text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSize {
    S,
    #[default]
    M,
    L,
}

impl FontSize {
    pub const ALL: [Self; 3] = [Self::S, Self::M, Self::L];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        }
    }
}

impl FromStr for FontSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            other => Err(ParseError::UnknownVariant { kind: "font size", value: other.to_owned() }),
        }
    }
}

/// Reader color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseError::UnknownVariant { kind: "theme", value: other.to_owned() }),
        }
    }
}

/// Post-list layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Horizontal list; wheel and drag scrolling are active.
    #[default]
    Default,
    /// Image grid; horizontal scrolling is disabled.
    Image,
}

impl ViewMode {
    pub const ALL: [Self; 2] = [Self::Default, Self::Image];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Image => "image",
        }
    }
}

impl FromStr for ViewMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "image" => Ok(Self::Image),
            other => Err(ParseError::UnknownVariant { kind: "view mode", value: other.to_owned() }),
        }
    }
}

/// Which preference a button, storage key, or action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    FontSize,
    Theme,
    ViewMode,
}

impl PreferenceKind {
    pub const ALL: [Self; 3] = [Self::FontSize, Self::Theme, Self::ViewMode];

    /// Storage key the preference persists under.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::FontSize => KEY_FONT_SIZE,
            Self::Theme => KEY_THEME,
            Self::ViewMode => KEY_VIEW_MODE,
        }
    }

    /// DOM attribute carrying the value, both on buttons and on the target.
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            Self::FontSize => ATTR_FONT_SIZE,
            Self::Theme => ATTR_THEME,
            Self::ViewMode => ATTR_VIEW,
        }
    }

    /// CSS selector for this kind's buttons. The root element and the post
    /// list carry the same attribute as applied state, so both are excluded.
    #[must_use]
    pub fn button_selector(self, post_list: &str) -> String {
        format!("[{}]:not(html):not({post_list})", self.attribute())
    }

    /// Value used when nothing valid is stored.
    #[must_use]
    pub fn default_value(self) -> Preference {
        match self {
            Self::FontSize => Preference::FontSize(FontSize::default()),
            Self::Theme => Preference::Theme(Theme::default()),
            Self::ViewMode => Preference::ViewMode(ViewMode::default()),
        }
    }

    /// Parse a raw attribute or stored string as a value of this kind.
    pub fn parse(self, raw: &str) -> Result<Preference, ParseError> {
        Ok(match self {
            Self::FontSize => Preference::FontSize(raw.parse()?),
            Self::Theme => Preference::Theme(raw.parse()?),
            Self::ViewMode => Preference::ViewMode(raw.parse()?),
        })
    }
}

impl FromStr for PreferenceKind {
    type Err = ParseError;

    /// Accepts the attribute name (`data-font-size`) or the bare kind
    /// (`font-size`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("data-").unwrap_or(s) {
            "font-size" => Ok(Self::FontSize),
            "theme" => Ok(Self::Theme),
            "view" | "view-mode" => Ok(Self::ViewMode),
            _ => Err(ParseError::UnknownKind(s.to_owned())),
        }
    }
}

/// A typed preference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    FontSize(FontSize),
    Theme(Theme),
    ViewMode(ViewMode),
}

impl Preference {
    #[must_use]
    pub fn kind(self) -> PreferenceKind {
        match self {
            Self::FontSize(_) => PreferenceKind::FontSize,
            Self::Theme(_) => PreferenceKind::Theme,
            Self::ViewMode(_) => PreferenceKind::ViewMode,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FontSize(v) => v.as_str(),
            Self::Theme(v) => v.as_str(),
            Self::ViewMode(v) => v.as_str(),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of all three reader preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub font_size: FontSize,
    pub theme: Theme,
    pub view_mode: ViewMode,
}

impl Preferences {
    /// Current value for `kind`.
    #[must_use]
    pub fn get(&self, kind: PreferenceKind) -> Preference {
        match kind {
            PreferenceKind::FontSize => Preference::FontSize(self.font_size),
            PreferenceKind::Theme => Preference::Theme(self.theme),
            PreferenceKind::ViewMode => Preference::ViewMode(self.view_mode),
        }
    }

    /// Replace the value for the preference's kind.
    pub fn set(&mut self, pref: Preference) {
        match pref {
            Preference::FontSize(v) => self.font_size = v,
            Preference::Theme(v) => self.theme = v,
            Preference::ViewMode(v) => self.view_mode = v,
        }
    }
}
