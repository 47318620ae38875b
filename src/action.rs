//! DOM effects produced by the controller cores.
//!
//! Cores never touch the DOM. They return [`Action`] lists that the browser
//! host applies in order, which keeps every state machine testable natively.

use crate::prefs::PreferenceKind;
use crate::shell::ShellPart;

/// Element an action applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The `<html>` element.
    Root,
    /// The `<body>` element.
    Body,
    /// The `.post-list` container.
    PostList,
    /// The `.scroll-progress-text` readout.
    ProgressText,
    /// One of the shell header/drawer elements.
    Shell(ShellPart),
}

/// A single DOM effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set attribute `name` to `value`.
    SetAttribute { target: Target, name: &'static str, value: &'static str },
    /// Add the active class to the button of `kind` whose attribute equals
    /// `value`, and remove it from every other button of that kind.
    MarkActive { kind: PreferenceKind, value: &'static str },
    /// Add (`on`) or remove a class.
    ToggleClass { target: Target, class: &'static str, on: bool },
    /// Set an inline style property; `None` clears it.
    SetStyle { target: Target, property: &'static str, value: Option<&'static str> },
    /// Replace the element's text content.
    SetText { target: Target, text: String },
    /// Set the post list's `scrollLeft`.
    SetScrollLeft(f64),
    /// Smoothly scroll the post list horizontally by the given delta.
    ScrollBy(f64),
    /// Move keyboard focus to the element.
    Focus(Target),
    /// Move keyboard focus to the first link inside the element.
    FocusFirstLink(Target),
}

impl Action {
    /// Shorthand for a cursor style change on the post list.
    #[must_use]
    pub fn cursor(value: Option<&'static str>) -> Self {
        Self::SetStyle { target: Target::PostList, property: "cursor", value }
    }

    /// Shorthand for a `user-select` style change on the post list.
    #[must_use]
    pub fn user_select(value: Option<&'static str>) -> Self {
        Self::SetStyle { target: Target::PostList, property: "user-select", value }
    }
}
