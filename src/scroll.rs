//! Horizontal scroll controller core.
//!
//! Turns vertical wheel input and mouse drags into horizontal scrolling of
//! the post list. The drag gesture is a small state machine:
//!
//! ```text
//! Idle --press--> Dragging --release/leave--> Idle
//! ```
//!
//! On release the total travel decides whether the gesture was a click (the
//! link under the pointer navigates) or a drag (the click that follows is
//! swallowed). Everything is disabled while the view mode is `image`.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use crate::action::Action;
use crate::config::ScrollTuning;
use crate::consts::{CURSOR_GRAB, CURSOR_GRABBING, MOBILE_UA_KEYWORDS};
use crate::input::{Focus, arrow_direction};
use crate::prefs::ViewMode;

/// Device signals used to decide whether horizontal scrolling is wanted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MobileSignals {
    pub user_agent: String,
    /// `ontouchstart` exists or `maxTouchPoints > 0`.
    pub has_touch: bool,
    /// `window.innerWidth` in CSS pixels.
    pub viewport_width: f64,
}

impl MobileSignals {
    /// `true` for a mobile user agent, or a touch device no wider than
    /// `max_width`.
    #[must_use]
    pub fn is_mobile(&self, max_width: f64) -> bool {
        let ua = self.user_agent.to_lowercase();
        let mobile_ua = MOBILE_UA_KEYWORDS.iter().any(|k| ua.contains(k));
        mobile_ua || (self.has_touch && self.viewport_width <= max_width)
    }
}

/// Whether the controller should attach at all: a post list must exist and
/// the device must not be judged mobile.
#[must_use]
pub fn should_activate(has_post_list: bool, signals: &MobileSignals, max_width: f64) -> bool {
    has_post_list && !signals.is_mobile(max_width)
}

/// Drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer x (relative to the container) at press.
        anchor_x: f64,
        /// Container `scrollLeft` at press.
        start_offset: f64,
    },
}

/// How a completed press/release pair is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Travel below the threshold; the default click proceeds.
    Click,
    /// Travel at or above the threshold; the following click is suppressed.
    Drag,
}

#[derive(Debug, Clone)]
pub struct ScrollCore {
    tuning: ScrollTuning,
    view_mode: ViewMode,
    drag: DragState,
    suppress_click: bool,
}

impl ScrollCore {
    #[must_use]
    pub fn new(tuning: ScrollTuning, view_mode: ViewMode) -> Self {
        Self { tuning, view_mode, drag: DragState::Idle, suppress_click: false }
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Cursor affordance for the current view mode.
    #[must_use]
    pub fn idle_cursor(&self) -> Action {
        match self.view_mode {
            ViewMode::Default => Action::cursor(Some(CURSOR_GRAB)),
            ViewMode::Image => Action::cursor(None),
        }
    }

    /// Wheel input. `Some` carries the new `scrollLeft`; the host must then
    /// cancel the event's default vertical scroll.
    #[must_use]
    pub fn on_wheel(&self, delta_y: f64, scroll_left: f64) -> Option<Action> {
        if delta_y.abs() < f64::EPSILON || self.view_mode == ViewMode::Image {
            return None;
        }
        Some(Action::SetScrollLeft(scroll_left + delta_y * self.tuning.speed))
    }

    /// Mouse button pressed at container-relative `x`.
    pub fn on_press(&mut self, x: f64, scroll_left: f64) -> Vec<Action> {
        if self.view_mode == ViewMode::Image {
            return Vec::new();
        }
        self.drag = DragState::Dragging { anchor_x: x, start_offset: scroll_left };
        self.suppress_click = false;
        vec![Action::cursor(Some(CURSOR_GRABBING)), Action::user_select(Some("none"))]
    }

    /// Pointer moved. `Some` carries the new `scrollLeft`; the host cancels
    /// the event's default.
    #[must_use]
    pub fn on_move(&self, x: f64) -> Option<Action> {
        let DragState::Dragging { anchor_x, start_offset } = self.drag else {
            return None;
        };
        let walk = (x - anchor_x) * self.tuning.drag_multiplier;
        Some(Action::SetScrollLeft(start_offset - walk))
    }

    /// Mouse button released at `x`. `None` when no drag was in progress.
    pub fn on_release(&mut self, x: f64) -> Option<(Gesture, Vec<Action>)> {
        let DragState::Dragging { anchor_x, .. } = self.drag else {
            return None;
        };
        let distance = (x - anchor_x).abs();
        let gesture = if distance < self.tuning.drag_threshold_px { Gesture::Click } else { Gesture::Drag };
        self.suppress_click = gesture == Gesture::Drag;
        log::debug!("drag released after {distance}px: {gesture:?}");
        Some((gesture, self.finish_drag()))
    }

    /// Pointer left the container. Ends a drag early without suppressing
    /// any click.
    pub fn on_leave(&mut self) -> Vec<Action> {
        if self.drag == DragState::Idle {
            return Vec::new();
        }
        self.finish_drag()
    }

    /// Called from the capture-phase click handler. Returns `true` exactly
    /// once after a drag, meaning the click must be cancelled.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }

    /// View mode changed elsewhere on the page.
    pub fn on_view_mode(&mut self, mode: ViewMode) -> Vec<Action> {
        if mode == self.view_mode {
            return Vec::new();
        }
        self.view_mode = mode;
        let mut actions = Vec::new();
        if self.drag != DragState::Idle {
            self.drag = DragState::Idle;
            actions.push(Action::user_select(None));
        }
        match mode {
            ViewMode::Image => log::info!("image view: horizontal scroll disabled"),
            ViewMode::Default => log::info!("default view: horizontal scroll enabled"),
        }
        actions.push(self.idle_cursor());
        actions
    }

    /// Arrow-key scrolling. `None` when the key is not an arrow, the list is
    /// in image mode, or the user is typing.
    #[must_use]
    pub fn on_arrow_key(&self, key: &str, focus: Focus) -> Option<Action> {
        if focus == Focus::TextEntry || self.view_mode == ViewMode::Image {
            return None;
        }
        let direction = arrow_direction(key)?;
        Some(Action::ScrollBy(direction * self.tuning.keyboard_step_px))
    }

    fn finish_drag(&mut self) -> Vec<Action> {
        self.drag = DragState::Idle;
        vec![self.idle_cursor(), Action::user_select(None)]
    }
}
