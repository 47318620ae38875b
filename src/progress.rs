//! Reading-progress readout and the per-frame coalescing gate.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use std::cell::Cell;

use crate::action::{Action, Target};

/// Percentage of the scrollable page height already scrolled past, 0..=100.
///
/// Pages no taller than the viewport report 0. Non-finite inputs report 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scroll_progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> u8 {
    let scrollable = document_height - viewport_height;
    if !(scrollable > 0.0 && scrollable.is_finite() && scroll_top.is_finite()) {
        return 0;
    }
    // Clamped to 0..=100 above, so the cast is exact.
    (scroll_top / scrollable * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Text shown in the readout element.
#[must_use]
pub fn format_progress(percent: u8) -> String {
    format!("{percent}%")
}

/// Action that renders the readout for the given scroll metrics.
#[must_use]
pub fn readout(scroll_top: f64, document_height: f64, viewport_height: f64) -> Action {
    let percent = scroll_progress(scroll_top, document_height, viewport_height);
    Action::SetText { target: Target::ProgressText, text: format_progress(percent) }
}

/// Guard flag allowing at most one pending frame callback.
///
/// A scroll handler calls [`FrameGate::try_schedule`]; only when it returns
/// `true` does the handler request an animation frame. The frame callback
/// calls [`FrameGate::complete`] after doing its work.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the pending slot. Returns `false` if a frame is already queued.
    pub fn try_schedule(&self) -> bool {
        if self.pending.get() {
            return false;
        }
        self.pending.set(true);
        true
    }

    /// Release the slot once the queued frame has run (or failed to queue).
    pub fn complete(&self) {
        self.pending.set(false);
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}
