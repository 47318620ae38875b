//! Runtime configuration.
//!
//! Every field has a default matching the blog templates, so pages normally
//! ship no config at all. A page can override fields with a JSON blob in
//! `<script type="application/json" id="blog-ui-config">`, or a host can pass
//! one to `start_with_config`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::Deserialize;

use crate::consts::{DRAG_MULTIPLIER, DRAG_THRESHOLD_PX, KEYBOARD_SCROLL_STEP_PX, MOBILE_MAX_WIDTH_PX, SCROLL_SPEED};
use crate::error::ConfigError;

/// Id of the optional inline JSON config element.
pub const CONFIG_ELEMENT_ID: &str = "blog-ui-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selectors: Selectors,
    pub shell: ShellIds,
    pub scroll: ScrollTuning,
    /// Ctrl/Meta + 1/2/3/D/L reader shortcuts.
    pub keyboard_shortcuts: bool,
    /// Arrow-key horizontal scrolling of the post list.
    pub keyboard_scroll: bool,
    /// Console log level name (`error` .. `trace`).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            shell: ShellIds::default(),
            scroll: ScrollTuning::default(),
            keyboard_shortcuts: false,
            keyboard_scroll: false,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.scroll.validate()?;
        Ok(config)
    }

    /// Parsed log level; unknown names fall back to `Info`.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}

/// CSS selectors for the reader regions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub post_list: String,
    pub progress_text: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self { post_list: ".post-list".to_owned(), progress_text: ".scroll-progress-text".to_owned() }
    }
}

/// Element ids used by the shell header and drawer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellIds {
    pub theme_toggle: String,
    pub icon_system: String,
    pub icon_light: String,
    pub icon_dark: String,
    pub drawer_open: String,
    pub drawer_close: String,
    pub drawer_overlay: String,
    pub drawer: String,
}

impl Default for ShellIds {
    fn default() -> Self {
        Self {
            theme_toggle: "theme-toggle".to_owned(),
            icon_system: "icon-system".to_owned(),
            icon_light: "icon-light".to_owned(),
            icon_dark: "icon-dark".to_owned(),
            drawer_open: "drawer-open".to_owned(),
            drawer_close: "drawer-close".to_owned(),
            drawer_overlay: "drawer-overlay".to_owned(),
            drawer: "mobile-drawer".to_owned(),
        }
    }
}

/// Horizontal scroll tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    /// Wheel `deltaY` multiplier.
    pub speed: f64,
    /// Press/release travel below which the gesture is a click.
    pub drag_threshold_px: f64,
    /// Pointer travel amplification while dragging.
    pub drag_multiplier: f64,
    /// Touch devices at or below this width are treated as mobile.
    pub mobile_max_width_px: f64,
    /// Arrow-key scroll distance.
    pub keyboard_step_px: f64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            speed: SCROLL_SPEED,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            drag_multiplier: DRAG_MULTIPLIER,
            mobile_max_width_px: MOBILE_MAX_WIDTH_PX,
            keyboard_step_px: KEYBOARD_SCROLL_STEP_PX,
        }
    }
}

impl ScrollTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("scroll.speed", self.speed),
            ("scroll.drag_threshold_px", self.drag_threshold_px),
            ("scroll.drag_multiplier", self.drag_multiplier),
            ("scroll.mobile_max_width_px", self.mobile_max_width_px),
            ("scroll.keyboard_step_px", self.keyboard_step_px),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}
