//! Shared constants: storage keys, DOM attribute names, and tuning values.

// ── Storage keys ────────────────────────────────────────────────

/// `localStorage` key for the reader font size.
pub const KEY_FONT_SIZE: &str = "blog-font-size";

/// `localStorage` key for the reader theme.
pub const KEY_THEME: &str = "blog-theme";

/// `localStorage` key for the post-list view mode.
pub const KEY_VIEW_MODE: &str = "blog-view-mode";

/// `localStorage` key for the shell's 3-state theme choice.
pub const KEY_SHELL_THEME: &str = "theme";

// ── DOM attributes and classes ──────────────────────────────────

pub const ATTR_FONT_SIZE: &str = "data-font-size";
pub const ATTR_THEME: &str = "data-theme";
pub const ATTR_VIEW: &str = "data-view";

/// Class marking the button that matches the current preference.
pub const CLASS_ACTIVE: &str = "active";

/// Class toggled on `<html>` by the shell theme toggle.
pub const CLASS_DARK: &str = "dark";

/// Class that hides an icon in the shell header.
pub const CLASS_HIDDEN: &str = "hidden";

// ── Horizontal scroll ───────────────────────────────────────────

/// Multiplier applied to wheel `deltaY` before it becomes horizontal offset.
pub const SCROLL_SPEED: f64 = 1.5;

/// Pointer travel in pixels below which a press/release counts as a click.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Amplification of pointer travel while dragging.
pub const DRAG_MULTIPLIER: f64 = 2.0;

/// Viewports at or below this width count as mobile when touch is present.
pub const MOBILE_MAX_WIDTH_PX: f64 = 768.0;

/// Distance scrolled per arrow key press.
pub const KEYBOARD_SCROLL_STEP_PX: f64 = 300.0;

/// User-agent fragments (lowercase) that mark a mobile device.
pub const MOBILE_UA_KEYWORDS: &[&str] = &["mobile", "android", "iphone", "ipad", "ipod"];

// ── Cursors ─────────────────────────────────────────────────────

pub const CURSOR_GRAB: &str = "grab";
pub const CURSOR_GRABBING: &str = "grabbing";
