#![allow(clippy::float_cmp)]

use super::*;
use crate::action::Target;

const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";
const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";

fn signals(user_agent: &str, has_touch: bool, viewport_width: f64) -> MobileSignals {
    MobileSignals { user_agent: user_agent.into(), has_touch, viewport_width }
}

fn core() -> ScrollCore {
    ScrollCore::new(ScrollTuning::default(), ViewMode::Default)
}

fn scroll_left(action: Option<Action>) -> f64 {
    match action {
        Some(Action::SetScrollLeft(v)) => v,
        other => panic!("expected SetScrollLeft, got {other:?}"),
    }
}

// =============================================================
// Mobile gating
// =============================================================

#[test]
fn desktop_without_touch_is_not_mobile() {
    assert!(!signals(DESKTOP_UA, false, 1440.0).is_mobile(768.0));
}

#[test]
fn mobile_user_agent_is_mobile_at_any_width() {
    assert!(signals(IPHONE_UA, false, 1440.0).is_mobile(768.0));
    assert!(signals("Mozilla/5.0 (Linux; Android 14)", false, 2000.0).is_mobile(768.0));
}

#[test]
fn user_agent_match_is_case_insensitive() {
    assert!(signals("SOMETHING IPAD SOMETHING", false, 1024.0).is_mobile(768.0));
}

#[test]
fn small_touch_screen_is_mobile() {
    assert!(signals(DESKTOP_UA, true, 768.0).is_mobile(768.0));
    assert!(signals(DESKTOP_UA, true, 390.0).is_mobile(768.0));
}

#[test]
fn large_touch_screen_is_not_mobile() {
    assert!(!signals(DESKTOP_UA, true, 769.0).is_mobile(768.0));
}

#[test]
fn small_screen_without_touch_is_not_mobile() {
    assert!(!signals(DESKTOP_UA, false, 500.0).is_mobile(768.0));
}

#[test]
fn should_activate_requires_post_list_and_desktop() {
    let desktop = signals(DESKTOP_UA, false, 1440.0);
    assert!(should_activate(true, &desktop, 768.0));
    assert!(!should_activate(false, &desktop, 768.0));
    assert!(!should_activate(true, &signals(DESKTOP_UA, true, 700.0), 768.0));
    assert!(!should_activate(true, &signals(IPHONE_UA, false, 1440.0), 768.0));
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_scrolls_horizontally_at_one_and_a_half_speed() {
    assert_eq!(scroll_left(core().on_wheel(100.0, 40.0)), 190.0);
    assert_eq!(scroll_left(core().on_wheel(-20.0, 40.0)), 10.0);
}

#[test]
fn wheel_ignores_zero_delta() {
    assert_eq!(core().on_wheel(0.0, 40.0), None);
}

#[test]
fn wheel_ignored_in_image_mode() {
    let core = ScrollCore::new(ScrollTuning::default(), ViewMode::Image);
    assert_eq!(core.on_wheel(100.0, 0.0), None);
}

#[test]
fn wheel_uses_configured_speed() {
    let tuning = ScrollTuning { speed: 3.0, ..ScrollTuning::default() };
    let core = ScrollCore::new(tuning, ViewMode::Default);
    assert_eq!(scroll_left(core.on_wheel(10.0, 0.0)), 30.0);
}

// =============================================================
// Drag state machine
// =============================================================

#[test]
fn press_enters_dragging_and_grabs() {
    let mut core = core();
    let actions = core.on_press(100.0, 250.0);
    assert_eq!(core.drag_state(), DragState::Dragging { anchor_x: 100.0, start_offset: 250.0 });
    assert_eq!(actions, vec![Action::cursor(Some("grabbing")), Action::user_select(Some("none"))]);
}

#[test]
fn move_while_idle_is_ignored() {
    assert_eq!(core().on_move(50.0), None);
}

#[test]
fn move_scrolls_opposite_to_pointer_at_double_speed() {
    let mut core = core();
    core.on_press(100.0, 250.0);
    assert_eq!(scroll_left(core.on_move(130.0)), 190.0);
    assert_eq!(scroll_left(core.on_move(80.0)), 290.0);
}

#[test]
fn short_release_is_a_click() {
    let mut core = core();
    core.on_press(100.0, 0.0);
    let (gesture, actions) = core.on_release(103.0).unwrap();
    assert_eq!(gesture, Gesture::Click);
    assert!(!core.take_click_suppression());
    assert_eq!(core.drag_state(), DragState::Idle);
    assert_eq!(actions, vec![Action::cursor(Some("grab")), Action::user_select(None)]);
}

#[test]
fn long_release_is_a_drag_and_suppresses_one_click() {
    let mut core = core();
    core.on_press(100.0, 0.0);
    let (gesture, _) = core.on_release(80.0).unwrap();
    assert_eq!(gesture, Gesture::Drag);
    assert!(core.take_click_suppression());
    assert!(!core.take_click_suppression());
}

#[test]
fn threshold_boundary_counts_as_drag() {
    let mut core = core();
    core.on_press(0.0, 0.0);
    assert_eq!(core.on_release(5.0).map(|(g, _)| g), Some(Gesture::Drag));
}

#[test]
fn release_while_idle_is_ignored() {
    assert!(core().on_release(10.0).is_none());
}

#[test]
fn leave_mid_drag_returns_to_idle_without_suppression() {
    let mut core = core();
    core.on_press(0.0, 0.0);
    core.on_move(200.0);
    let actions = core.on_leave();
    assert_eq!(core.drag_state(), DragState::Idle);
    assert_eq!(actions, vec![Action::cursor(Some("grab")), Action::user_select(None)]);
    assert!(!core.take_click_suppression());
}

#[test]
fn leave_while_idle_is_noop() {
    assert!(core().on_leave().is_empty());
}

#[test]
fn new_press_clears_stale_suppression() {
    let mut core = core();
    core.on_press(0.0, 0.0);
    core.on_release(50.0);
    core.on_press(0.0, 0.0);
    core.on_release(1.0);
    assert!(!core.take_click_suppression());
}

#[test]
fn press_ignored_in_image_mode() {
    let mut core = ScrollCore::new(ScrollTuning::default(), ViewMode::Image);
    assert!(core.on_press(10.0, 0.0).is_empty());
    assert_eq!(core.drag_state(), DragState::Idle);
}

// =============================================================
// View mode reactivity
// =============================================================

#[test]
fn idle_cursor_follows_view_mode() {
    assert_eq!(core().idle_cursor(), Action::cursor(Some("grab")));
    let image = ScrollCore::new(ScrollTuning::default(), ViewMode::Image);
    assert_eq!(image.idle_cursor(), Action::SetStyle { target: Target::PostList, property: "cursor", value: None });
}

#[test]
fn switching_to_image_removes_grab_cursor() {
    let mut core = core();
    assert_eq!(core.on_view_mode(ViewMode::Image), vec![Action::cursor(None)]);
    assert_eq!(core.view_mode(), ViewMode::Image);
}

#[test]
fn switching_back_restores_grab_cursor() {
    let mut core = ScrollCore::new(ScrollTuning::default(), ViewMode::Image);
    assert_eq!(core.on_view_mode(ViewMode::Default), vec![Action::cursor(Some("grab"))]);
}

#[test]
fn same_view_mode_is_noop() {
    assert!(core().on_view_mode(ViewMode::Default).is_empty());
}

#[test]
fn switching_mid_drag_cancels_drag() {
    let mut core = core();
    core.on_press(0.0, 0.0);
    let actions = core.on_view_mode(ViewMode::Image);
    assert_eq!(core.drag_state(), DragState::Idle);
    assert_eq!(actions, vec![Action::user_select(None), Action::cursor(None)]);
}

// =============================================================
// Arrow keys
// =============================================================

#[test]
fn arrows_scroll_by_configured_step() {
    assert_eq!(core().on_arrow_key("ArrowRight", Focus::Page), Some(Action::ScrollBy(300.0)));
    assert_eq!(core().on_arrow_key("ArrowLeft", Focus::Page), Some(Action::ScrollBy(-300.0)));
}

#[test]
fn arrows_ignored_while_typing_or_in_image_mode() {
    assert_eq!(core().on_arrow_key("ArrowRight", Focus::TextEntry), None);
    let image = ScrollCore::new(ScrollTuning::default(), ViewMode::Image);
    assert_eq!(image.on_arrow_key("ArrowRight", Focus::Page), None);
}

#[test]
fn other_keys_ignored() {
    assert_eq!(core().on_arrow_key("Enter", Focus::Page), None);
}
