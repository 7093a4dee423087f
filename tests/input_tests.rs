// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn short_press_is_a_click() {
    let mut t = DragTracker::default();
    assert!(!t.is_pressed());
    assert_eq!(t.release(), None);

    t.press(Vec2::new(100.0, 100.0));
    assert!(t.is_pressed());
    let d = t.move_to(Vec2::new(102.0, 101.0)).expect("delta while pressed");
    assert_eq!(d, Vec2::new(2.0, 1.0));
    assert_eq!(t.release(), Some(Release::Click));
    assert!(!t.is_pressed());
}

#[test]
fn travelled_press_is_a_drag_even_if_it_returns() {
    let mut t = DragTracker::default();
    t.press(Vec2::ZERO);
    t.move_to(Vec2::new(30.0, 0.0));
    t.move_to(Vec2::new(0.0, 0.0));
    assert_eq!(t.release(), Some(Release::Drag));
}

#[test]
fn deltas_are_relative_to_previous_move() {
    let mut t = DragTracker::default();
    assert_eq!(t.move_to(Vec2::new(5.0, 5.0)), None);
    t.press(Vec2::new(10.0, 10.0));
    assert_eq!(t.move_to(Vec2::new(20.0, 10.0)), Some(Vec2::new(10.0, 0.0)));
    assert_eq!(t.move_to(Vec2::new(25.0, 4.0)), Some(Vec2::new(5.0, -6.0)));
}

#[test]
fn cancel_forgets_the_press() {
    let mut t = DragTracker::default();
    t.press(Vec2::ZERO);
    t.move_to(Vec2::new(50.0, 0.0));
    t.cancel();
    assert_eq!(t.release(), None);

    // a new press starts clean
    t.press(Vec2::ZERO);
    assert_eq!(t.release(), Some(Release::Click));
}

#[test]
fn wheel_focus_unless_ctrl() {
    assert_eq!(wheel_action(40.0, false), WheelAction::Focus(40.0));
    assert_eq!(wheel_action(-3.0, true), WheelAction::Dolly(-3.0));
}

#[test]
fn wheel_delta_modes_scale_to_pixels() {
    assert_eq!(wheel_delta_px(12.0, 0), 12.0);
    assert_eq!(wheel_delta_px(3.0, 1), 3.0 * constants::WHEEL_LINE_PX);
    assert_eq!(wheel_delta_px(-1.0, 2), -constants::WHEEL_PAGE_PX);
}

#[test]
fn viewport_uv_normalizes_client_position() {
    assert_eq!(
        viewport_uv(Vec2::new(200.0, 150.0), Vec2::new(800.0, 600.0)),
        Some([0.25, 0.25])
    );
    assert_eq!(viewport_uv(Vec2::ZERO, Vec2::new(0.0, 600.0)), None);
}
