// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::{Vec2, Vec3};
use input::*;

#[test]
fn ray_cylinder_hits_side_wall() {
    let t = ray_cylinder(
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::ZERO,
        0.5,
        2.0,
    );
    assert_eq!(t, Some(4.5));
}

#[test]
fn ray_cylinder_hits_top_cap() {
    let t = ray_cylinder(
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::ZERO,
        0.5,
        2.0,
    );
    assert_eq!(t, Some(4.0));
}

#[test]
fn ray_cylinder_misses_to_the_side_and_behind() {
    let beside = ray_cylinder(
        Vec3::new(2.0, 0.0, 5.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::ZERO,
        0.5,
        2.0,
    );
    assert!(beside.is_none());

    let away = ray_cylinder(
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::ZERO,
        0.5,
        2.0,
    );
    assert!(away.is_none());
}

#[test]
fn ray_cylinder_passes_over_short_cylinder() {
    // Passes above the top cap at y = 1.5
    let t = ray_cylinder(
        Vec3::new(0.0, 1.5, 5.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::ZERO,
        0.5,
        2.0,
    );
    assert!(t.is_none());
}

#[test]
fn ray_from_inside_reports_exit_distance() {
    let t = ray_cylinder(Vec3::ZERO, Vec3::X, Vec3::ZERO, 0.5, 2.0).unwrap();
    assert!((t - 0.5).abs() < 1e-6);
}

#[test]
fn pick_candle_hits_body_and_wick() {
    let eye = Vec3::new(0.0, 2.0, 5.0);
    let dir = (Vec3::ZERO - eye).normalize();
    assert!(pick_candle(eye, dir).is_some());

    // Above the body but level with the wick
    let t = pick_candle(Vec3::new(0.0, 1.15, 5.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
    assert!((t - (5.0 - constants::WICK_RADIUS)).abs() < 1e-3);
}

#[test]
fn pick_candle_misses_empty_space() {
    assert!(pick_candle(Vec3::new(3.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).is_none());
    assert!(pick_candle(Vec3::new(0.0, 3.0, 5.0), Vec3::new(0.0, 0.0, -1.0)).is_none());
}

#[test]
fn small_moves_stay_a_click() {
    let mut p = PointerTracker::default();
    p.press(Vec2::new(10.0, 10.0));
    assert_eq!(p.move_to(Vec2::new(13.0, 12.0)), None);
    assert_eq!(
        p.release(Vec2::new(13.0, 12.0)),
        PointerRelease::Click(Vec2::new(13.0, 12.0))
    );
}

#[test]
fn drag_reports_horizontal_deltas_and_suppresses_click() {
    let mut p = PointerTracker::default();
    p.press(Vec2::ZERO);
    assert_eq!(p.move_to(Vec2::new(10.0, 0.0)), Some(10.0));
    assert!(p.dragging);
    assert_eq!(p.move_to(Vec2::new(12.0, 40.0)), Some(2.0));
    assert_eq!(p.release(Vec2::new(12.0, 40.0)), PointerRelease::DragEnd);
    assert!(!p.down);
}

#[test]
fn moves_without_press_do_nothing() {
    let mut p = PointerTracker::default();
    assert_eq!(p.move_to(Vec2::new(100.0, 0.0)), None);
    assert_eq!(p.release(Vec2::ZERO), PointerRelease::Ignored);
}

#[test]
fn cancel_drops_pending_click() {
    let mut p = PointerTracker::default();
    p.press(Vec2::ZERO);
    p.cancel();
    assert_eq!(p.release(Vec2::ZERO), PointerRelease::Ignored);
}

#[test]
fn orientation_maps_to_gravity_bias() {
    let g = gravity_from_orientation(Some(90.0), Some(45.0), -9.8);
    assert_eq!(g, Vec3::new(0.5, -9.8, 0.5));

    let level = gravity_from_orientation(None, None, -9.8);
    assert_eq!(level, Vec3::new(0.0, -9.8, 0.0));

    let back = gravity_from_orientation(Some(-180.0), Some(-90.0), -9.8);
    assert_eq!(back, Vec3::new(-1.0, -9.8, -1.0));
}
