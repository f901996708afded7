// Host-side tests for the press-and-hold blow gesture.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod blow {
    include!("../src/blow.rs");
}

use blow::*;
use flame_core::{CandleOptions, ChangeNotifier, FlameDynamics};
use std::rc::Rc;

#[test]
fn ease_in_quad_curve() {
    assert_eq!(ease_in_quad(0.0), 0.0);
    assert_eq!(ease_in_quad(0.5), 0.25);
    assert_eq!(ease_in_quad(1.0), 1.0);
}

#[test]
fn held_button_eases_toward_max() {
    let mut g = BlowGesture::default();
    g.press();
    assert_eq!(g.phase(), BlowPhase::Rising);
    // speed 0.5 -> one second ramp
    assert_eq!(
        g.update(0.5, 1.0, 0.5, 0.02),
        Some(BlowCommand::SetStrength(0.25))
    );
    assert_eq!(
        g.update(0.5, 1.0, 0.5, 0.02),
        Some(BlowCommand::SetStrength(1.0))
    );
    assert_eq!(g.phase(), BlowPhase::Holding);
    assert_eq!(g.update(0.5, 1.0, 0.5, 0.02), None);
}

#[test]
fn fast_speed_jumps_to_max() {
    let mut g = BlowGesture::default();
    g.press();
    assert_eq!(
        g.update(0.016, 0.7, 0.95, 0.02),
        Some(BlowCommand::SetStrength(0.7))
    );
    assert_eq!(g.phase(), BlowPhase::Holding);
}

#[test]
fn zero_max_holds_without_commands() {
    let mut g = BlowGesture::default();
    g.press();
    assert_eq!(g.update(0.1, 0.0, 0.5, 0.02), None);
    assert_eq!(g.phase(), BlowPhase::Holding);
}

#[test]
fn repeated_press_does_not_restart_ramp() {
    let mut g = BlowGesture::default();
    g.press();
    g.update(0.5, 1.0, 0.5, 0.02);
    g.press();
    assert_eq!(g.current(), 0.25);
}

#[test]
fn max_slider_applies_only_while_held() {
    let mut g = BlowGesture::default();
    assert_eq!(g.set_max(0.6), None);
    g.press();
    assert_eq!(g.set_max(0.6), Some(BlowCommand::SetStrength(0.6)));
    assert_eq!(g.set_max(3.0), Some(BlowCommand::SetStrength(1.0)));
}

#[test]
fn release_steps_down_then_starts_recovery() {
    let mut g = BlowGesture::default();
    g.press();
    g.update(0.016, 1.0, 1.0, 0.5);
    g.release();
    assert_eq!(g.phase(), BlowPhase::Releasing);
    assert!(!g.is_held());

    // nothing until a full step has elapsed
    assert_eq!(g.update(0.0, 1.0, 1.0, 0.5), None);
    assert_eq!(
        g.update(0.05, 1.0, 1.0, 0.5),
        Some(BlowCommand::SetStrength(0.5))
    );
    assert_eq!(
        g.update(0.05, 1.0, 1.0, 0.5),
        Some(BlowCommand::SetStrength(0.0))
    );
    assert_eq!(
        g.update(0.05, 1.0, 1.0, 0.5),
        Some(BlowCommand::StartRecovery)
    );
    assert_eq!(g.phase(), BlowPhase::Idle);
}

#[test]
fn long_frame_covers_several_release_steps() {
    let mut g = BlowGesture::default();
    g.press();
    g.update(0.016, 1.0, 1.0, 0.5);
    g.release();
    assert_eq!(
        g.update(0.12, 1.0, 1.0, 0.5),
        Some(BlowCommand::SetStrength(0.0))
    );
    assert_eq!(g.phase(), BlowPhase::Releasing);
}

#[test]
fn release_without_press_is_ignored() {
    let mut g = BlowGesture::default();
    g.release();
    assert_eq!(g.phase(), BlowPhase::Idle);
    assert_eq!(g.update(1.0, 1.0, 0.5, 0.02), None);
}

#[test]
fn commands_drive_the_flame() {
    let notifier = Rc::new(ChangeNotifier::new());
    let mut candle = FlameDynamics::new(&CandleOptions::default(), notifier).unwrap();

    apply_blow_command(&mut candle, BlowCommand::SetStrength(0.4));
    assert!(candle.is_lit());
    assert_eq!(candle.target_blow_strength(), 0.4);

    apply_blow_command(&mut candle, BlowCommand::StartRecovery);
    assert_eq!(candle.target_blow_strength(), 0.0);

    apply_blow_command(&mut candle, BlowCommand::SetStrength(1.0));
    assert!(!candle.is_lit());
}
