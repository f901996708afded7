//! Flame animation engine.
//!
//! `FlameDynamics` owns the candle state and advances it once per animation
//! tick. The blow strength ramps linearly toward the requested target by at
//! most `recovery_speed` per tick; the scene adapter reads the derived scale,
//! light intensity and bend parameters from the value returned by
//! [`FlameDynamics::tick`].

use crate::constants::*;
use crate::notifier::{ChangeNotifier, CANDLE_STATE_CHANGED};
use crate::options::{CandleOptions, ConfigError};
use glam::Vec3;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlamePhase {
    Lit,
    Extinguished,
}

/// Internal state of the candle. Only `FlameDynamics` mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct FlameState {
    pub is_lit: bool,
    pub blow_strength: f32,
    pub target_blow_strength: f32,
    pub recovery_speed: f32,
    pub flame_size: f32,
    pub base_light_intensity: f32,
    pub light_distance: f32,
    pub gravity: Vec3,
    pub elapsed_time: f32,
}

/// Publicly observable subset of the state, broadcast on every change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandleSnapshot {
    pub is_lit: bool,
    pub blow_strength: f32,
    pub flame_size: f32,
    pub light_intensity: f32,
}

/// Scalars consumed by the flame vertex shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BendParams {
    pub elapsed_time: f32,
    pub blow_strength: f32,
    pub gravity: Vec3,
    pub flame_size: f32,
}

/// Per-tick outputs handed to the scene adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlameOutputs {
    pub scale: f32,
    pub light_intensity: f32,
    pub light_distance: f32,
    pub visible: bool,
    pub bend: BendParams,
}

pub struct FlameDynamics {
    state: FlameState,
    extinguish_threshold: f32,
    notifier: Rc<ChangeNotifier<CandleSnapshot>>,
}

impl FlameDynamics {
    pub fn new(
        options: &CandleOptions,
        notifier: Rc<ChangeNotifier<CandleSnapshot>>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let mut state = FlameState {
            is_lit: true,
            blow_strength: options.blow_strength,
            target_blow_strength: 0.0,
            recovery_speed: options.recovery_speed,
            flame_size: options.flame_size,
            base_light_intensity: options.light_intensity,
            light_distance: options.light_distance,
            gravity: default_gravity_vec3(),
            elapsed_time: 0.0,
        };
        if state.blow_strength >= options.extinguish_threshold {
            state.is_lit = false;
            state.blow_strength = 1.0;
            state.target_blow_strength = 1.0;
        }
        Ok(Self {
            state,
            extinguish_threshold: options.extinguish_threshold,
            notifier,
        })
    }

    pub fn set_blow_strength(&mut self, strength: f32) {
        let target = if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, 1.0)
        };
        self.state.target_blow_strength = target;
        if target >= self.extinguish_threshold {
            if self.state.is_lit {
                log::info!("[flame] blown out at strength {:.2}", target);
            }
            self.state.is_lit = false;
            self.state.blow_strength = 1.0;
            self.state.target_blow_strength = 1.0;
        }
        self.notify();
    }

    pub fn start_recovery(&mut self) {
        if self.state.blow_strength >= 1.0 {
            return;
        }
        let mut changed = false;
        if self.state.target_blow_strength != 0.0 {
            self.state.target_blow_strength = 0.0;
            changed = true;
        }
        if !self.state.is_lit {
            self.state.is_lit = true;
            changed = true;
            log::info!("[flame] relit by recovery");
        }
        if changed {
            self.notify();
        }
    }

    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            log::warn!("[flame] ignoring non-finite gravity ({}, {}, {})", x, y, z);
            return;
        }
        self.state.gravity = Vec3::new(x, y, z);
    }

    pub fn toggle(&mut self) {
        self.state.is_lit = !self.state.is_lit;
        if self.state.is_lit {
            self.state.blow_strength = 0.0;
            self.state.target_blow_strength = 0.0;
        }
        log::info!("[flame] toggled, lit={}", self.state.is_lit);
        self.notify();
    }

    pub fn set_recovery_speed(&mut self, speed: f32) {
        self.state.recovery_speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            log::warn!(
                "[flame] recovery speed {} would stall the ramp, using {}",
                speed,
                MIN_RECOVERY_SPEED
            );
            MIN_RECOVERY_SPEED
        };
    }

    pub fn set_flame_size(&mut self, size: f32) {
        self.state.flame_size = if size.is_finite() && size >= MIN_FLAME_SIZE {
            size
        } else {
            log::warn!("[flame] flame size {} clamped to {}", size, MIN_FLAME_SIZE);
            MIN_FLAME_SIZE
        };
        self.notify();
    }

    pub fn set_light_intensity(&mut self, intensity: f32) {
        self.state.base_light_intensity = if intensity.is_finite() {
            intensity.max(0.0)
        } else {
            log::warn!("[flame] ignoring non-finite light intensity");
            self.state.base_light_intensity
        };
        self.notify();
    }

    pub fn set_light_distance(&mut self, distance: f32) {
        self.state.light_distance = if distance.is_finite() && distance >= MIN_LIGHT_DISTANCE {
            distance
        } else {
            log::warn!("[flame] light distance {} clamped to {}", distance, MIN_LIGHT_DISTANCE);
            MIN_LIGHT_DISTANCE
        };
        self.notify();
    }

    /// Advance the animation clock and ramp the blow strength one step.
    pub fn tick(&mut self, delta_clock: f32) -> FlameOutputs {
        if delta_clock.is_finite() && delta_clock > 0.0 {
            self.state.elapsed_time += delta_clock;
        }
        if self.state.is_lit {
            let before = self.state.blow_strength;
            let target = self.state.target_blow_strength;
            let step = self.state.recovery_speed;
            if before > target {
                self.state.blow_strength = (before - step).max(target);
            } else if before < target {
                self.state.blow_strength = (before + step).min(target);
            }
            if self.state.blow_strength != before {
                self.notify();
            }
        }
        self.outputs()
    }

    pub fn outputs(&self) -> FlameOutputs {
        FlameOutputs {
            scale: self.scale(),
            light_intensity: self.light_intensity(),
            light_distance: self.state.light_distance,
            visible: self.state.is_lit,
            bend: BendParams {
                elapsed_time: self.state.elapsed_time,
                blow_strength: self.state.blow_strength,
                gravity: self.state.gravity,
                flame_size: self.state.flame_size,
            },
        }
    }

    pub fn snapshot(&self) -> CandleSnapshot {
        CandleSnapshot {
            is_lit: self.state.is_lit,
            blow_strength: self.state.blow_strength,
            flame_size: self.state.flame_size,
            light_intensity: self.light_intensity(),
        }
    }

    pub fn state(&self) -> &FlameState {
        &self.state
    }

    pub fn phase(&self) -> FlamePhase {
        if self.state.is_lit {
            FlamePhase::Lit
        } else {
            FlamePhase::Extinguished
        }
    }

    pub fn is_lit(&self) -> bool {
        self.state.is_lit
    }

    pub fn flame_size(&self) -> f32 {
        self.state.flame_size
    }

    /// Currently displayed intensity, not the configured base.
    pub fn light_intensity(&self) -> f32 {
        if self.state.is_lit {
            self.state.base_light_intensity * self.scale()
        } else {
            0.0
        }
    }

    pub fn current_blow_strength(&self) -> f32 {
        self.state.blow_strength
    }

    pub fn target_blow_strength(&self) -> f32 {
        self.state.target_blow_strength
    }

    pub fn recovery_speed(&self) -> f32 {
        self.state.recovery_speed
    }

    pub fn light_distance(&self) -> f32 {
        self.state.light_distance
    }

    pub fn gravity(&self) -> Vec3 {
        self.state.gravity
    }

    pub fn elapsed_time(&self) -> f32 {
        self.state.elapsed_time
    }

    pub fn extinguish_threshold(&self) -> f32 {
        self.extinguish_threshold
    }

    pub fn notifier(&self) -> &Rc<ChangeNotifier<CandleSnapshot>> {
        &self.notifier
    }

    #[inline]
    fn scale(&self) -> f32 {
        1.0 - self.state.blow_strength
    }

    fn notify(&self) {
        self.notifier.emit(CANDLE_STATE_CHANGED, &self.snapshot());
    }
}

/// CPU mirror of the flame vertex displacement in `shaders/candle.wgsl`.
///
/// `position` is a vertex of the unit flame sphere (radius `FLAME_RADIUS`) in
/// object space; the result is the displaced object-space position before the
/// per-frame scale is applied.
pub fn displace_flame_vertex(position: Vec3, bend: &BendParams) -> Vec3 {
    let mut pos = position * bend.flame_size;
    let height = (pos.y + FLAME_RADIUS) / (2.0 * FLAME_RADIUS);
    let flicker = (bend.elapsed_time * FLICKER_TIME_FREQ + pos.y * FLICKER_SPATIAL_FREQ).sin()
        * FLICKER_AMPLITUDE
        * height;
    pos.x += flicker + bend.blow_strength * bend.gravity.x * height;
    pos.z += bend.blow_strength * bend.gravity.z * height;
    pos.y += (bend.elapsed_time * BOB_TIME_FREQ).sin() * BOB_AMPLITUDE * height;
    pos.y *= FLAME_STRETCH_Y;
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> FlameDynamics {
        FlameDynamics::new(&CandleOptions::default(), Rc::new(ChangeNotifier::new()))
            .expect("default options are valid")
    }

    #[test]
    fn initial_blow_strength_relaxes_toward_zero() {
        let opts = CandleOptions {
            blow_strength: 0.1,
            ..Default::default()
        };
        let mut e = FlameDynamics::new(&opts, Rc::new(ChangeNotifier::new())).unwrap();
        assert_eq!(e.target_blow_strength(), 0.0);
        for _ in 0..10 {
            e.tick(0.01);
        }
        assert_eq!(e.current_blow_strength(), 0.0);
    }

    #[test]
    fn initial_blow_at_threshold_starts_extinguished() {
        let opts = CandleOptions {
            blow_strength: 0.9,
            extinguish_threshold: 0.8,
            ..Default::default()
        };
        let e = FlameDynamics::new(&opts, Rc::new(ChangeNotifier::new())).unwrap();
        assert_eq!(e.phase(), FlamePhase::Extinguished);
        assert_eq!(e.current_blow_strength(), 1.0);
    }

    #[test]
    fn nan_blow_strength_is_treated_as_calm() {
        let mut e = engine();
        e.set_blow_strength(f32::NAN);
        assert_eq!(e.target_blow_strength(), 0.0);
        assert!(e.is_lit());
    }

    #[test]
    fn degenerate_recovery_speed_is_clamped() {
        let mut e = engine();
        e.set_recovery_speed(0.0);
        assert_eq!(e.recovery_speed(), MIN_RECOVERY_SPEED);
        e.set_recovery_speed(-3.0);
        assert_eq!(e.recovery_speed(), MIN_RECOVERY_SPEED);
        e.set_recovery_speed(0.05);
        assert_eq!(e.recovery_speed(), 0.05);
    }

    #[test]
    fn negative_delta_does_not_rewind_clock() {
        let mut e = engine();
        e.tick(0.5);
        e.tick(-1.0);
        e.tick(f32::INFINITY);
        assert_eq!(e.elapsed_time(), 0.5);
    }

    #[test]
    fn non_finite_gravity_is_ignored() {
        let mut e = engine();
        e.set_gravity(f32::NAN, 0.0, 0.0);
        assert_eq!(e.gravity(), default_gravity_vec3());
    }

    #[test]
    fn toggle_off_freezes_ramp() {
        let mut e = engine();
        e.set_blow_strength(0.5);
        e.tick(0.01);
        let frozen = e.current_blow_strength();
        e.toggle();
        for _ in 0..5 {
            e.tick(0.01);
        }
        assert_eq!(e.current_blow_strength(), frozen);
        assert_eq!(e.light_intensity(), 0.0);
    }
}
