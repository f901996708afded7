use glam::Vec3;

// Construction defaults (see `CandleOptions::default`).
pub const DEFAULT_FLAME_SIZE: f32 = 1.0;
pub const DEFAULT_RECOVERY_SPEED: f32 = 0.02; // blow strength units per tick
pub const DEFAULT_LIGHT_INTENSITY: f32 = 2.0;
pub const DEFAULT_LIGHT_DISTANCE: f32 = 10.0;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 5.0;
pub const DEFAULT_CAMERA_HEIGHT: f32 = 2.0;
pub const DEFAULT_BLOW_STRENGTH: f32 = 0.0;

// Target blow strength at or above which the flame goes out.
pub const EXTINGUISH_THRESHOLD: f32 = 1.0;

// Guards against degenerate runtime values.
pub const MIN_RECOVERY_SPEED: f32 = 1e-4;
pub const MIN_FLAME_SIZE: f32 = 0.01;
pub const MIN_LIGHT_DISTANCE: f32 = 0.01;

pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.8, 0.0];

// Procedural flame shape. Must stay in sync with `shaders/candle.wgsl`.
pub const FLAME_RADIUS: f32 = 0.15;
pub const FLICKER_TIME_FREQ: f32 = 5.0;
pub const FLICKER_SPATIAL_FREQ: f32 = 10.0;
pub const FLICKER_AMPLITUDE: f32 = 0.1;
pub const BOB_TIME_FREQ: f32 = 3.0;
pub const BOB_AMPLITUDE: f32 = 0.05;
pub const FLAME_STRETCH_Y: f32 = 1.5;

#[inline]
pub fn default_gravity_vec3() -> Vec3 {
    Vec3::from_array(DEFAULT_GRAVITY)
}
