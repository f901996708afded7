// Scene layout and interaction tuning for the web frontend.

// Candle geometry (world units)
pub const CANDLE_RADIUS: f32 = 0.5;
pub const CANDLE_HEIGHT: f32 = 2.0;
pub const CANDLE_CENTER_Y: f32 = 0.0;
pub const CANDLE_SEGMENTS: u32 = 32;
pub const WICK_RADIUS: f32 = 0.02;
pub const WICK_HEIGHT: f32 = 0.3;
pub const WICK_CENTER_Y: f32 = 1.15;
pub const WICK_SEGMENTS: u32 = 8;
pub const FLAME_CENTER_Y: f32 = 1.3;
pub const FLAME_SEGMENTS: u32 = 64;
pub const FLOOR_SIZE: f32 = 10.0;
pub const FLOOR_Y: f32 = -1.0;

// Point light sitting just above the wick
pub const LIGHT_POSITION: [f32; 3] = [0.0, 1.5, 0.0];
pub const LIGHT_COLOR: [f32; 3] = [1.0, 0.565, 0.0]; // 0xff9000

// Surface colors (linear)
pub const CANDLE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const WICK_COLOR: [f32; 3] = [0.29, 0.29, 0.29];
pub const FLOOR_COLOR: [f32; 3] = [0.5, 0.5, 0.5];
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_TARGET: [f32; 3] = [0.0, 1.0, 0.0];
pub const CAMERA_PITCH_DEG: f32 = 20.0; // extra downward tilt after look-at

// Pointer interaction
pub const DRAG_THRESHOLD_PX: f32 = 5.0; // movement before a press becomes a drag
pub const ORBIT_RADIANS_PER_PX: f32 = 0.01;

// Device tilt -> gravity bias
pub const TILT_BETA_RANGE_DEG: f32 = 180.0;
pub const TILT_GAMMA_RANGE_DEG: f32 = 90.0;

// Flame clock advance per real second (0.01 per frame at 60 Hz)
pub const FLAME_CLOCK_RATE: f32 = 0.6;

// Blow button gesture
pub const BLOW_MAX_RAMP_SEC: f32 = 2.0; // ramp length at blow speed 0
pub const BLOW_INSTANT_SPEED: f32 = 0.9; // at or above this speed, no ramp
pub const BLOW_RELEASE_STEP_SEC: f32 = 0.05;
pub const DEFAULT_MAX_BLOW: f32 = 1.0;
pub const DEFAULT_BLOW_SPEED: f32 = 0.5;

// Frame delta clamp so a backgrounded tab does not jump the flame clock
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
