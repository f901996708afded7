use crate::constants::*;
use glam::{Vec2, Vec3};

/// Distinguishes click from drag for a single pointer.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerTracker {
    pub down: bool,
    pub dragging: bool,
    pub last: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerRelease {
    Click(Vec2),
    DragEnd,
    Ignored,
}

impl PointerTracker {
    pub fn press(&mut self, pos: Vec2) {
        self.down = true;
        self.dragging = false;
        self.last = pos;
    }

    /// Returns the horizontal delta to orbit by once the press became a drag.
    pub fn move_to(&mut self, pos: Vec2) -> Option<f32> {
        if !self.down {
            return None;
        }
        let delta = pos - self.last;
        if !self.dragging
            && (delta.x.abs() > DRAG_THRESHOLD_PX || delta.y.abs() > DRAG_THRESHOLD_PX)
        {
            self.dragging = true;
        }
        if !self.dragging {
            return None;
        }
        self.last = pos;
        Some(delta.x)
    }

    pub fn release(&mut self, pos: Vec2) -> PointerRelease {
        let result = match (self.down, self.dragging) {
            (false, _) => PointerRelease::Ignored,
            (true, true) => PointerRelease::DragEnd,
            (true, false) => PointerRelease::Click(pos),
        };
        self.down = false;
        self.dragging = false;
        result
    }

    /// Pointer left the element: end any drag without producing a click.
    pub fn cancel(&mut self) {
        self.down = false;
        self.dragging = false;
    }
}

/// Nearest non-negative hit distance of a ray against a capped cylinder
/// aligned with the Y axis.
pub fn ray_cylinder(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
    height: f32,
) -> Option<f32> {
    let half = height * 0.5;
    let o = ray_origin - center;
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.map_or(true, |b| t < b) {
            best = Some(t);
        }
    };

    // side wall
    let a = ray_dir.x * ray_dir.x + ray_dir.z * ray_dir.z;
    if a > 1e-8 {
        let b = o.x * ray_dir.x + o.z * ray_dir.z;
        let c = o.x * o.x + o.z * o.z - radius * radius;
        let disc = b * b - a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for t in [(-b - sq) / a, (-b + sq) / a] {
                let y = o.y + ray_dir.y * t;
                if y.abs() <= half {
                    consider(t);
                }
            }
        }
    }

    // caps
    if ray_dir.y.abs() > 1e-8 {
        for cap_y in [-half, half] {
            let t = (cap_y - o.y) / ray_dir.y;
            let x = o.x + ray_dir.x * t;
            let z = o.z + ray_dir.z * t;
            if x * x + z * z <= radius * radius {
                consider(t);
            }
        }
    }
    best
}

/// Hit test against the candle body and the wick.
pub fn pick_candle(ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
    let body = ray_cylinder(
        ray_origin,
        ray_dir,
        Vec3::new(0.0, CANDLE_CENTER_Y, 0.0),
        CANDLE_RADIUS,
        CANDLE_HEIGHT,
    );
    let wick = ray_cylinder(
        ray_origin,
        ray_dir,
        Vec3::new(0.0, WICK_CENTER_Y, 0.0),
        WICK_RADIUS,
        WICK_HEIGHT,
    );
    match (body, wick) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Map device orientation angles (degrees) to the flame's gravity bias.
///
/// Front/back tilt (`beta`) leans the flame along Z, left/right tilt
/// (`gamma`) along X. Missing readings count as level.
pub fn gravity_from_orientation(beta: Option<f64>, gamma: Option<f64>, down: f32) -> Vec3 {
    let z = beta.map_or(0.0, |b| b as f32 / TILT_BETA_RANGE_DEG);
    let x = gamma.map_or(0.0, |g| g as f32 / TILT_GAMMA_RANGE_DEG);
    Vec3::new(x, down, z)
}
