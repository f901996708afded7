use crate::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Camera orbiting the candle around the vertical axis.
///
/// The eye sits on a circle of radius `distance` at `height`, looks at
/// `CAMERA_TARGET` and is then pitched down by `CAMERA_PITCH_DEG`.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub distance: f32,
    pub height: f32,
    pub rotation: f32,
    pub aspect: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, height: f32, aspect: f32) -> Self {
        Self {
            distance,
            height,
            rotation: 0.0,
            aspect,
        }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.rotation.sin() * self.distance,
            self.height,
            self.rotation.cos() * self.distance,
        )
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(CAMERA_TARGET)
    }

    /// Rotate around the candle by a horizontal pointer delta in pixels.
    pub fn orbit_by_pixels(&mut self, dx_px: f32) {
        self.rotation += dx_px * ORBIT_RADIANS_PER_PX;
    }

    pub fn set_aspect_from_size(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let look = Mat4::look_at_rh(self.eye(), self.target(), Vec3::Y);
        Mat4::from_rotation_x(CAMERA_PITCH_DEG.to_radians()) * look
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            CAMERA_FOVY_DEG.to_radians(),
            self.aspect.max(1e-3),
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        )
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray `(origin, direction)` through a point in NDC.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (p0, (p1 - p0).normalize())
    }
}

/// Convert a position in CSS pixels relative to the element to NDC.
#[inline]
pub fn css_px_to_ndc(px: Vec2, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((px.x / width) * 2.0 - 1.0, 1.0 - (px.y / height) * 2.0)
}
