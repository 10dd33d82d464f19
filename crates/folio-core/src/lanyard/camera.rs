//! Perspective camera for the lanyard scene.
//!
//! Kept free of platform APIs; the web renderer uses it to project the band
//! and card to canvas pixels and to turn pointer positions back into world
//! space for dragging.

use glam::{Mat4, Vec2, Vec3};

/// Right-handed camera looking down -Z from `eye`, with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn looking_down_z(eye: Vec3, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            eye,
            target: eye + Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: fov_degrees.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World point to normalized device coordinates.
    #[inline]
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    /// Normalized device coordinates back to a world point.
    #[inline]
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.view_projection().inverse().project_point3(ndc)
    }

    /// Pointer world position used for dragging: unproject at mid depth, then
    /// push along the view ray by the camera's distance from the origin.
    pub fn pointer_world(&self, pointer_ndc: Vec2) -> Vec3 {
        let near = self.unproject(pointer_ndc.extend(0.5));
        let dir = (near - self.eye).normalize_or_zero();
        near + dir * self.eye.length()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(1e-3);
    }
}

/// Canvas pixel position to NDC (y up).
#[inline]
pub fn pixel_to_ndc(px: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(px.x / size.x * 2.0 - 1.0, -(px.y / size.y) * 2.0 + 1.0)
}

/// NDC to canvas pixel position.
#[inline]
pub fn ndc_to_pixel(ndc: Vec2, size: Vec2) -> Vec2 {
    Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y)
}

/// Backing store extent for a CSS extent at the given device pixel ratio; at least 1.
#[inline]
pub fn device_pixels(css: f64, dpr: f64) -> u32 {
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    ((css * dpr) as u32).max(1)
}

/// CSS pixel offset to backing store pixels.
#[inline]
pub fn css_to_device(css: Vec2, dpr: f32) -> Vec2 {
    if dpr > 0.0 {
        css * dpr
    } else {
        css
    }
}
