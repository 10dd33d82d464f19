//! Hanging lanyard badge: drag handling and band curve on top of a physics
//! capability.
//!
//! [`Band`] never touches a concrete engine. It reads joint translations,
//! drives the card kinematically while dragged, and rebuilds the band polyline
//! every frame. [`RapierWorld`] is the engine the web front-end ships with.

pub mod camera;
pub mod curve;
pub mod world;

pub use camera::{css_to_device, device_pixels, ndc_to_pixel, pixel_to_ndc, Camera};
pub use curve::CatmullRom;
pub use world::RapierWorld;

use crate::constants::*;
use crate::error::{parse_bool, parse_f64, parse_vec3, ConfigError};
use glam::{Quat, Vec2, Vec3};

/// Simulated bodies, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyId {
    Fixed,
    J1,
    J2,
    J3,
    Card,
}

impl BodyId {
    pub const COUNT: usize = 5;
    pub const ALL: [BodyId; Self::COUNT] =
        [BodyId::Fixed, BodyId::J1, BodyId::J2, BodyId::J3, BodyId::Card];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// What the band needs from a physics engine.
pub trait PhysicsWorld {
    /// Advance by `dt` seconds of wall time; the engine picks its own substeps.
    fn step(&mut self, dt: f32);
    fn joint_translation(&self, id: BodyId) -> Vec3;
    fn joint_rotation(&self, _id: BodyId) -> Quat {
        Quat::IDENTITY
    }
    /// Drive `id` to `target` ignoring forces until released.
    fn set_kinematic_target(&mut self, id: BodyId, target: Vec3);
    fn release_kinematic(&mut self, id: BodyId);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanyardConfig {
    pub position: Vec3, // camera
    pub gravity: Vec3,
    pub fov: f32, // degrees
    pub transparent: bool,
}

impl Default for LanyardConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 22.0),
            gravity: Vec3::new(0.0, -40.0, 0.0),
            fov: 22.0,
            transparent: true,
        }
    }
}

impl LanyardConfig {
    pub fn from_attributes<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = get("data-position") {
            cfg.position = Vec3::from_array(parse_vec3("data-position", &v)?);
        }
        if let Some(v) = get("data-gravity") {
            cfg.gravity = Vec3::from_array(parse_vec3("data-gravity", &v)?);
        }
        if let Some(v) = get("data-fov") {
            let fov = parse_f64("data-fov", &v)?;
            if !(1.0..=179.0).contains(&fov) {
                return Err(ConfigError::OutOfRange {
                    attr: "data-fov",
                    value: fov,
                    min: 1.0,
                    max: 179.0,
                });
            }
            cfg.fov = fov as f32;
        }
        if let Some(v) = get("data-transparent") {
            cfg.transparent = parse_bool("data-transparent", &v)?;
        }
        Ok(cfg)
    }
}

/// Editor previews serve the page from a blob URL or the preview host; the
/// badge is skipped there.
pub fn is_sandboxed_preview(href: &str, host: &str) -> bool {
    href.starts_with("blob:") || host.contains("vusercontent.net")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    Grab,
    Grabbing,
}

impl CursorHint {
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
        }
    }
}

pub struct Band<W: PhysicsWorld> {
    world: W,
    camera: Camera,
    drag_offset: Option<Vec3>,
    hovered: bool,
    lerped: [Option<Vec3>; 2], // J1, J2
    controls: [Vec3; 4],
    points: Vec<Vec3>,
}

impl Band<RapierWorld> {
    pub fn from_config(config: &LanyardConfig, aspect: f32) -> Self {
        Band::new(
            RapierWorld::new(config.gravity),
            Camera::looking_down_z(config.position, config.fov, aspect),
        )
    }
}

impl<W: PhysicsWorld> Band<W> {
    pub fn new(world: W, camera: Camera) -> Self {
        let mut band = Self {
            world,
            camera,
            drag_offset: None,
            hovered: false,
            lerped: [None, None],
            controls: [Vec3::ZERO; 4],
            points: Vec::new(),
        };
        band.rebuild_curve();
        band
    }

    #[inline]
    pub fn world(&self) -> &W {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Band polyline from the card end to the fixed anchor.
    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Curve control points of the last frame: `[J3, J2~, J1~, fixed]`.
    #[inline]
    pub fn control_points(&self) -> &[Vec3; 4] {
        &self.controls
    }

    #[inline]
    pub fn card_position(&self) -> Vec3 {
        self.world.joint_translation(BodyId::Card)
    }

    #[inline]
    pub fn card_rotation(&self) -> Quat {
        self.world.joint_rotation(BodyId::Card)
    }

    /// Card face corners in world space: top-left, top-right, bottom-left.
    pub fn card_corners(&self) -> [Vec3; 3] {
        let [hx, hy] = LANYARD_CARD_HALF_EXTENTS;
        let (c, r) = (self.card_position(), self.card_rotation());
        [
            c + r * Vec3::new(-hx, hy, 0.0),
            c + r * Vec3::new(hx, hy, 0.0),
            c + r * Vec3::new(-hx, -hy, 0.0),
        ]
    }

    /// Where the band clips onto the card.
    pub fn card_clip(&self) -> Vec3 {
        let [_, hy] = LANYARD_CARD_HALF_EXTENTS;
        self.card_position() + self.card_rotation() * Vec3::new(0.0, hy, 0.0)
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    /// Whether the pointer is over the card's face, in the card's own frame.
    pub fn hit_test(&self, pointer_ndc: Vec2) -> bool {
        let p = self.camera.pointer_world(pointer_ndc);
        let local = self.card_rotation().inverse() * (p - self.card_position());
        let [hx, hy] = LANYARD_CARD_HALF_EXTENTS;
        local.x.abs() <= hx && local.y.abs() <= hy
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn cursor_hint(&self) -> Option<CursorHint> {
        if self.is_dragging() {
            Some(CursorHint::Grabbing)
        } else if self.hovered {
            Some(CursorHint::Grab)
        } else {
            None
        }
    }

    /// Grab the card where the pointer is; the grab offset is kept for the
    /// whole drag so the card does not jump under the pointer.
    pub fn begin_drag(&mut self, pointer_ndc: Vec2) {
        let offset = self.camera.pointer_world(pointer_ndc) - self.card_position();
        self.drag_offset = Some(offset);
        log::info!("[lanyard] drag start offset=({:.2},{:.2})", offset.x, offset.y);
    }

    pub fn end_drag(&mut self) {
        if self.drag_offset.take().is_some() {
            self.world.release_kinematic(BodyId::Card);
        }
    }

    pub fn frame(&mut self, dt_sec: f32, pointer_ndc: Vec2) {
        if let Some(offset) = self.drag_offset {
            let target = self.camera.pointer_world(pointer_ndc) - offset;
            self.world.set_kinematic_target(BodyId::Card, target);
        }
        self.world.step(dt_sec);

        for (slot, id) in self.lerped.iter_mut().zip([BodyId::J1, BodyId::J2]) {
            let actual = self.world.joint_translation(id);
            let current = slot.get_or_insert(actual);
            let d = current.distance(actual).clamp(0.1, 1.0);
            let alpha = (dt_sec * (LANYARD_MIN_SPEED + d * (LANYARD_MAX_SPEED - LANYARD_MIN_SPEED)))
                .clamp(0.0, 1.0);
            *current = current.lerp(actual, alpha);
        }
        self.rebuild_curve();
    }

    fn rebuild_curve(&mut self) {
        let j1 = self.lerped[0].unwrap_or_else(|| self.world.joint_translation(BodyId::J1));
        let j2 = self.lerped[1].unwrap_or_else(|| self.world.joint_translation(BodyId::J2));
        self.controls = [
            self.world.joint_translation(BodyId::J3),
            j2,
            j1,
            self.world.joint_translation(BodyId::Fixed),
        ];
        let curve = CatmullRom::new(self.controls);
        self.points = curve.sample(LANYARD_CURVE_SEGMENTS);
    }
}
