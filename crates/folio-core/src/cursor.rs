//! Particle cursor trail and the spring-driven glyph that follows the pointer.
//!
//! All randomness goes through the injected `R: Rng`, so a seeded generator and
//! a fixed pointer sequence always reproduce the same particles.

use crate::constants::*;
use crate::ticker::{Animate, FrameTick};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;
use std::f32::consts::TAU;
use std::time::Duration;

/// Tags and roles that count as interactive for the hover state.
pub const INTERACTIVE_TAGS: [&str; 2] = ["button", "a"];
pub const INTERACTIVE_ROLES: [&str; 1] = ["button"];

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub hue: f32,
}

impl Particle {
    #[inline]
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.opacity() * 0.5 + 0.5
    }

    /// Advance one frame. Returns false once the particle has expired.
    #[inline]
    pub fn step(&mut self) -> bool {
        self.position += self.velocity;
        self.velocity *= PARTICLE_DAMPING;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}

/// Bounded FIFO of live particles.
#[derive(Clone, Debug)]
pub struct ParticleTrail {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl Default for ParticleTrail {
    fn default() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }
}

impl ParticleTrail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, particle: Particle) {
        if self.capacity == 0 {
            return;
        }
        while self.particles.len() >= self.capacity {
            self.particles.pop_front();
        }
        self.particles.push_back(particle);
    }

    pub fn tick(&mut self) {
        self.particles.retain_mut(Particle::step);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn newest(&self) -> Option<&Particle> {
        self.particles.back()
    }
}

/// Damped spring follower in two dimensions.
#[derive(Clone, Copy, Debug)]
pub struct Spring2 {
    pub position: Vec2,
    pub velocity: Vec2,
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Spring2 {
    pub fn new((stiffness, damping, mass): (f32, f32, f32)) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            stiffness,
            damping,
            mass: mass.max(1e-3),
        }
    }

    pub fn snap(&mut self, target: Vec2) {
        self.position = target;
        self.velocity = Vec2::ZERO;
    }

    /// Semi-implicit Euler with substeps small enough for the stiffest follower.
    /// `dt_sec` is clamped to [`CURSOR_MAX_FRAME_DT_SEC`].
    pub fn step(&mut self, target: Vec2, dt_sec: f32) {
        if dt_sec.is_nan() || dt_sec <= 0.0 {
            return;
        }
        let dt_sec = dt_sec.min(CURSOR_MAX_FRAME_DT_SEC);
        let substeps = (dt_sec / SPRING_MAX_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt_sec / substeps as f32;
        for _ in 0..substeps {
            let force = -self.stiffness * (self.position - target) - self.damping * self.velocity;
            self.velocity += force / self.mass * h;
            self.position += self.velocity * h;
        }
    }
}

/// Decorations drawn around the glyph centre at a given elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPose {
    pub ring_rotation: f32, // radians
    pub pulse_scale: f32,
    pub pulse_opacity: f32,
    pub orbit: [Vec2; 3], // offsets from the glyph centre
}

impl GlyphPose {
    pub fn at(elapsed: Duration) -> Self {
        let t = elapsed.as_secs_f32();
        let ring_rotation = (t / RING_ROTATION_PERIOD_SEC).fract() * TAU;
        // keyframes 1 -> peak -> 1 eased in and out
        let pulse = 0.5 - 0.5 * ((t / RING_PULSE_PERIOD_SEC).fract() * TAU).cos();
        let orbit_turn = (t / ORBIT_PERIOD_SEC).fract() * TAU;
        let mut orbit = [Vec2::ZERO; 3];
        for (slot, base_deg) in orbit.iter_mut().zip(ORBIT_ANGLES_DEG) {
            let angle = base_deg.to_radians() + orbit_turn;
            *slot = Vec2::new(angle.cos(), angle.sin()) * ORBIT_RADIUS;
        }
        Self {
            ring_rotation,
            pulse_scale: 1.0 + 0.2 * pulse,
            pulse_opacity: 0.8 - 0.4 * pulse,
            orbit,
        }
    }
}

/// Expanding ring played once each time the pointer enters an interactive element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub center: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

impl Ripple {
    /// Ease-out from nothing to twice its size while fading; `None` once finished.
    pub fn at(center: Vec2, age: Duration) -> Option<Self> {
        let p = age.as_secs_f32() / RIPPLE_DURATION_SEC;
        if p >= 1.0 {
            return None;
        }
        let eased = 1.0 - (1.0 - p) * (1.0 - p);
        Some(Self {
            center,
            radius: RIPPLE_RADIUS * RIPPLE_MAX_SCALE * eased,
            opacity: RIPPLE_START_OPACITY * (1.0 - eased),
        })
    }
}

/// Render-ready snapshot of the pointer layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorLayers {
    pub glyph_center: Vec2,
    pub glyph_scale: f32,
    pub glyph_opacity: f32,
    pub inner_glow_diameter: f32, // before glyph scale
    pub ripple: Option<Ripple>,
    pub halo_center: Vec2,
    pub halo_opacity: f32,
    pub trail_light_center: Vec2,
    pub trail_light_opacity: f32,
    pub pose: GlyphPose,
}

/// True when any element on the path from the event target to the root is
/// interactive. Items are `(tag name, role attribute)`.
pub fn is_interactive<'a, I>(chain: I) -> bool
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    chain.into_iter().any(|(tag, role)| {
        INTERACTIVE_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
            || role.is_some_and(|r| INTERACTIVE_ROLES.contains(&r))
    })
}

pub struct CursorEffect<R: Rng = StdRng> {
    pointer: Vec2,
    visible: bool,
    hovering: bool,
    seen: bool,
    trail: ParticleTrail,
    rng: R,
    next_id: u64,
    glyph: Spring2,
    glyph_scale: f32,
    inner_glow: f32,
    ripple_age: Option<Duration>,
    halo: Spring2,
    trail_light: Spring2,
    elapsed: Duration,
}

impl<R: Rng> CursorEffect<R> {
    pub fn new(rng: R) -> Self {
        Self {
            pointer: Vec2::ZERO,
            visible: false,
            hovering: false,
            seen: false,
            trail: ParticleTrail::default(),
            rng,
            next_id: 0,
            glyph: Spring2::new(GLYPH_SPRING),
            glyph_scale: 1.0,
            inner_glow: INNER_GLOW_DIAMETER_IDLE,
            ripple_age: None,
            halo: Spring2::new(HALO_SPRING),
            trail_light: Spring2::new(TRAIL_LIGHT_SPRING),
            elapsed: Duration::ZERO,
        }
    }

    /// Record a pointer move; may spawn one particle at the new position.
    pub fn pointer_moved(&mut self, position: Vec2, interactive: bool) -> Option<&Particle> {
        self.pointer = position;
        self.visible = true;
        if interactive && !self.hovering {
            self.ripple_age = Some(Duration::ZERO);
        } else if !interactive {
            self.ripple_age = None;
        }
        self.hovering = interactive;
        if !self.seen {
            // first sighting: start the followers on the pointer, not the corner
            self.glyph.snap(position);
            self.halo.snap(position);
            self.trail_light.snap(position);
            self.seen = true;
        }
        if !self.rng.gen_bool(SPAWN_PROBABILITY) {
            return None;
        }
        let particle = Particle {
            id: self.next_id,
            position,
            velocity: Vec2::new(
                self.rng.gen_range(-PARTICLE_SPEED_MAX..PARTICLE_SPEED_MAX),
                self.rng.gen_range(-PARTICLE_SPEED_MAX..PARTICLE_SPEED_MAX),
            ),
            life: PARTICLE_LIFE_FRAMES,
            max_life: PARTICLE_LIFE_FRAMES,
            size: self.rng.gen_range(PARTICLE_SIZE_MIN..PARTICLE_SIZE_MAX),
            hue: self.rng.gen_range(PARTICLE_HUE_MIN..PARTICLE_HUE_MAX),
        };
        self.next_id += 1;
        self.trail.push(particle);
        self.trail.newest()
    }

    pub fn pointer_left(&mut self) {
        self.visible = false;
        self.hovering = false;
        self.ripple_age = None;
    }

    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    #[inline]
    pub fn trail(&self) -> &ParticleTrail {
        &self.trail
    }

    pub fn layers(&self) -> CursorLayers {
        let shown = if self.visible { 1.0 } else { 0.0 };
        let halo_opacity = if self.hovering {
            HALO_OPACITY_HOVER
        } else {
            HALO_OPACITY_IDLE
        };
        CursorLayers {
            glyph_center: self.glyph.position,
            glyph_scale: self.glyph_scale,
            glyph_opacity: shown,
            inner_glow_diameter: self.inner_glow,
            ripple: self
                .ripple_age
                .and_then(|age| Ripple::at(self.pointer, age)),
            halo_center: self.halo.position,
            halo_opacity: halo_opacity * shown,
            trail_light_center: self.trail_light.position,
            trail_light_opacity: TRAIL_LIGHT_OPACITY * shown,
            pose: GlyphPose::at(self.elapsed),
        }
    }
}

impl<R: Rng> Animate for CursorEffect<R> {
    fn advance(&mut self, tick: &FrameTick) {
        self.trail.tick();
        let dt = tick.dt_sec().min(CURSOR_MAX_FRAME_DT_SEC);
        self.glyph.step(self.pointer, dt);
        self.halo.step(self.pointer, dt);
        self.trail_light.step(self.pointer, dt);
        // scale eases over 0.2s
        let target = if self.hovering { GLYPH_HOVER_SCALE } else { 1.0 };
        let max_delta = (GLYPH_HOVER_SCALE - 1.0) / 0.2 * dt;
        self.glyph_scale += (target - self.glyph_scale).clamp(-max_delta, max_delta);
        let target = if self.hovering {
            INNER_GLOW_DIAMETER_HOVER
        } else {
            INNER_GLOW_DIAMETER_IDLE
        };
        let max_delta = (INNER_GLOW_DIAMETER_HOVER - INNER_GLOW_DIAMETER_IDLE) / INNER_GLOW_EASE_SEC * dt;
        self.inner_glow += (target - self.inner_glow).clamp(-max_delta, max_delta);
        if let Some(age) = self.ripple_age.as_mut() {
            *age += tick.dt;
        }
        self.elapsed += tick.dt;
    }
}
