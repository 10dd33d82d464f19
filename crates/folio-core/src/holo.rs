//! Holographic background geometry.
//!
//! A frame is a pure function of `(time, width, height)`: the renderer only
//! strokes and fills what [`compose`] returns.

use crate::constants::*;
use crate::ticker::{Animate, FrameTick};

/// RGBA colour with straight alpha, matching canvas `rgba()` strings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub f64);

impl Rgba {
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, self.3)
    }
}

pub const BACKDROP_STOPS: [(f64, Rgba); 3] = [
    (0.0, Rgba(76, 29, 149, 0.15)),
    (0.5, Rgba(49, 16, 96, 0.1)),
    (1.0, Rgba(10, 1, 24, 0.05)),
];

pub const GRID_EDGE: Rgba = Rgba(168, 85, 247, HOLO_GRID_OPACITY * 0.5);
pub const GRID_CENTER: Rgba = Rgba(217, 70, 239, HOLO_GRID_OPACITY);
pub const GLOW_CORE: Rgba = Rgba(217, 70, 239, 0.8);
pub const GLOW_EDGE: Rgba = Rgba(168, 85, 247, 0.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialBackdrop {
    pub cx: f64,
    pub cy: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HoloFrame {
    pub width: f64,
    pub height: f64,
    pub backdrop: RadialBackdrop,
    pub horizontal: Vec<f64>, // y of each horizontal line
    pub vertical: Vec<f64>,   // x of each vertical line
    pub glows: Vec<Glow>,
}

#[inline]
fn wave_offset(time: f64, axis_pos: f64) -> f64 {
    (time / 2000.0 + axis_pos / 200.0).sin() * HOLO_GRID_SPACING / 4.0
}

fn grid_lines(time: f64, extent: f64) -> Vec<f64> {
    let mut lines = Vec::new();
    let mut pos = 0.0;
    while pos < extent + HOLO_GRID_SPACING {
        lines.push(pos + wave_offset(time, pos));
        pos += HOLO_GRID_SPACING;
    }
    lines
}

pub fn compose(time: f64, width: f64, height: f64) -> HoloFrame {
    let glows = (0..HOLO_GLOW_COUNT)
        .map(|i| {
            let i = i as f64;
            Glow {
                x: ((time / 1000.0 + i * 0.5).sin() + 1.0) * width / 2.0,
                y: ((time / 1200.0 + i * 0.7).cos() + 1.0) * height / 2.0,
                radius: (time / 1000.0 + i).sin() * 2.0 + 3.0,
            }
        })
        .collect();
    HoloFrame {
        width,
        height,
        backdrop: RadialBackdrop {
            cx: width / 2.0,
            cy: height / 2.0,
            inner_radius: 0.0,
            outer_radius: width * HOLO_GRADIENT_RADIUS_FACTOR,
        },
        horizontal: grid_lines(time, height),
        vertical: grid_lines(time, width),
        glows,
    }
}

/// Monotonic background clock, advanced a fixed step per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoloClock {
    time: f64,
}

impl HoloClock {
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn advance(&mut self) {
        self.time += HOLO_TIME_STEP;
    }
}

#[derive(Clone, Debug, Default)]
pub struct HoloBackground {
    clock: HoloClock,
    width: f64,
    height: f64,
    frame: Option<HoloFrame>,
}

impl HoloBackground {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    /// Most recently composed frame.
    pub fn frame(&self) -> Option<&HoloFrame> {
        self.frame.as_ref()
    }
}

impl Animate for HoloBackground {
    // draw with the current time, then step, as the canvas loop does
    fn advance(&mut self, _tick: &FrameTick) {
        self.frame = Some(compose(self.clock.time(), self.width, self.height));
        self.clock.advance();
    }
}
