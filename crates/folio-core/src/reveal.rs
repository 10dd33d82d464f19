//! Scroll-reveal latch driven by viewport intersection reports.

use crate::constants::*;
use crate::error::{parse_bool, parse_f64, parse_u32, ConfigError};
use std::fmt;
use std::str::FromStr;

pub const REVEAL_CLASS: &str = "reveal";
pub const REVEAL_VISIBLE_CLASS: &str = "reveal--visible";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealVariant {
    #[default]
    FadeUp,
    FadeIn,
    ZoomIn,
}

impl RevealVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevealVariant::FadeUp => "fade-up",
            RevealVariant::FadeIn => "fade-in",
            RevealVariant::ZoomIn => "zoom-in",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            RevealVariant::FadeUp => "reveal--fade-up",
            RevealVariant::FadeIn => "reveal--fade-in",
            RevealVariant::ZoomIn => "reveal--zoom-in",
        }
    }
}

impl fmt::Display for RevealVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevealVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fade-up" => Ok(RevealVariant::FadeUp),
            "fade-in" => Ok(RevealVariant::FadeIn),
            "zoom-in" => Ok(RevealVariant::ZoomIn),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    pub variant: RevealVariant,
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub threshold: f64, // visible fraction, 0..=1
    pub once: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            variant: RevealVariant::FadeUp,
            delay_ms: 0,
            duration_ms: REVEAL_DEFAULT_DURATION_MS,
            threshold: REVEAL_DEFAULT_THRESHOLD,
            once: true,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::OutOfRange {
                attr: "data-threshold",
                value: self.threshold,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }

    /// Build from `data-*` attributes; missing attributes keep their defaults.
    pub fn from_attributes<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = get("data-variant") {
            cfg.variant = v.parse()?;
        }
        if let Some(v) = get("data-delay") {
            cfg.delay_ms = parse_u32("data-delay", &v)?;
        }
        if let Some(v) = get("data-duration") {
            cfg.duration_ms = parse_u32("data-duration", &v)?;
        }
        if let Some(v) = get("data-threshold") {
            cfg.threshold = parse_f64("data-threshold", &v)?;
        }
        if let Some(v) = get("data-once") {
            cfg.once = parse_bool("data-once", &v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn transition_style(&self) -> String {
        format!(
            "transition-duration: {}ms; transition-delay: {}ms",
            self.duration_ms, self.delay_ms
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatchChange {
    Unchanged,
    Revealed { unobserve: bool },
    Hidden,
}

#[derive(Clone, Debug)]
pub struct RevealLatch {
    config: RevealConfig,
    visible: bool,
    observing: bool,
}

impl RevealLatch {
    /// With reduced motion the content is shown at once and nothing is observed.
    pub fn mount(config: RevealConfig, reduced_motion: bool) -> Self {
        Self {
            config,
            visible: reduced_motion,
            observing: !reduced_motion,
        }
    }

    #[inline]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn observing(&self) -> bool {
        self.observing
    }

    pub fn on_intersection(&mut self, is_intersecting: bool, ratio: f64) -> LatchChange {
        if !self.observing {
            return LatchChange::Unchanged;
        }
        if is_intersecting && ratio >= self.config.threshold {
            if self.config.once {
                self.observing = false;
            }
            if self.visible && !self.config.once {
                return LatchChange::Unchanged;
            }
            self.visible = true;
            return LatchChange::Revealed {
                unobserve: self.config.once,
            };
        }
        if !is_intersecting && !self.config.once && self.visible {
            self.visible = false;
            return LatchChange::Hidden;
        }
        LatchChange::Unchanged
    }

    /// Stop observing for good. Content is never left hidden, so an element
    /// still waiting for its reveal is shown.
    pub fn release(&mut self) -> LatchChange {
        self.observing = false;
        if self.visible {
            return LatchChange::Unchanged;
        }
        self.visible = true;
        LatchChange::Revealed { unobserve: true }
    }

    pub fn class_names(&self) -> Vec<&'static str> {
        let mut classes = vec![REVEAL_CLASS, self.config.variant.class_name()];
        if self.visible {
            classes.push(REVEAL_VISIBLE_CLASS);
        }
        classes
    }
}
