//! Frame tick abstraction.
//!
//! The browser drives effects through `requestAnimationFrame`; tests drive the
//! same state through [`SyntheticTicks`]. Anything that animates implements
//! [`Animate`] and never looks at where its ticks come from.

use std::time::Duration;

/// One animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTick {
    pub index: u64,
    pub dt: Duration,
}

impl FrameTick {
    #[inline]
    pub fn dt_sec(&self) -> f32 {
        self.dt.as_secs_f32()
    }
}

pub trait Animate {
    fn advance(&mut self, tick: &FrameTick);
}

pub trait TickSource {
    fn next_tick(&mut self) -> Option<FrameTick>;
}

/// Fixed-rate tick source that stops after `remaining` frames.
#[derive(Clone, Debug)]
pub struct SyntheticTicks {
    remaining: u64,
    next_index: u64,
    dt: Duration,
}

impl SyntheticTicks {
    pub fn new(count: u64, dt: Duration) -> Self {
        Self {
            remaining: count,
            next_index: 0,
            dt,
        }
    }

    /// `count` frames at 60 Hz.
    pub fn at_60hz(count: u64) -> Self {
        Self::new(count, Duration::from_micros(16_667))
    }
}

impl TickSource for SyntheticTicks {
    fn next_tick(&mut self) -> Option<FrameTick> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let tick = FrameTick {
            index: self.next_index,
            dt: self.dt,
        };
        self.next_index += 1;
        Some(tick)
    }
}

/// Pump every tick from `source` into `target`; returns how many were delivered.
pub fn drive<S: TickSource + ?Sized, A: Animate + ?Sized>(source: &mut S, target: &mut A) -> u64 {
    let mut delivered = 0;
    while let Some(tick) = source.next_tick() {
        target.advance(&tick);
        delivered += 1;
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(Vec<u64>);

    impl Animate for Counter {
        fn advance(&mut self, tick: &FrameTick) {
            self.0.push(tick.index);
        }
    }

    #[test]
    fn synthetic_ticks_are_numbered_and_finite() {
        let mut counter = Counter(Vec::new());
        let n = drive(&mut SyntheticTicks::at_60hz(4), &mut counter);
        assert_eq!(n, 4);
        assert_eq!(counter.0, vec![0, 1, 2, 3]);
    }
}
