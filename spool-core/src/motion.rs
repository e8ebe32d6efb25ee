//! Scroll offset animations driven by the host's frame tick.
//!
//! Both animations are cooperative: the owner calls `tick` once per frame
//! and applies the returned value, and may cancel at any time (a new drag
//! gesture does exactly that). Neither animation mutates anything beyond
//! its own state.

use std::time::Instant;

use crate::constants::motion::{MAX_FRAME_DELTA, SETTLE_EPSILON_FACTOR};
use crate::types::Direction;

/// Exponential approach of a scroll offset toward a fixed target.
///
/// Each tick moves the offset by the fraction `1 - exp(-rate * dt)` of the
/// remaining distance, which is frame-rate independent and never
/// overshoots. Once the remaining distance falls inside a small
/// rate-proportional epsilon the offset snaps to the target and the
/// animation deactivates.
#[derive(Debug, Default)]
pub struct Settle {
    target: f32,
    rate: f32,
    active: bool,
    last_tick: Option<Instant>,
}

impl Settle {
    /// Starts (or restarts) the animation toward `target`.
    pub fn start(&mut self, target: f32, rate: f32) {
        self.target = target;
        self.rate = rate.max(f32::EPSILON);
        self.active = true;
        self.last_tick = None;
    }

    /// Stops the animation without snapping.
    pub fn cancel(&mut self) {
        self.active = false;
        self.last_tick = None;
    }

    /// True while the animation is running.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Target the offset is settling toward.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Advances the animation and returns the new offset, or `None` when
    /// inactive. The first tick after `start` establishes the time base
    /// and leaves the offset unchanged.
    pub fn tick(&mut self, now: Instant, offset: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        let dt = self.frame_delta(now);
        let next = offset + (self.target - offset) * (1.0 - (-self.rate * dt).exp());
        if (next - self.target).abs() <= SETTLE_EPSILON_FACTOR * self.rate {
            self.active = false;
            self.last_tick = None;
            Some(self.target)
        } else {
            Some(next)
        }
    }

    fn frame_delta(&mut self, now: Instant) -> f32 {
        let dt = self
            .last_tick
            .map(|last| (now - last).as_secs_f32().min(MAX_FRAME_DELTA))
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        dt
    }
}

/// Constant-rate scroll motion in one direction, used for programmatic
/// "move to the next item" gestures. Runs until cancelled by its owner.
#[derive(Debug)]
pub struct Glide {
    direction: Direction,
    rate: f32,
    last_tick: Option<Instant>,
}

impl Glide {
    /// Creates a glide moving in `direction` at `rate` units per second.
    pub fn new(direction: Direction, rate: f32) -> Self {
        Self {
            direction,
            rate: rate.max(0.0),
            last_tick: None,
        }
    }

    /// Direction of travel.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Distance covered since the previous tick. The first tick
    /// establishes the time base and returns zero.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = self
            .last_tick
            .map(|last| (now - last).as_secs_f32().min(MAX_FRAME_DELTA))
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.rate * dt
    }
}
