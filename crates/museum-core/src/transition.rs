//! One-shot boost that speeds up the return from inspect.
//!
//! Counted down in render-tick time so pausing the loop pauses the boost.

use std::time::Duration;

use crate::constants::EXIT_BOOST_DURATION;

#[derive(Clone, Debug)]
pub struct TransitionScheduler {
    duration: Duration,
    remaining: Duration,
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new(EXIT_BOOST_DURATION)
    }
}

impl TransitionScheduler {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: Duration::ZERO,
        }
    }

    /// Restart at full boost.
    pub fn start(&mut self) {
        self.remaining = self.duration;
    }

    pub fn cancel(&mut self) {
        self.remaining = Duration::ZERO;
    }

    /// Count down by one frame. Returns true on the tick the boost runs out.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.remaining.is_zero() {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }

    pub fn is_active(&self) -> bool {
        !self.remaining.is_zero()
    }

    /// Linear boost in `[0, 1]`: 1 right after `start`, 0 once the window elapsed.
    pub fn boost(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
