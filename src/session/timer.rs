//! Cooperative countdown for the answer window.
//!
//! The host's update loop calls `tick` with the real time elapsed since the
//! previous tick. The timer never runs on its own and never counts down
//! while stopped.

use std::time::Duration;

/// Countdown that reports expiry exactly once per `start`.
#[derive(Clone, Debug, Default)]
pub struct Timer {
    duration: Duration,
    remaining: Duration,
    running: bool,
    expired: bool,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for a fresh window.
    pub fn start(&mut self, duration: Duration) {
        self.duration = duration;
        self.remaining = duration;
        self.running = true;
        self.expired = false;
    }

    /// Pause the countdown. Expiry is suppressed until `resume`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Continue a stopped window with the time it had left.
    ///
    /// Does nothing once the window has expired.
    pub fn resume(&mut self) {
        if !self.expired {
            self.running = true;
        }
    }

    /// Advance by `elapsed`. Returns `true` on the tick that expires the
    /// window, and only on that one.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.running = false;
            self.expired = true;
            return true;
        }
        false
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Length of the current window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Fraction of the window left, for a timer bar. 1.0 for a zero window.
    #[must_use]
    pub fn fraction_remaining(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.remaining.as_secs_f64() / self.duration.as_secs_f64()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.expired
    }
}
