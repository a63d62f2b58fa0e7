//! Countdown clock driven by wall-clock time.
//!
//! The clock never counts its own polls. Each poll measures whole seconds since
//! the start instant and reports the difference from what it already reported,
//! so a host that was suspended for a minute gets one tick carrying 60 seconds
//! instead of sixty replayed ticks.

use std::time::{Duration, Instant};

use crate::types::Generation;

/// One clock report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub generation: Generation,
    /// Whole seconds since the previous tick (greater than 1 after a stall).
    pub elapsed_secs: u32,
    pub remaining_secs: u32,
    pub expired: bool,
}

#[derive(Debug, Clone)]
pub struct CountdownClock {
    generation: Generation,
    started_at: Instant,
    duration_secs: u32,
    reported_secs: u32,
    running: bool,
}

impl CountdownClock {
    /// Start counting down `duration_secs` from `now` on behalf of `generation`
    pub fn start(generation: Generation, now: Instant, duration_secs: u32) -> Self {
        Self {
            generation,
            started_at: now,
            duration_secs,
            reported_secs: 0,
            running: duration_secs > 0,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.duration_secs - self.reported_secs
    }

    /// Report the seconds elapsed since the last tick, if a whole one has passed
    ///
    /// Stops by itself once the countdown reaches zero.
    pub fn poll(&mut self, now: Instant) -> Option<ClockTick> {
        if !self.running {
            return None;
        }

        let whole = now
            .saturating_duration_since(self.started_at)
            .as_secs()
            .min(self.duration_secs as u64) as u32;
        let elapsed_secs = whole.saturating_sub(self.reported_secs);
        if elapsed_secs == 0 {
            return None;
        }

        self.reported_secs = whole;
        let remaining_secs = self.remaining_secs();
        let expired = remaining_secs == 0;
        if expired {
            self.running = false;
        }

        Some(ClockTick {
            generation: self.generation,
            elapsed_secs,
            remaining_secs,
            expired,
        })
    }

    /// Stop the clock. Safe to call any number of times.
    ///
    /// Returns true if this call stopped a running clock.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// When the next whole second falls due, or `None` once stopped
    pub fn next_deadline(&self) -> Option<Instant> {
        self.running
            .then(|| self.started_at + Duration::from_secs(self.reported_secs as u64 + 1))
    }
}
