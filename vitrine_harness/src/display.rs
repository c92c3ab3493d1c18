// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated fixed-refresh tick source.

use vitrine_core::time::{Duration, HostTime, Timebase};
use vitrine_core::timing::FrameTick;

/// A display that ticks at a fixed interval in nanosecond host time.
///
/// [`next_tick`](Self::next_tick) returns a tick at [`now`](Self::now) and
/// then moves `now` forward one interval, so `now` is always the time of the
/// upcoming vsync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedDisplay {
    now: HostTime,
    interval: Duration,
    frame_index: u64,
}

impl SimulatedDisplay {
    /// Tick unit of every [`HostTime`] this display produces.
    pub const TIMEBASE: Timebase = Timebase::NANOS;

    /// Creates a display whose first tick lands at `start`.
    #[must_use]
    pub const fn new(start: HostTime, interval: Duration) -> Self {
        Self {
            now: start,
            interval,
            frame_index: 0,
        }
    }

    /// Creates a display refreshing `hz` times per second, starting at zero.
    ///
    /// A rate of zero is treated as 1 Hz.
    #[must_use]
    pub const fn with_refresh_hz(hz: u32) -> Self {
        let hz = if hz == 0 { 1 } else { hz as u64 };
        Self::new(HostTime(0), Duration(1_000_000_000 / hz))
    }

    /// Time of the upcoming tick.
    #[inline]
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.now
    }

    /// Refresh interval.
    #[inline]
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Index the upcoming tick will carry.
    #[inline]
    #[must_use]
    pub const fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Delivers the upcoming tick.
    pub fn next_tick(&mut self) -> FrameTick {
        let tick = FrameTick::new(self.now, self.frame_index);
        self.now = self.now + self.interval;
        self.frame_index += 1;
        tick
    }

    /// Delays the upcoming tick by `gap`, as a backgrounded page or a long
    /// main-thread stall would.
    pub fn stall(&mut self, gap: Duration) {
        self.now = self.now + gap;
    }
}

impl Default for SimulatedDisplay {
    fn default() -> Self {
        Self::with_refresh_hz(60)
    }
}
