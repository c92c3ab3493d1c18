// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-way readiness latch for the hero media pool.
//!
//! [`LoadGate`] counts load signals up to a required number and then latches
//! ready. The latch has no reset and no timeout: if a required resource never
//! loads, the gate stays closed and the host keeps showing its loading state.

/// Latches "ready" once enough media resources have reported loaded.
///
/// Invariants:
///
/// - `0 <= loaded <= required`
/// - `ready` flips from `false` to `true` at most once and never reverts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadGate {
    required: u32,
    loaded: u32,
    ready: bool,
}

impl LoadGate {
    /// Creates a gate that opens after `required` load signals.
    ///
    /// A gate with `required == 0` is ready immediately.
    #[must_use]
    pub const fn new(required: u32) -> Self {
        Self {
            required,
            loaded: 0,
            ready: required == 0,
        }
    }

    /// Records one load signal.
    ///
    /// Increments the loaded count by one, capped at the required count.
    /// Returns `true` only for the call that opens the gate; calls after the
    /// gate is open are harmless no-ops.
    pub fn report_loaded(&mut self) -> bool {
        if self.loaded < self.required {
            self.loaded += 1;
        }
        let was_ready = self.ready;
        self.ready = was_ready || self.loaded >= self.required;
        self.ready && !was_ready
    }

    /// Returns the current latch value.
    #[inline]
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of load signals counted so far (never above [`required`](Self::required)).
    #[inline]
    #[must_use]
    pub const fn loaded(&self) -> u32 {
        self.loaded
    }

    /// Number of load signals needed to open the gate.
    #[inline]
    #[must_use]
    pub const fn required(&self) -> u32 {
        self.required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latches_after_required_count() {
        let mut gate = LoadGate::new(3);
        assert!(!gate.is_ready());
        assert!(!gate.report_loaded());
        assert!(!gate.report_loaded());
        assert!(!gate.is_ready());
        assert!(gate.report_loaded(), "third signal opens the gate");
        assert!(gate.is_ready());
    }

    #[test]
    fn extra_reports_are_capped_and_keep_ready() {
        let mut gate = LoadGate::new(3);
        let opened: u32 = (0..5).map(|_| u32::from(gate.report_loaded())).sum();
        assert_eq!(opened, 1, "gate opens exactly once");
        assert_eq!(gate.loaded(), 3);
        assert!(gate.is_ready());
        // Re-querying never demotes the latch.
        for _ in 0..10 {
            assert!(gate.is_ready());
        }
    }

    #[test]
    fn zero_required_is_ready_from_the_start() {
        let mut gate = LoadGate::new(0);
        assert!(gate.is_ready());
        assert!(!gate.report_loaded(), "already open, nothing to open");
        assert_eq!(gate.loaded(), 0);
    }

    #[test]
    fn never_ready_without_enough_signals() {
        let mut gate = LoadGate::new(4);
        for _ in 0..3 {
            gate.report_loaded();
        }
        assert!(!gate.is_ready());
        assert_eq!(gate.loaded(), 3);
        assert_eq!(gate.required(), 4);
    }
}
