// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame opportunities delivered by the animation scheduler.
//!
//! The scheduler itself lives outside this crate (a `requestAnimationFrame`
//! loop in the web backend, a simulated display in the harness). Each
//! callback is turned into a [`FrameTick`] and handed to
//! [`TransitionController::tick`](crate::controller::TransitionController::tick).
//! A tick is the only suspension point of the controller: partial animation
//! progress becomes visible there and nowhere else.

use crate::time::HostTime;

/// A frame opportunity delivered by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick for the given time and frame counter.
    #[inline]
    #[must_use]
    pub const fn new(now: HostTime, frame_index: u64) -> Self {
        Self { now, frame_index }
    }
}
