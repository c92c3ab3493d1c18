// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic frame-stepping harness for vitrine controllers.
//!
//! - [`SimulatedDisplay`]: fixed-refresh tick source in nanosecond host time.
//! - [`VisibilityTracker`]: per-frame check that the next slot is shown by
//!   exactly one element, with a rolling history of overlay widths.
//! - [`RecordingPresenter`]: keeps every presented frame.
//! - [`Harness`]: ties them to a controller and emits trace events the way a
//!   host backend's frame loop does.

#![no_std]

extern crate alloc;

mod display;
mod driver;
mod presenter;
mod visibility;

#[cfg(test)]
mod scenarios;

pub use display::SimulatedDisplay;
pub use driver::{DEFAULT_FRAME, HISTORY, Harness, RunSummary};
pub use presenter::RecordingPresenter;
pub use visibility::{Violation, VisibilityReport, VisibilityTracker, check};
