// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for vitrine.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`DomPresenter`]: applies hero frames to injected DOM elements
//! - [`HeroMount`]: wires DOM events to a controller and tears it down on drop

#![no_std]

extern crate alloc;

mod mount;
mod presenter;
mod raf;

pub use mount::HeroMount;
pub use presenter::{DomPresenter, HeroElements, MediaRole};
pub use raf::RafLoop;
pub use vitrine_core::backend::Presenter;

use vitrine_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    raf::host_time_from_ms(raf::performance_now())
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}
