// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! Vitrine splits host-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Tick source**: produces [`FrameTick`] values from a host mechanism
//!   (e.g. `requestAnimationFrame`). Not abstracted by a trait because setup
//!   and lifecycle differ fundamentally across hosts.
//!
//! - **Time**: `now() -> HostTime` and `timebase() -> Timebase` free
//!   functions that read the host's monotonic clock.
//!
//! - **Presenter**: implements the [`Presenter`] trait to apply a resolved
//!   [`HeroFrame`] to host elements (DOM nodes, a test recorder).
//!
//! - **Input wiring**: maps pointer, click, media-loaded, and resize events
//!   onto [`TransitionController`] calls, measuring element rects per event.
//!
//! [`FrameTick`]: crate::timing::FrameTick
//! [`TransitionController`]: crate::controller::TransitionController

use crate::element::HeroFrame;

/// Applies a resolved frame to host elements.
///
/// Both the DOM presenter and test doubles implement this trait, enabling
/// generic frame loops.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     let outcome = controller.tick(tick);
///     if let Some(end) = outcome.ended {
///         tracer.transition_end(&TransitionEndEvent { frame_index: Some(tick.frame_index), timestamp: tick.now, end });
///     }
///
///     // Present: one-shot commands (overlay restart) are consumed here.
///     let frame = controller.take_frame();
///     presenter.present(&frame);
/// }
/// ```
pub trait Presenter {
    /// Applies `frame` to the backing elements.
    fn present(&mut self, frame: &HeroFrame);
}
