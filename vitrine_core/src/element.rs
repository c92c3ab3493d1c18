// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tick output for the host rendering layer.
//!
//! A [`HeroFrame`] is the full resolved state of the hero media area: which
//! slot is active, whether the loading overlay can be hidden, and where (and
//! whether) the small preview and the transition overlay are drawn. Rects
//! are relative to the containing frame's top-left corner.

use kurbo::{Rect, Vec2};

use crate::cycle::SlotIndex;
use crate::transform::Transform3d;

/// Placement and visibility of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementFrame {
    /// Bounds relative to the containing frame.
    pub rect: Rect,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Whether the element is rendered at all.
    pub visible: bool,
}

impl ElementFrame {
    /// A fully opaque, visible element.
    #[must_use]
    pub const fn shown(rect: Rect) -> Self {
        Self {
            rect,
            opacity: 1.0,
            visible: true,
        }
    }

    /// A hidden element parked at `rect`.
    #[must_use]
    pub const fn hidden(rect: Rect) -> Self {
        Self {
            rect,
            opacity: 0.0,
            visible: false,
        }
    }

    /// Whether the element can be seen.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.visible && self.opacity > 0.0
    }
}

/// The small pointer-following preview of the next slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewFrame {
    /// Slot the preview shows.
    pub slot: SlotIndex,
    /// Layout rect (without the hover tilt).
    pub element: ElementFrame,
    /// Hover tilt about the card center.
    pub transform: Transform3d,
    /// Parallax offset of the card's inner content.
    pub content_offset: Vec2,
}

/// The media element that expands from the preview to the full frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayFrame {
    /// Slot the overlay plays.
    pub slot: SlotIndex,
    /// Current rect.
    pub element: ElementFrame,
    /// Current corner radius.
    pub corner_radius: f64,
    /// Seek to zero and start playback. Set for exactly one frame per
    /// started transition.
    pub restart_playback: bool,
}

/// Everything the host needs to draw one frame of the hero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroFrame {
    /// Slot shown full-frame in the background.
    pub active: SlotIndex,
    /// Slot the next trigger advances to.
    pub next: SlotIndex,
    /// Whether the loading overlay can be hidden.
    pub ready: bool,
    /// Whether a transition is in flight.
    pub transitioning: bool,
    /// Whether the trigger input should be enabled.
    pub interactive: bool,
    /// The small preview.
    pub preview: PreviewFrame,
    /// The transition overlay.
    pub overlay: OverlayFrame,
}

impl HeroFrame {
    /// Number of visible representations of the next slot. A well-formed
    /// frame always has exactly one.
    #[must_use]
    pub fn next_representations(&self) -> u8 {
        u8::from(self.preview.element.is_shown()) + u8::from(self.overlay.element.is_shown())
    }
}
