// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Projects each [`HeroFrame`] onto the hero's live elements: video sources,
//! the preview's position and tilt, the overlay's rect and corner radius, the
//! trigger's disabled state, and the loading overlay.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Rect, Vec2};
use vitrine_core::backend::Presenter;
use vitrine_core::cycle::{MediaSlot, SlotIndex};
use vitrine_core::element::{ElementFrame, HeroFrame};
use vitrine_core::transform::Transform3d;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlVideoElement};

/// Handles to the elements that make up one hero.
///
/// The handles are injected by the host page; the presenter never looks
/// elements up by id or class.
#[derive(Clone, Debug)]
pub struct HeroElements {
    /// The frame every rect is relative to. Receives pointer moves.
    pub frame: HtmlElement,
    /// Absolutely positioned wrapper that follows the pointer.
    pub preview: HtmlElement,
    /// Tilted card inside the wrapper. Receives pointer leave.
    pub card: HtmlElement,
    /// Clickable content of the card. Disabled while transitioning.
    pub trigger: HtmlButtonElement,
    /// Video inside the trigger, showing the next slot.
    pub preview_video: HtmlVideoElement,
    /// Video that expands from the preview to the full frame.
    pub overlay: HtmlVideoElement,
    /// Full-frame video showing the active slot.
    pub background: HtmlVideoElement,
    /// Loading overlay hidden once the load gate opens.
    pub loading: Option<HtmlElement>,
}

/// Which media element a load signal came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaRole {
    /// The full-frame background.
    Background,
    /// The small preview.
    Preview,
    /// The transition overlay.
    Overlay,
}

impl MediaRole {
    const fn index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Preview => 1,
            Self::Overlay => 2,
        }
    }
}

/// Applies [`HeroFrame`]s to a [`HeroElements`] set.
///
/// Style writes that the browser rejects are ignored, the same way a missing
/// property is.
pub struct DomPresenter {
    elements: HeroElements,
    sources: Vec<String>,
    shown: [Option<SlotIndex>; 3],
    ready: bool,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("sources_len", &self.sources.len())
            .field("shown", &self.shown)
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter for `elements`, loading sources from the pool.
    #[must_use]
    pub fn new(elements: HeroElements, slots: &[MediaSlot]) -> Self {
        let s = elements.preview.style();
        let _ = s.set_property("position", "absolute");
        let _ = s.set_property("left", "0");
        let _ = s.set_property("top", "0");
        let _ = elements.card.style().set_property("transform-origin", "center");
        let o = elements.overlay.style();
        let _ = o.set_property("position", "absolute");
        let _ = o.set_property("left", "0");
        let _ = o.set_property("top", "0");
        let _ = o.set_property("transform-origin", "top left");
        let _ = o.set_property("pointer-events", "none");

        Self {
            elements,
            sources: slots.iter().map(|s| String::from(s.source())).collect(),
            shown: [None; 3],
            ready: false,
        }
    }

    /// The managed elements.
    #[must_use]
    pub fn elements(&self) -> &HeroElements {
        &self.elements
    }

    /// Slot currently loaded into `role`'s element, once a frame has been
    /// presented.
    #[must_use]
    pub fn shown(&self, role: MediaRole) -> Option<SlotIndex> {
        self.shown[role.index()]
    }

    fn show_slot(&mut self, role: MediaRole, slot: SlotIndex) {
        if self.shown[role.index()] == Some(slot) {
            return;
        }
        let Some(src) = self.sources.get(slot.position()) else {
            return;
        };
        let video = match role {
            MediaRole::Background => &self.elements.background,
            MediaRole::Preview => &self.elements.preview_video,
            MediaRole::Overlay => &self.elements.overlay,
        };
        video.set_src(src);
        self.shown[role.index()] = Some(slot);
    }
}

impl Presenter for DomPresenter {
    fn present(&mut self, frame: &HeroFrame) {
        // 1. Sources
        self.show_slot(MediaRole::Background, frame.active);
        self.show_slot(MediaRole::Preview, frame.preview.slot);
        self.show_slot(MediaRole::Overlay, frame.overlay.slot);

        // 2. Overlay. Shown before the preview hides so no paint sees neither.
        let overlay = &self.elements.overlay;
        apply_visibility(overlay, &frame.overlay.element);
        apply_css_rect(overlay, frame.overlay.element.rect);
        let _ = overlay.style().set_property(
            "border-radius",
            &format!("{}px", frame.overlay.corner_radius),
        );
        if frame.overlay.restart_playback {
            overlay.set_current_time(0.0);
            let _ = overlay.play();
        }

        // 3. Preview
        let preview = &frame.preview;
        let origin = preview.element.rect.origin();
        apply_visibility(&self.elements.preview, &preview.element);
        let _ = self.elements.preview.style().set_property(
            "transform",
            &format!("translate3d({}px,{}px,0)", origin.x, origin.y),
        );
        apply_css_transform(&self.elements.card, &preview.transform);
        apply_css_offset(&self.elements.trigger, preview.content_offset);
        self.elements.trigger.set_disabled(!frame.interactive);

        // 4. Loading overlay
        if frame.ready && !self.ready {
            if let Some(loading) = &self.elements.loading {
                let _ = loading.style().set_property("display", "none");
            }
            self.ready = true;
        }
    }
}

fn apply_visibility(el: &HtmlElement, element: &ElementFrame) {
    let s = el.style();
    let _ = s.set_property("opacity", &format!("{}", element.opacity));
    let _ = s.set_property(
        "visibility",
        if element.visible { "visible" } else { "hidden" },
    );
}

/// Positions an absolutely placed element at `rect`.
fn apply_css_rect(el: &HtmlElement, rect: Rect) {
    let s = el.style();
    let _ = s.set_property(
        "transform",
        &format!("translate3d({}px,{}px,0)", rect.x0, rect.y0),
    );
    let _ = s.set_property("width", &format!("{}px", rect.width()));
    let _ = s.set_property("height", &format!("{}px", rect.height()));
}

fn apply_css_offset(el: &HtmlElement, offset: Vec2) {
    let _ = el.style().set_property(
        "transform",
        &format!("translate3d({}px,{}px,0)", offset.x, offset.y),
    );
}

/// Applies a transform as a CSS `matrix3d()` value.
fn apply_css_transform(el: &HtmlElement, xf: &Transform3d) {
    let c0 = xf.col(0);
    let c1 = xf.col(1);
    let c2 = xf.col(2);
    let c3 = xf.col(3);

    let css = format!(
        "matrix3d({},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{})",
        c0[0],
        c0[1],
        c0[2],
        c0[3],
        c1[0],
        c1[1],
        c1[2],
        c1[3],
        c2[0],
        c2[1],
        c2[2],
        c2[3],
        c3[0],
        c3[1],
        c3[2],
        c3[3],
    );

    let _ = el.style().set_property("transform", &css);
}
