// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame visibility checks over presented [`HeroFrame`]s.

use alloc::string::String;

use vitrine_core::element::HeroFrame;

/// A frame that breaks a visibility rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Violation {
    /// Neither the preview nor the overlay shows the next slot.
    NextHidden,
    /// The preview and the overlay both show the next slot.
    NextDuplicated,
    /// The trigger input is enabled while a transition is in flight.
    InteractiveWhileTransitioning,
    /// The visible representation shows a slot other than the next one.
    SlotMismatch,
}

impl Violation {
    /// Returns a short label for HUD rendering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NextHidden => "next hidden",
            Self::NextDuplicated => "next duplicated",
            Self::InteractiveWhileTransitioning => "interactive while transitioning",
            Self::SlotMismatch => "slot mismatch",
        }
    }
}

/// Checks one frame. Returns the first rule it breaks.
#[must_use]
pub fn check(frame: &HeroFrame) -> Option<Violation> {
    match frame.next_representations() {
        0 => return Some(Violation::NextHidden),
        1 => {}
        _ => return Some(Violation::NextDuplicated),
    }
    if frame.transitioning && frame.interactive {
        return Some(Violation::InteractiveWhileTransitioning);
    }
    let shown = if frame.overlay.element.is_shown() {
        frame.overlay.slot
    } else {
        frame.preview.slot
    };
    (shown != frame.next).then_some(Violation::SlotMismatch)
}

/// Aggregated report returned by [`VisibilityTracker::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityReport {
    /// Total frames observed.
    pub total_frames: u64,
    /// Frames observed mid-transition.
    pub transitioning_frames: u64,
    /// Frames that broke a rule.
    pub violations: u64,
    /// Overlay playback restarts requested.
    pub restarts: u64,
    /// Most recent rule broken.
    pub last_violation: Option<Violation>,
}

impl VisibilityReport {
    /// Whether every observed frame was well formed.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.violations == 0
    }
}

/// Rolling visibility tracker with a fixed-size history of overlay widths.
#[derive(Debug)]
pub struct VisibilityTracker<const N: usize> {
    widths: [f64; N],
    cursor: usize,
    report: VisibilityReport,
}

impl<const N: usize> Default for VisibilityTracker<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> VisibilityTracker<N> {
    /// Creates a tracker with an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            widths: [0.0; N],
            cursor: 0,
            report: VisibilityReport {
                total_frames: 0,
                transitioning_frames: 0,
                violations: 0,
                restarts: 0,
                last_violation: None,
            },
        }
    }

    /// Observes one frame and returns an updated report.
    pub fn observe(&mut self, frame: &HeroFrame) -> VisibilityReport {
        let r = &mut self.report;
        r.total_frames = r.total_frames.saturating_add(1);
        if frame.transitioning {
            r.transitioning_frames = r.transitioning_frames.saturating_add(1);
        }
        if frame.overlay.restart_playback {
            r.restarts = r.restarts.saturating_add(1);
        }
        if let Some(violation) = check(frame) {
            r.violations = r.violations.saturating_add(1);
            r.last_violation = Some(violation);
        }

        if N > 0 {
            let overlay = &frame.overlay.element;
            self.widths[self.cursor] = if overlay.is_shown() {
                overlay.rect.width()
            } else {
                0.0
            };
            self.cursor = (self.cursor + 1) % N;
        }
        self.report
    }

    /// Report as of the last observed frame.
    #[must_use]
    pub const fn report(&self) -> VisibilityReport {
        self.report
    }

    /// Returns ring-buffer overlay widths oldest→newest. Frames without a
    /// visible overlay record zero.
    #[must_use]
    pub fn overlay_widths(&self) -> [f64; N] {
        let mut out = [0.0; N];
        let mut i = 0;
        while i < N {
            out[i] = self.widths[(self.cursor + i) % N];
            i += 1;
        }
        out
    }

    /// Returns an ASCII sparkline over [`overlay_widths`](Self::overlay_widths).
    #[must_use]
    pub fn sparkline_ascii(&self, min_width: f64, max_width: f64) -> String {
        const LEVELS: &[u8] = b" .:-=+*#%@";
        let span = max_width - min_width;
        let mut out = String::with_capacity(N);
        for w in self.overlay_widths() {
            let t = if span > 0.0 {
                (w.clamp(min_width, max_width) - min_width) / span
            } else {
                0.0
            };
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "t is in [0, 1], so the index is within the level count"
            )]
            let level = (t * (LEVELS.len() as f64 - 1.0) + 0.5) as usize;
            out.push(LEVELS[level] as char);
        }
        out
    }
}
