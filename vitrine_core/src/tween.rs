// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A cancellable, tick-driven rectangle tween.
//!
//! [`RectTween`] animates a rectangle (and a corner radius alongside it) over
//! a fixed duration. Like the smoothing axes it only moves when
//! [`advance`](RectTween::advance) is called from a scheduler tick. Once
//! cancelled it never moves again, and a finished tween reports
//! [`TweenStep::Finished`] exactly once.

use kurbo::Rect;

use crate::ease::{Ease, lerp};

/// Result of advancing a [`RectTween`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenStep {
    /// Still animating.
    Running,
    /// Reached its end value on this step.
    Finished,
    /// The tween was cancelled (or already finished) and did not move.
    Idle,
}

/// Animates a rectangle and a corner radius from start to end values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectTween {
    from: Rect,
    to: Rect,
    from_radius: f64,
    to_radius: f64,
    duration: f64,
    elapsed: f64,
    ease: Ease,
    cancelled: bool,
    finished: bool,
}

impl RectTween {
    /// Creates a tween from `from` to `to` lasting `duration` seconds.
    ///
    /// A zero (or negative) duration finishes on the first advance.
    #[must_use]
    pub fn new(from: Rect, to: Rect, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            from_radius: 0.0,
            to_radius: 0.0,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
            cancelled: false,
            finished: false,
        }
    }

    /// Animates a corner radius alongside the rectangle.
    #[must_use]
    pub fn with_corner_radius(mut self, from: f64, to: f64) -> Self {
        self.from_radius = from;
        self.to_radius = to;
        self
    }

    /// Start rectangle.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> Rect {
        self.from
    }

    /// End rectangle.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Rect {
        self.to
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.finished {
            1.0
        } else if self.duration <= 0.0 {
            0.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Current eased rectangle.
    #[must_use]
    pub fn value(&self) -> Rect {
        let t = self.eased();
        Rect::new(
            lerp(self.from.x0, self.to.x0, t),
            lerp(self.from.y0, self.to.y0, t),
            lerp(self.from.x1, self.to.x1, t),
            lerp(self.from.y1, self.to.y1, t),
        )
    }

    /// Current eased corner radius.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        lerp(self.from_radius, self.to_radius, self.eased())
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[inline]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether the tween has reached its end value.
    #[inline]
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stops the tween where it is. Further advances are no-ops.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Advances by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> TweenStep {
        if self.cancelled || self.finished {
            return TweenStep::Idle;
        }
        self.elapsed += dt.max(0.0);
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.finished = true;
            TweenStep::Finished
        } else {
            TweenStep::Running
        }
    }

    fn eased(&self) -> f64 {
        if self.finished {
            1.0
        } else {
            self.ease.apply(self.progress())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Rect = Rect::new(500.0, 200.0, 756.0, 456.0);
    const END: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

    fn tween() -> RectTween {
        RectTween::new(START, END, 0.95, Ease::Power3InOut).with_corner_radius(12.0, 0.0)
    }

    #[test]
    fn starts_at_start_rect() {
        let t = tween();
        assert_eq!(t.value(), START);
        assert_eq!(t.corner_radius(), 12.0);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn in_out_is_symmetric_at_midpoint() {
        let mut t = tween();
        assert_eq!(t.advance(0.475), TweenStep::Running);
        let mid = t.value();
        assert!((mid.x0 - 250.0).abs() < 1e-9, "got {mid:?}");
        assert!((t.corner_radius() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn finishes_exactly_once_at_end_rect() {
        let mut t = tween();
        let mut finished = 0;
        for _ in 0..120 {
            if t.advance(1.0 / 60.0) == TweenStep::Finished {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
        assert!(t.is_finished());
        assert_eq!(t.value(), END);
        assert_eq!(t.corner_radius(), 0.0);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn cancelled_tween_never_moves() {
        let mut t = tween();
        t.advance(0.2);
        let frozen = t.value();
        t.cancel();
        assert!(t.is_cancelled());
        assert_eq!(t.advance(10.0), TweenStep::Idle);
        assert_eq!(t.value(), frozen);
        assert!(!t.is_finished());
    }

    #[test]
    fn zero_duration_finishes_on_first_advance() {
        let mut t = RectTween::new(START, END, 0.0, Ease::Linear);
        assert_eq!(t.value(), START);
        assert_eq!(t.advance(0.0), TweenStep::Finished);
        assert_eq!(t.value(), END);
    }
}
