// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-following motion with fixed-duration ease-out smoothing.
//!
//! A [`SmoothedAxis`] is a one-dimensional retargetable tween: every new
//! target restarts a fixed-duration [`Ease::Power3Out`] ramp from wherever the
//! value currently is. The ramp only advances when the scheduler ticks
//! ([`advance`](SmoothedAxis::advance)), so the motion is independent of how
//! often targets arrive.
//!
//! [`PointerSmoother`] pairs two independent axes and maps viewport pointer
//! coordinates through the containing frame's bounds into clamped targets for
//! the preview element's top-left corner.

use kurbo::{Point, Rect, Size};

use crate::ease::{Ease, lerp};

/// One independently smoothed coordinate.
///
/// The value reported by [`current`](Self::current) always lies within the
/// bounds supplied with the most recent target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedAxis {
    current: f64,
    target: f64,
    from: f64,
    elapsed: f64,
    duration: f64,
    ease: Ease,
    baseline: f64,
    lower: f64,
    upper: f64,
    moving: bool,
}

impl SmoothedAxis {
    /// Creates an axis resting at `baseline` that eases over `duration`
    /// seconds.
    #[must_use]
    pub fn new(baseline: f64, duration: f64) -> Self {
        Self {
            current: baseline,
            target: baseline,
            from: baseline,
            elapsed: 0.0,
            duration: duration.max(0.0),
            ease: Ease::Power3Out,
            baseline,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            moving: false,
        }
    }

    /// Current (rendered) value.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Value the axis is easing toward.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    /// Neutral value used by [`reset`](Self::reset).
    #[inline]
    #[must_use]
    pub const fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Whether a ramp is in flight.
    #[inline]
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Changes the neutral value without moving the axis.
    pub fn set_baseline(&mut self, baseline: f64) {
        self.baseline = baseline;
    }

    /// Clamps `raw` into `[lower, upper]` and starts easing toward it.
    ///
    /// Returns `false` (and changes nothing) if any input is not finite. An
    /// inverted range collapses to `lower`.
    pub fn set_target(&mut self, raw: f64, lower: f64, upper: f64) -> bool {
        if !(raw.is_finite() && lower.is_finite() && upper.is_finite()) {
            return false;
        }
        let upper = upper.max(lower);
        self.lower = lower;
        self.upper = upper;
        self.retarget(raw.clamp(lower, upper));
        true
    }

    /// Eases back to the baseline, discarding motion toward the old target.
    pub fn reset(&mut self) {
        self.lower = self.lower.min(self.baseline);
        self.upper = self.upper.max(self.baseline);
        self.retarget(self.baseline);
    }

    /// Stops in place: the current value becomes the target.
    pub fn halt(&mut self) {
        self.target = self.current;
        self.from = self.current;
        self.elapsed = 0.0;
        self.moving = false;
    }

    /// Jumps to `value` with no ramp.
    pub fn snap(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.lower = self.lower.min(value);
        self.upper = self.upper.max(value);
        self.current = value;
        self.halt();
    }

    /// Advances the ramp by `dt` seconds. Returns `true` if the value moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.moving {
            return false;
        }
        self.elapsed += dt.max(0.0);
        let progress = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        if progress >= 1.0 {
            self.current = self.target;
            self.moving = false;
        } else {
            let eased = self.ease.apply(progress);
            self.current = lerp(self.from, self.target, eased).clamp(self.lower, self.upper);
        }
        true
    }

    fn retarget(&mut self, target: f64) {
        // A resize can shrink the bounds under a resting value.
        self.current = self.current.clamp(self.lower, self.upper);
        self.from = self.current;
        self.target = target;
        self.elapsed = 0.0;
        // A zero duration still lands on the next advance, never here.
        self.moving = self.from != target;
    }
}

/// One of the two smoothing axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// Two independent smoothed axes driving the preview's top-left corner,
/// relative to the containing frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSmoother {
    x: SmoothedAxis,
    y: SmoothedAxis,
    preview: Size,
}

impl PointerSmoother {
    /// Creates a smoother for a preview of the given size, easing over
    /// `duration` seconds. Both axes start at the origin.
    #[must_use]
    pub fn new(preview: Size, duration: f64) -> Self {
        Self {
            x: SmoothedAxis::new(0.0, duration),
            y: SmoothedAxis::new(0.0, duration),
            preview,
        }
    }

    /// Returns the axis state.
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> &SmoothedAxis {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut SmoothedAxis {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Size of the element being positioned.
    #[inline]
    #[must_use]
    pub const fn preview_size(&self) -> Size {
        self.preview
    }

    /// Current top-left corner of the preview, relative to the frame.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x.current(), self.y.current())
    }

    /// Current preview rectangle, relative to the frame.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.preview)
    }

    /// Whether either axis is still easing.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.x.is_moving() || self.y.is_moving()
    }

    /// Clamps `raw` into `[lower, upper]` and stores it as `axis`'s target.
    pub fn set_target(&mut self, axis: Axis, raw: f64, lower: f64, upper: f64) -> bool {
        self.axis_mut(axis).set_target(raw, lower, upper)
    }

    /// Centers the preview in a frame of the given size and makes that the
    /// baseline for [`reset`](Self::reset).
    ///
    /// Skipped (returns `false`) for an unlaid-out frame.
    pub fn center_in(&mut self, frame: Size) -> bool {
        if !is_laid_out(frame) {
            return false;
        }
        let cx = (frame.width - self.preview.width).max(0.0) / 2.0;
        let cy = (frame.height - self.preview.height).max(0.0) / 2.0;
        self.x.set_baseline(cx);
        self.y.set_baseline(cy);
        self.x.snap(cx);
        self.y.snap(cy);
        true
    }

    /// Moves the reset baseline to the center of a resized frame without
    /// moving the preview.
    pub fn rebase(&mut self, frame: Size) -> bool {
        if !is_laid_out(frame) {
            return false;
        }
        self.x.set_baseline((frame.width - self.preview.width).max(0.0) / 2.0);
        self.y.set_baseline((frame.height - self.preview.height).max(0.0) / 2.0);
        true
    }

    /// Maps a viewport pointer position through `frame` (the frame's
    /// viewport bounds, measured for this event) and retargets both axes so
    /// the preview centers on the pointer without leaving the frame.
    ///
    /// Returns `false` without touching either axis when the frame has zero
    /// (or non-finite) width or height.
    pub fn pointer_moved(&mut self, pointer: Point, frame: Rect) -> bool {
        if !is_laid_out(frame.size()) || !pointer.is_finite() {
            return false;
        }
        let max_x = (frame.width() - self.preview.width).max(0.0);
        let max_y = (frame.height() - self.preview.height).max(0.0);
        let raw_x = pointer.x - frame.x0 - self.preview.width / 2.0;
        let raw_y = pointer.y - frame.y0 - self.preview.height / 2.0;
        let moved_x = self.x.set_target(raw_x, 0.0, max_x);
        let moved_y = self.y.set_target(raw_y, 0.0, max_y);
        moved_x && moved_y
    }

    /// Eases one axis back to its baseline.
    pub fn reset(&mut self, axis: Axis) {
        self.axis_mut(axis).reset();
    }

    /// Stops both axes where they are.
    pub fn halt(&mut self) {
        self.x.halt();
        self.y.halt();
    }

    /// Advances both axes by `dt` seconds. Returns `true` if either moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        let x = self.x.advance(dt);
        let y = self.y.advance(dt);
        x || y
    }
}

fn is_laid_out(size: Size) -> bool {
    size.width > 0.0 && size.height > 0.0 && size.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);
    const PREVIEW: Size = Size::new(256.0, 256.0);

    #[test]
    fn out_of_range_target_lands_on_nearest_bound() {
        let mut axis = SmoothedAxis::new(0.0, 0.45);
        assert!(axis.set_target(-40.0, 0.0, 100.0));
        assert_eq!(axis.target(), 0.0);
        assert!(axis.set_target(400.0, 0.0, 100.0));
        assert_eq!(axis.target(), 100.0);
    }

    #[test]
    fn ease_out_front_loads_motion_and_settles_exactly() {
        let mut axis = SmoothedAxis::new(0.0, 0.4);
        axis.set_target(100.0, 0.0, 100.0);
        axis.advance(0.2);
        // power3.out at t = 0.5
        assert!((axis.current() - 87.5).abs() < 1e-9, "got {}", axis.current());
        assert!(axis.is_moving());
        axis.advance(0.25);
        assert_eq!(axis.current(), 100.0);
        assert!(!axis.is_moving());
    }

    #[test]
    fn motion_depends_on_ticks_not_target_rate() {
        // Re-sending the same target many times between ticks restarts the
        // ramp but never moves the value by itself.
        let mut axis = SmoothedAxis::new(0.0, 0.4);
        for _ in 0..50 {
            axis.set_target(100.0, 0.0, 100.0);
        }
        assert_eq!(axis.current(), 0.0);
        axis.advance(0.4);
        assert_eq!(axis.current(), 100.0);
    }

    #[test]
    fn current_stays_within_shrunken_bounds() {
        let mut axis = SmoothedAxis::new(0.0, 0.4);
        axis.set_target(500.0, 0.0, 500.0);
        axis.advance(1.0);
        assert_eq!(axis.current(), 500.0);
        // Container shrank: new bounds exclude the resting value.
        axis.set_target(50.0, 0.0, 200.0);
        assert!(axis.current() <= 200.0);
        for _ in 0..30 {
            axis.advance(1.0 / 60.0);
            assert!((0.0..=200.0).contains(&axis.current()));
        }
    }

    #[test]
    fn reset_discards_old_target() {
        let mut axis = SmoothedAxis::new(10.0, 0.35);
        axis.set_target(16.0, -16.0, 16.0);
        axis.advance(0.1);
        axis.reset();
        assert_eq!(axis.target(), 10.0);
        axis.advance(0.35);
        assert_eq!(axis.current(), 10.0);
    }

    #[test]
    fn non_finite_targets_are_rejected() {
        let mut axis = SmoothedAxis::new(0.0, 0.4);
        assert!(!axis.set_target(f64::NAN, 0.0, 1.0));
        assert!(!axis.set_target(1.0, 0.0, f64::INFINITY));
        assert!(!axis.is_moving());
    }

    #[test]
    fn zero_duration_lands_on_next_tick() {
        let mut axis = SmoothedAxis::new(0.0, 0.0);
        assert!(axis.set_target(100.0, 0.0, 100.0));
        assert_eq!(axis.current(), 0.0);
        assert!(axis.is_moving());
        assert!(axis.advance(0.0));
        assert_eq!(axis.current(), 100.0);
        assert!(!axis.is_moving());

        axis.reset();
        assert_eq!(axis.current(), 100.0);
        axis.advance(1.0 / 60.0);
        assert_eq!(axis.current(), 0.0);
    }

    #[test]
    fn pointer_centers_preview_under_cursor() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        assert!(s.pointer_moved(Point::new(640.0, 360.0), FRAME));
        s.advance(1.0);
        assert_eq!(s.position(), Point::new(512.0, 232.0));
    }

    #[test]
    fn pointer_outside_frame_clamps_to_edges() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        s.pointer_moved(Point::new(-500.0, 5000.0), FRAME);
        assert_eq!(s.axis(Axis::X).target(), 0.0);
        assert_eq!(s.axis(Axis::Y).target(), 720.0 - 256.0);
    }

    #[test]
    fn frame_offset_in_viewport_is_respected() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        let frame = Rect::new(100.0, 50.0, 1380.0, 770.0);
        s.pointer_moved(Point::new(740.0, 410.0), frame);
        assert_eq!(s.axis(Axis::X).target(), 512.0);
        assert_eq!(s.axis(Axis::Y).target(), 232.0);
    }

    #[test]
    fn degenerate_frame_is_skipped() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        s.center_in(FRAME.size());
        let before = s;
        assert!(!s.pointer_moved(Point::new(10.0, 10.0), Rect::new(0.0, 0.0, 0.0, 720.0)));
        assert!(!s.pointer_moved(Point::new(10.0, 10.0), Rect::new(0.0, 0.0, 1280.0, 0.0)));
        assert_eq!(s, before);
        assert!(s.position().is_finite());
    }

    #[test]
    fn frame_smaller_than_preview_pins_to_origin() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        let frame = Rect::new(0.0, 0.0, 200.0, 100.0);
        s.pointer_moved(Point::new(150.0, 90.0), frame);
        assert_eq!(s.axis(Axis::X).target(), 0.0);
        assert_eq!(s.axis(Axis::Y).target(), 0.0);
    }

    #[test]
    fn axes_are_independent() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        s.set_target(Axis::X, 300.0, 0.0, 1024.0);
        s.advance(1.0);
        assert_eq!(s.position().x, 300.0);
        assert_eq!(s.position().y, 0.0);
        assert!(!s.axis(Axis::Y).is_moving());
    }

    #[test]
    fn center_sets_reset_baseline() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        assert!(s.center_in(FRAME.size()));
        assert_eq!(s.position(), Point::new(512.0, 232.0));
        s.pointer_moved(Point::new(0.0, 0.0), FRAME);
        s.advance(1.0);
        assert_eq!(s.position(), Point::ZERO);
        s.reset(Axis::X);
        s.reset(Axis::Y);
        s.advance(1.0);
        assert_eq!(s.position(), Point::new(512.0, 232.0));
    }

    #[test]
    fn rebase_moves_baseline_only() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        s.center_in(FRAME.size());
        assert!(s.rebase(Size::new(640.0, 480.0)));
        assert_eq!(s.position(), Point::new(512.0, 232.0));
        assert_eq!(s.axis(Axis::X).baseline(), 192.0);
        assert_eq!(s.axis(Axis::Y).baseline(), 112.0);
        assert!(!s.rebase(Size::ZERO));
    }

    #[test]
    fn halt_freezes_mid_flight() {
        let mut s = PointerSmoother::new(PREVIEW, 0.45);
        s.pointer_moved(Point::new(640.0, 360.0), FRAME);
        s.advance(0.1);
        let frozen = s.position();
        s.halt();
        assert!(!s.is_moving());
        s.advance(1.0);
        assert_eq!(s.position(), frozen);
    }
}
