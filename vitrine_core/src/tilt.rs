// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tilt and parallax for the preview card.
//!
//! While the pointer is over the card, the card shifts toward it, tilts
//! around its center under a fixed perspective, and its inner content slides
//! the opposite way for a sense of depth. Every channel is its own
//! [`SmoothedAxis`], so the six motions settle independently. Leaving the
//! card eases everything back to rest.

use kurbo::{Point, Rect, Vec2};

use crate::config::TiltConfig;
use crate::smoother::SmoothedAxis;
use crate::transform::Transform3d;

/// Six independently smoothed channels describing the card's hover pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewTilt {
    config: TiltConfig,
    translate_x: SmoothedAxis,
    translate_y: SmoothedAxis,
    rotate_x: SmoothedAxis,
    rotate_y: SmoothedAxis,
    content_x: SmoothedAxis,
    content_y: SmoothedAxis,
    engaged: bool,
}

impl PreviewTilt {
    /// Creates a tilt at rest.
    #[must_use]
    pub fn new(config: TiltConfig) -> Self {
        let outer = config.duration_secs();
        let inner = config.content_duration_secs();
        Self {
            config,
            translate_x: SmoothedAxis::new(0.0, outer),
            translate_y: SmoothedAxis::new(0.0, outer),
            rotate_x: SmoothedAxis::new(0.0, outer),
            rotate_y: SmoothedAxis::new(0.0, outer),
            content_x: SmoothedAxis::new(0.0, inner),
            content_y: SmoothedAxis::new(0.0, inner),
            engaged: false,
        }
    }

    /// Whether the pointer is currently driving the tilt.
    #[inline]
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Retargets every channel from a pointer position over `card`.
    ///
    /// The pointer is normalized to `[-1, 1]` on each axis relative to the
    /// card center. Returns `false` for an unlaid-out card.
    pub fn pointer_moved(&mut self, pointer: Point, card: Rect) -> bool {
        let (half_w, half_h) = (card.width() / 2.0, card.height() / 2.0);
        if !(half_w > 0.0 && half_h > 0.0) || !pointer.is_finite() || !card.is_finite() {
            return false;
        }
        let center = card.center();
        let rel_x = ((pointer.x - center.x) / half_w).clamp(-1.0, 1.0);
        let rel_y = ((pointer.y - center.y) / half_h).clamp(-1.0, 1.0);

        let t = self.config.max_translate;
        let r = self.config.max_rotate_deg;
        let c = t * self.config.parallax;
        let offset_x = rel_x * t;
        let offset_y = rel_y * t;

        self.translate_x.set_target(offset_x, -t, t);
        self.translate_y.set_target(offset_y, -t, t);
        self.rotate_y.set_target(rel_x * r, -r, r);
        self.rotate_x.set_target(-rel_y * r, -r, r);
        self.content_x.set_target(-offset_x * self.config.parallax, -c, c);
        self.content_y.set_target(-offset_y * self.config.parallax, -c, c);
        self.engaged = true;
        true
    }

    /// Eases every channel back to rest.
    pub fn pointer_left(&mut self) {
        for axis in self.channels_mut() {
            axis.reset();
        }
        self.engaged = false;
    }

    /// Drops the pose immediately, with no ease back.
    pub fn clear(&mut self) {
        for axis in self.channels_mut() {
            let rest = axis.baseline();
            axis.snap(rest);
        }
        self.engaged = false;
    }

    /// Stops every channel where it is.
    pub fn halt(&mut self) {
        for axis in self.channels_mut() {
            axis.halt();
        }
    }

    /// Advances every channel by `dt` seconds. Returns `true` if any moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        let mut moved = false;
        for axis in self.channels_mut() {
            moved |= axis.advance(dt);
        }
        moved
    }

    /// Whether any channel is still easing.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        [
            &self.translate_x,
            &self.translate_y,
            &self.rotate_x,
            &self.rotate_y,
            &self.content_x,
            &self.content_y,
        ]
        .iter()
        .any(|a| a.is_moving())
    }

    /// Current card offset from its layout position.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.translate_x.current(), self.translate_y.current())
    }

    /// Current `(rotate_x, rotate_y)` in degrees.
    #[must_use]
    pub fn rotation_deg(&self) -> (f64, f64) {
        (self.rotate_x.current(), self.rotate_y.current())
    }

    /// Current offset of the card's inner content, opposing the card offset.
    #[must_use]
    pub fn content_offset(&self) -> Vec2 {
        Vec2::new(self.content_x.current(), self.content_y.current())
    }

    /// Card transform about its center: perspective, then offset, then
    /// rotation about Y and X.
    #[must_use]
    pub fn transform(&self) -> Transform3d {
        let offset = self.offset();
        let (rx, ry) = self.rotation_deg();
        Transform3d::from_perspective(self.config.perspective)
            * Transform3d::from_translation(offset.x, offset.y, 0.0)
            * Transform3d::from_rotation_y_deg(ry)
            * Transform3d::from_rotation_x_deg(rx)
    }

    fn channels_mut(&mut self) -> [&mut SmoothedAxis; 6] {
        [
            &mut self.translate_x,
            &mut self.translate_y,
            &mut self.rotate_x,
            &mut self.rotate_y,
            &mut self.content_x,
            &mut self.content_y,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect::new(100.0, 100.0, 356.0, 356.0);

    fn settled(tilt: &mut PreviewTilt) {
        tilt.advance(1.0);
        assert!(!tilt.is_moving());
    }

    #[test]
    fn corner_pointer_reaches_full_tilt() {
        let mut tilt = PreviewTilt::new(TiltConfig::standard());
        assert!(tilt.pointer_moved(Point::new(356.0, 100.0), CARD));
        settled(&mut tilt);
        assert_eq!(tilt.offset(), Vec2::new(16.0, -16.0));
        // Right edge turns toward +Y rotation, top edge toward +X rotation.
        assert_eq!(tilt.rotation_deg(), (8.0, 8.0));
        assert!((tilt.content_offset().x + 9.6).abs() < 1e-9);
        assert!((tilt.content_offset().y - 9.6).abs() < 1e-9);
    }

    #[test]
    fn pointer_far_outside_is_clamped_to_unit_range() {
        let mut tilt = PreviewTilt::new(TiltConfig::standard());
        tilt.pointer_moved(Point::new(5000.0, 228.0), CARD);
        settled(&mut tilt);
        assert_eq!(tilt.offset().x, 16.0);
        assert_eq!(tilt.offset().y, 0.0);
    }

    #[test]
    fn leaving_returns_to_rest() {
        let mut tilt = PreviewTilt::new(TiltConfig::standard());
        tilt.pointer_moved(Point::new(120.0, 300.0), CARD);
        tilt.advance(0.1);
        assert!(tilt.is_engaged());
        tilt.pointer_left();
        assert!(!tilt.is_engaged());
        settled(&mut tilt);
        assert_eq!(tilt.offset(), Vec2::ZERO);
        assert_eq!(tilt.rotation_deg(), (0.0, 0.0));
        assert_eq!(tilt.transform(), Transform3d::from_perspective(600.0));
    }

    #[test]
    fn content_lags_behind_card() {
        let mut tilt = PreviewTilt::new(TiltConfig::standard());
        tilt.pointer_moved(Point::new(356.0, 228.0), CARD);
        // After the 350 ms outer ramp the card is settled, the 400 ms
        // content ramp is not.
        tilt.advance(0.36);
        assert_eq!(tilt.offset().x, 16.0);
        assert!(tilt.is_moving());
        assert!(tilt.content_offset().x > -9.6);
    }

    #[test]
    fn zero_sized_card_is_ignored() {
        let mut tilt = PreviewTilt::new(TiltConfig::standard());
        assert!(!tilt.pointer_moved(Point::new(1.0, 1.0), Rect::new(5.0, 5.0, 5.0, 60.0)));
        assert!(!tilt.is_engaged());
        assert!(tilt.transform().is_finite());
    }

    #[test]
    fn halt_freezes_every_channel() {
        let mut tilt = PreviewTilt::new(TiltConfig::standard());
        tilt.pointer_moved(Point::new(356.0, 356.0), CARD);
        tilt.advance(0.05);
        let pose = tilt.transform();
        tilt.halt();
        tilt.advance(1.0);
        assert_eq!(tilt.transform(), pose);
    }

    #[test]
    fn clear_drops_pose_without_easing() {
        let mut tilt = PreviewTilt::new(TiltConfig::standard());
        tilt.pointer_moved(Point::new(356.0, 356.0), CARD);
        tilt.advance(0.1);
        tilt.clear();
        assert!(!tilt.is_moving());
        assert!(!tilt.is_engaged());
        assert_eq!(tilt.offset(), Vec2::ZERO);
        assert_eq!(tilt.content_offset(), Vec2::ZERO);
    }
}
