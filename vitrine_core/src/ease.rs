// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves for fixed-duration animations.

/// An easing curve mapping normalized progress `t ∈ [0, 1]` to eased
/// progress in `[0, 1]`.
///
/// None of the curves overshoot, so an eased interpolation between two values
/// never leaves the interval they span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Constant velocity.
    Linear,
    /// Cubic deceleration: fast start, settles gently into the target.
    #[default]
    Power3Out,
    /// Cubic acceleration followed by cubic deceleration.
    Power3InOut,
}

impl Ease {
    /// Applies the curve to `t`, clamping `t` into `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Power3Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::Power3InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Ease; 3] = [Ease::Linear, Ease::Power3Out, Ease::Power3InOut];

    #[test]
    fn endpoints_are_fixed() {
        for ease in CURVES {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic_without_overshoot() {
        for ease in CURVES {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = ease.apply(f64::from(i) / 100.0);
                assert!(v >= prev, "{ease:?} decreased at step {i}");
                assert!((0.0..=1.0).contains(&v), "{ease:?} left [0, 1] at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn power3_out_front_loads_progress() {
        // Half the time covers 87.5% of the distance.
        assert!((Ease::Power3Out.apply(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn power3_in_out_is_symmetric() {
        assert!((Ease::Power3InOut.apply(0.5) - 0.5).abs() < 1e-12);
        let a = Ease::Power3InOut.apply(0.2);
        let b = Ease::Power3InOut.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Ease::Power3Out.apply(-3.0), 0.0);
        assert_eq!(Ease::Power3Out.apply(7.0), 1.0);
        assert_eq!(Ease::Linear.apply(f64::NAN), 1.0);
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
    }
}
