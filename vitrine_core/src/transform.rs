// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 transform for the preview tilt.
//!
//! Covers exactly what the tilt needs (translation, perspective, rotation
//! about X and Y, composition) and nothing more. The layout matches CSS
//! `matrix3d()` argument order, so presenters can emit the columns directly.

use core::ops::Mul;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A column-major 4×4 transform stored as `[[f64; 4]; 4]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f64; 4] {
        self.cols[i]
    }

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        let mut t = Self::IDENTITY;
        t.cols[3] = [x, y, z, 1.0];
        t
    }

    /// Creates a perspective projection with the viewer `distance` units in
    /// front of the z = 0 plane (CSS `perspective(distance)`).
    ///
    /// A non-positive or non-finite distance yields the identity.
    #[inline]
    #[must_use]
    pub fn from_perspective(distance: f64) -> Self {
        let mut t = Self::IDENTITY;
        if distance > 0.0 && distance.is_finite() {
            t.cols[2][3] = -1.0 / distance;
        }
        t
    }

    /// Creates a rotation about the X axis (CSS `rotateX`), in degrees.
    #[must_use]
    pub fn from_rotation_x_deg(degrees: f64) -> Self {
        let r = degrees.to_radians();
        let (s, c) = (r.sin(), r.cos());
        let mut t = Self::IDENTITY;
        t.cols[1] = [0.0, c, s, 0.0];
        t.cols[2] = [0.0, -s, c, 0.0];
        t
    }

    /// Creates a rotation about the Y axis (CSS `rotateY`), in degrees.
    #[must_use]
    pub fn from_rotation_y_deg(degrees: f64) -> Self {
        let r = degrees.to_radians();
        let (s, c) = (r.sin(), r.cos());
        let mut t = Self::IDENTITY;
        t.cols[0] = [c, 0.0, -s, 0.0];
        t.cols[2] = [s, 0.0, c, 0.0];
        t
    }

    /// Applies the transform to a point on the z = 0 plane, including the
    /// perspective divide.
    #[must_use]
    pub fn transform_point(self, x: f64, y: f64) -> (f64, f64) {
        let c = &self.cols;
        let px = c[0][0] * x + c[1][0] * y + c[3][0];
        let py = c[0][1] * x + c[1][1] * y + c[3][1];
        let w = c[0][3] * x + c[1][3] * y + c[3][3];
        if w == 0.0 { (px, py) } else { (px / w, py / w) }
    }

    /// Are all sixteen entries finite?
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    /// `a * b` applies `b` first, then `a`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, v) in col.iter_mut().enumerate() {
                *v = a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
            }
        }
        Self { cols: out }
    }
}
