// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::Mul;

use crate::rect::FloatRect;
use crate::vec2::Vec2;

/// Affine 2D transform stored as a row-major 3×3 matrix.
///
/// Conventions:
/// - Points are column vectors: `p' = M · [x, y, 1]ᵀ`.
/// - The bottom row is `0, 0, 1` for every transform built by this crate;
///   `from_array` accepts arbitrary rows and the math stays projective-safe.
/// - `a.combine(&b)` applies `b` first, then `a`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform2D {
    m: [f32; 9],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Builds a transform from nine row-major components.
    #[must_use]
    pub const fn from_array(m: [f32; 9]) -> Self {
        Self { m }
    }

    /// Returns the nine row-major components.
    #[must_use]
    pub const fn to_array(&self) -> [f32; 9] {
        self.m
    }

    /// Translation by `(x, y)`.
    #[must_use]
    pub const fn translation(x: f32, y: f32) -> Self {
        Self::from_array([1.0, 0.0, x, 0.0, 1.0, y, 0.0, 0.0, 1.0])
    }

    /// Scaling by `(sx, sy)` around the origin.
    #[must_use]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self::from_array([sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0])
    }

    /// Clockwise rotation by `degrees` (y grows downward) around the origin.
    #[must_use]
    pub fn rotation(degrees: f32) -> Self {
        Self::from_parts(Vec2::ZERO, degrees, Vec2::ONE, Vec2::ZERO)
    }

    /// Composes position, rotation (degrees), scale and origin into one matrix.
    ///
    /// The origin is the local point that lands on `position`; rotation and
    /// scale pivot around it. Angles are evaluated in `f64` and narrowed once.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_parts(position: Vec2, rotation: f32, scale: Vec2, origin: Vec2) -> Self {
        let angle = -f64::from(rotation).to_radians();
        let cos = angle.cos() as f32;
        let sin = angle.sin() as f32;

        let sxc = scale.x * cos;
        let syc = scale.y * cos;
        let sxs = scale.x * sin;
        let sys = scale.y * sin;
        let tx = -origin.x * sxc - origin.y * sys + position.x;
        let ty = origin.x * sxs - origin.y * syc + position.y;

        Self::from_array([sxc, sys, tx, -sxs, syc, ty, 0.0, 0.0, 1.0])
    }

    /// Determinant of the full 3×3 matrix.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = self.m;
        a00 * (a22 * a11 - a21 * a12) - a10 * (a22 * a01 - a21 * a02)
            + a20 * (a12 * a01 - a11 * a02)
    }

    /// Inverse transform; a singular matrix inverts to [`Transform2D::IDENTITY`].
    #[must_use]
    pub fn inverse(&self) -> Self {
        let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = self.m;
        let det = self.determinant();
        if det == 0.0 {
            return Self::IDENTITY;
        }
        Self::from_array([
            (a22 * a11 - a21 * a12) / det,
            -(a22 * a01 - a21 * a02) / det,
            (a12 * a01 - a11 * a02) / det,
            -(a22 * a10 - a20 * a12) / det,
            (a22 * a00 - a20 * a02) / det,
            -(a12 * a00 - a10 * a02) / det,
            (a21 * a10 - a20 * a11) / det,
            -(a21 * a00 - a20 * a01) / det,
            (a11 * a00 - a10 * a01) / det,
        ])
    }

    /// Matrix product `self · other` (apply `other`, then `self`).
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0_f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Self::from_array(out)
    }

    /// Maps a point through the affine part of the matrix.
    #[must_use]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let [a00, a01, a02, a10, a11, a12, ..] = self.m;
        Vec2::new(a00 * p.x + a01 * p.y + a02, a10 * p.x + a11 * p.y + a12)
    }

    /// Axis-aligned bounds of `rect` after transformation.
    ///
    /// Evaluates the four corners and builds the box containing them.
    #[must_use]
    pub fn transform_rect(&self, rect: &FloatRect) -> FloatRect {
        let corners = rect.corners().map(|c| self.transform_point(c));
        FloatRect::from_points(&corners)
    }

    /// Column-major 4×4 matrix (z row/column left as identity) for GPU upload.
    #[must_use]
    pub fn to_gl_matrix(&self) -> [f32; 16] {
        let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = self.m;
        [
            a00, a10, 0.0, a20, //
            a01, a11, 0.0, a21, //
            0.0, 0.0, 1.0, 0.0, //
            a02, a12, 0.0, a22,
        ]
    }
}

impl Mul for Transform2D {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.combine(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 9], b: [f32; 9]) {
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert!((x - y).abs() <= 1e-5, "index {i}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn default_parts_are_identity() {
        let t = Transform2D::from_parts(Vec2::ZERO, 0.0, Vec2::ONE, Vec2::ZERO);
        approx(t.to_array(), Transform2D::IDENTITY.to_array());
    }

    #[test]
    fn origin_lands_on_position() {
        let t = Transform2D::from_parts(
            Vec2::new(100.0, 50.0),
            37.0,
            Vec2::new(2.0, 3.0),
            Vec2::new(5.0, 5.0),
        );
        let p = t.transform_point(Vec2::new(5.0, 5.0));
        assert!((p.x - 100.0).abs() < 1e-4 && (p.y - 50.0).abs() < 1e-4, "{p:?}");
    }

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        let p = Transform2D::rotation(90.0).transform_point(Vec2::UNIT_X);
        assert!(p.x.abs() < 1e-6 && (p.y - 1.0).abs() < 1e-6, "{p:?}");
    }

    #[test]
    fn singular_inverse_falls_back_to_identity() {
        let t = Transform2D::scaling(0.0, 1.0);
        assert_eq!(t.inverse(), Transform2D::IDENTITY);
    }

    #[test]
    fn combine_applies_right_operand_first() {
        let t = Transform2D::translation(10.0, 0.0) * Transform2D::scaling(2.0, 2.0);
        assert_eq!(t.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));
    }

    #[test]
    fn transform_rect_bounds_rotated_square() {
        let r = FloatRect::new(-1.0, -1.0, 2.0, 2.0);
        let b = Transform2D::rotation(45.0).transform_rect(&r);
        let h = 2.0_f32.sqrt();
        assert!((b.left + h).abs() < 1e-5 && (b.width - 2.0 * h).abs() < 1e-5, "{b:?}");
    }

    #[test]
    fn gl_matrix_is_column_major() {
        let g = Transform2D::translation(3.0, 4.0).to_gl_matrix();
        assert_eq!(&g[12..], &[3.0, 4.0, 0.0, 1.0]);
        assert_eq!(g[0], 1.0);
        assert_eq!(g[5], 1.0);
    }
}
