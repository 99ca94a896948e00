// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::vec2::Vec2;

/// Line segment between two points; a polygon edge when used for collisions.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatLine {
    /// First endpoint.
    pub point1: Vec2,
    /// Second endpoint.
    pub point2: Vec2,
}

impl FloatLine {
    /// Creates a segment connecting `point1` and `point2`.
    #[must_use]
    pub const fn new(point1: Vec2, point2: Vec2) -> Self {
        Self { point1, point2 }
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.point1.distance(self.point2)
    }

    /// Returns `true` if the two segments intersect (endpoints inclusive).
    ///
    /// Solves `p1 + t·(p2 - p1) = q1 + u·(q2 - q1)` with Cramer's rule in
    /// `f64` and accepts `t, u ∈ [0, 1]`.
    ///
    /// Parallel segments have a zero determinant. Disjoint parallel segments
    /// yield infinite parameters and report no intersection; collinear
    /// segments yield NaN parameters, which are not rejected, so any two
    /// collinear segments report an intersection.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let d1 = self.point2 - self.point1;
        let d2 = other.point1 - other.point2;
        let offset = other.point1 - self.point1;
        let det = f64::from(d1.cross(d2));
        let t = f64::from(offset.cross(d2)) / det;
        let u = f64::from(d1.cross(offset)) / det;
        !(t < 0.0 || u < 0.0 || t > 1.0 || u > 1.0)
    }
}
