// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::line::FloatLine;
use crate::vec2::Vec2;

/// Axis-aligned rectangle with `f32` coordinates.
///
/// Conventions:
/// - `left`/`top` is the corner with the smallest coordinates when the size is
///   positive; `right = left + width`, `bottom = top + height`.
/// - Negative sizes are tolerated by the containment and intersection
///   queries, which work on the normalized min/max extents.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatRect {
    /// X coordinate of the left edge.
    pub left: f32,
    /// Y coordinate of the top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl FloatRect {
    /// A rectangle with no position and no size.
    pub const EMPTY: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Creates a rectangle from a position and a size vector.
    #[must_use]
    pub const fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Creates a rectangle from the coordinates of its four sides.
    #[must_use]
    pub fn from_coordinates(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Smallest rectangle containing every point; [`FloatRect::EMPTY`] for no points.
    #[must_use]
    pub fn from_points(points: &[Vec2]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::EMPTY;
        };
        let (mut min, mut max) = (*first, *first);
        for p in rest {
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }
        Self::from_coordinates(min.x, min.y, max.x, max.y)
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Size as a vector.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn min_x(&self) -> f32 {
        self.left.min(self.right())
    }

    fn max_x(&self) -> f32 {
        self.left.max(self.right())
    }

    fn min_y(&self) -> f32 {
        self.top.min(self.bottom())
    }

    fn max_y(&self) -> f32 {
        self.top.max(self.bottom())
    }

    /// Returns `true` if `point` lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges are not.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Returns `true` if either endpoint of `line` lies inside the rectangle.
    #[must_use]
    pub fn contains_line(&self, line: &FloatLine) -> bool {
        self.contains(line.point1) || self.contains(line.point2)
    }

    /// Computes the overlap of two rectangles.
    ///
    /// Returns `None` when the interiors do not overlap; rectangles that only
    /// share an edge or a corner do not intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.min_x().max(other.min_x());
        let top = self.min_y().max(other.min_y());
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());
        (left < right && top < bottom).then(|| Self::from_coordinates(left, top, right, bottom))
    }

    /// Returns `true` if the interiors of the two rectangles overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Returns `true` if `point` is strictly above the top edge.
    #[must_use]
    pub fn is_above(&self, point: Vec2) -> bool {
        point.y < self.top
    }

    /// Returns `true` if `point` is strictly below the bottom edge.
    #[must_use]
    pub fn is_below(&self, point: Vec2) -> bool {
        point.y > self.bottom()
    }

    /// Returns `true` if `point` is strictly left of the left edge.
    #[must_use]
    pub fn is_on_the_left(&self, point: Vec2) -> bool {
        point.x < self.left
    }

    /// Returns `true` if `point` is strictly right of the right edge.
    #[must_use]
    pub fn is_on_the_right(&self, point: Vec2) -> bool {
        point.x > self.right()
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Corner nearest to `point`.
    #[must_use]
    pub fn nearest_corner(&self, point: Vec2) -> Vec2 {
        let x = if point.x - self.left < self.right() - point.x {
            self.left
        } else {
            self.right()
        };
        let y = if point.y - self.top < self.bottom() - point.y {
            self.top
        } else {
            self.bottom()
        };
        Vec2::new(x, y)
    }

    /// The four corners, clockwise from the top-left.
    #[must_use]
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.top),
            Vec2::new(self.right(), self.top),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left, self.bottom()),
        ]
    }

    /// Integer rectangle with every component truncated toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_int_rect(&self) -> IntRect {
        IntRect::new(
            self.left as i32,
            self.top as i32,
            self.width as i32,
            self.height as i32,
        )
    }
}

/// Axis-aligned rectangle with integer coordinates (pixel regions).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntRect {
    /// X coordinate of the left edge.
    pub left: i32,
    /// Y coordinate of the top edge.
    pub top: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl IntRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Returns `true` if `other` lies entirely within this rectangle (edges inclusive).
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Lossy conversion to a float rectangle.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_float_rect(&self) -> FloatRect {
        FloatRect::new(
            self.left as f32,
            self.top as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = FloatRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::ZERO));
        assert!(r.contains(Vec2::new(9.99, 9.99)));
        assert!(!r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn contains_tolerates_negative_size() {
        let r = FloatRect::new(10.0, 10.0, -10.0, -10.0);
        assert!(r.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = FloatRect::new(0.0, 0.0, 10.0, 10.0);
        let b = FloatRect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn intersection_is_overlap_region() {
        let a = FloatRect::new(0.0, 0.0, 10.0, 10.0);
        let b = FloatRect::new(5.0, -5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Some(FloatRect::new(5.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn from_points_spans_extremes() {
        let r = FloatRect::from_points(&[
            Vec2::new(1.0, 5.0),
            Vec2::new(-2.0, 3.0),
            Vec2::new(4.0, -1.0),
        ]);
        assert_eq!(r, FloatRect::new(-2.0, -1.0, 6.0, 6.0));
        assert_eq!(FloatRect::from_points(&[]), FloatRect::EMPTY);
    }

    #[test]
    fn nearest_corner_picks_closest_sides() {
        let r = FloatRect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.nearest_corner(Vec2::new(1.0, 9.0)), Vec2::new(0.0, 10.0));
        assert_eq!(r.nearest_corner(Vec2::new(12.0, -3.0)), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn int_rect_containment() {
        let atlas = IntRect::new(0, 0, 64, 64);
        assert!(atlas.contains_rect(&IntRect::new(32, 32, 32, 32)));
        assert!(!atlas.contains_rect(&IntRect::new(48, 0, 32, 16)));
    }
}
