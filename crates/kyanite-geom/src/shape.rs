// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::cell::Cell;
use core::f32::consts::{FRAC_PI_2, TAU};

use kyanite_math::{FloatLine, FloatRect, Transform2D, Vec2};

use crate::collision::{self, Collider, CollisionAlgorithm};
use crate::transformable::{BasicTransformable, Transformable};

/// Points used to approximate a circle when none is requested.
pub const DEFAULT_CIRCLE_POINTS: usize = 30;

/// Largest outline accepted from untrusted input (scene files, prefs).
pub const MAX_POINT_COUNT: usize = 1 << 16;

/// Local-space geometry of a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Rectangle with its top-left corner at the local origin.
    Rectangle {
        /// Width and height.
        size: Vec2,
    },
    /// Regular polygon inscribed in a circle whose bounding box starts at the local origin.
    Circle {
        /// Circle radius.
        radius: f32,
        /// Number of outline vertices.
        point_count: usize,
    },
    /// Convex polygon given by its vertices in order.
    Convex {
        /// Outline vertices.
        points: Vec<Vec2>,
    },
}

impl ShapeKind {
    /// Outline vertices in local space.
    ///
    /// Circle vertices start at the top and run clockwise on screen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn local_points(&self) -> Vec<Vec2> {
        match self {
            Self::Rectangle { size } => vec![
                Vec2::ZERO,
                Vec2::new(size.x, 0.0),
                *size,
                Vec2::new(0.0, size.y),
            ],
            Self::Circle {
                radius,
                point_count,
            } => (0..*point_count)
                .map(|i| {
                    let angle = i as f32 * TAU / *point_count as f32 - FRAC_PI_2;
                    let (sin, cos) = angle.sin_cos();
                    Vec2::new(radius + cos * radius, radius + sin * radius)
                })
                .collect(),
            Self::Convex { points } => points.clone(),
        }
    }
}

/// A transformable outline: rectangle, circle or convex polygon.
///
/// Global bounds are cached and dropped whenever the placement or the
/// geometry changes.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    placement: BasicTransformable,
    centered: bool,
    global_bounds: Cell<Option<FloatRect>>,
}

impl Shape {
    /// Wraps `kind` with an identity placement.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            placement: BasicTransformable::new(),
            centered: false,
            global_bounds: Cell::new(None),
        }
    }

    /// Rectangle of the given size.
    #[must_use]
    pub fn rectangle(size: Vec2) -> Self {
        Self::new(ShapeKind::Rectangle { size })
    }

    /// Circle with [`DEFAULT_CIRCLE_POINTS`] vertices.
    #[must_use]
    pub fn circle(radius: f32) -> Self {
        Self::circle_with_points(radius, DEFAULT_CIRCLE_POINTS)
    }

    /// Circle with an explicit vertex count.
    #[must_use]
    pub fn circle_with_points(radius: f32, point_count: usize) -> Self {
        Self::new(ShapeKind::Circle {
            radius,
            point_count,
        })
    }

    /// Convex polygon through `points`.
    #[must_use]
    pub fn convex(points: Vec<Vec2>) -> Self {
        Self::new(ShapeKind::Convex { points })
    }

    /// Local geometry.
    #[must_use]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Replaces the local geometry, re-centering the origin when centered.
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
        if self.centered {
            self.recenter();
        }
        *self.global_bounds.get_mut() = None;
    }

    /// Keeps the origin at the centre of the local bounds, now and after
    /// every geometry change.
    pub fn set_centered(&mut self, centered: bool) {
        self.centered = centered;
        if centered {
            self.recenter();
        }
    }

    /// Returns `true` if the origin follows the centre of the local bounds.
    #[must_use]
    pub fn is_centered(&self) -> bool {
        self.centered
    }

    fn recenter(&mut self) {
        let center = self.local_bounds().center();
        self.set_origin(center);
    }

    /// Number of outline vertices.
    #[must_use]
    pub fn point_count(&self) -> usize {
        match &self.kind {
            ShapeKind::Rectangle { .. } => 4,
            ShapeKind::Circle { point_count, .. } => *point_count,
            ShapeKind::Convex { points } => points.len(),
        }
    }

    /// Outline vertices in local space.
    #[must_use]
    pub fn local_points(&self) -> Vec<Vec2> {
        self.kind.local_points()
    }

    /// Outline vertices in world space.
    #[must_use]
    pub fn points(&self) -> Vec<Vec2> {
        let t = self.transform();
        self.local_points()
            .into_iter()
            .map(|p| t.transform_point(p))
            .collect()
    }

    /// Bounds in local space, ignoring the placement.
    #[must_use]
    pub fn local_bounds(&self) -> FloatRect {
        FloatRect::from_points(&self.local_points())
    }

    /// Bounds in world space.
    #[must_use]
    pub fn global_bounds(&self) -> FloatRect {
        if let Some(b) = self.global_bounds.get() {
            return b;
        }
        let b = self.transform().transform_rect(&self.local_bounds());
        self.global_bounds.set(Some(b));
        b
    }

    /// Closed outline in world space; edge `i` joins vertex `i` to `i + 1`.
    #[must_use]
    pub fn edges(&self) -> Vec<FloatLine> {
        let points = self.points();
        let n = points.len();
        (0..n)
            .map(|i| FloatLine::new(points[i], points[(i + 1) % n]))
            .collect()
    }

    /// Tests this shape against `other` with the chosen algorithm.
    #[must_use]
    pub fn intersects(&self, other: &Self, algorithm: CollisionAlgorithm) -> bool {
        collision::intersects(self, other, algorithm)
    }
}

impl Transformable for Shape {
    fn position(&self) -> Vec2 {
        self.placement.position()
    }

    fn set_position(&mut self, position: Vec2) {
        self.placement.set_position(position);
        *self.global_bounds.get_mut() = None;
    }

    fn rotation(&self) -> f32 {
        self.placement.rotation()
    }

    fn set_rotation(&mut self, angle: f32) {
        self.placement.set_rotation(angle);
        *self.global_bounds.get_mut() = None;
    }

    fn scale(&self) -> Vec2 {
        self.placement.scale()
    }

    fn set_scale(&mut self, factors: Vec2) {
        self.placement.set_scale(factors);
        *self.global_bounds.get_mut() = None;
    }

    fn origin(&self) -> Vec2 {
        self.placement.origin()
    }

    fn set_origin(&mut self, origin: Vec2) {
        self.placement.set_origin(origin);
        *self.global_bounds.get_mut() = None;
    }

    fn transform(&self) -> Transform2D {
        self.placement.transform()
    }

    fn inverse_transform(&self) -> Transform2D {
        self.placement.inverse_transform()
    }
}

impl Collider for Shape {
    fn global_bounds(&self) -> FloatRect {
        Shape::global_bounds(self)
    }

    fn edges(&self) -> Vec<FloatLine> {
        Shape::edges(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_rect(a: FloatRect, b: FloatRect) {
        let close = |x: f32, y: f32| (x - y).abs() < 1e-4;
        assert!(
            close(a.left, b.left)
                && close(a.top, b.top)
                && close(a.width, b.width)
                && close(a.height, b.height),
            "{a:?} vs {b:?}"
        );
    }

    #[test]
    fn rectangle_bounds_follow_position() {
        let mut s = Shape::rectangle(Vec2::new(10.0, 20.0));
        assert_eq!(s.local_bounds(), FloatRect::new(0.0, 0.0, 10.0, 20.0));
        s.set_position(Vec2::new(5.0, 5.0));
        assert_eq!(s.global_bounds(), FloatRect::new(5.0, 5.0, 10.0, 20.0));
    }

    #[test]
    fn centered_rotation_keeps_center() {
        let mut s = Shape::rectangle(Vec2::new(10.0, 10.0));
        s.set_centered(true);
        s.set_position(Vec2::new(50.0, 50.0));
        s.set_rotation(45.0);
        let h = 50.0_f32.sqrt();
        approx_rect(
            s.global_bounds(),
            FloatRect::new(50.0 - h, 50.0 - h, 2.0 * h, 2.0 * h),
        );
    }

    #[test]
    fn recenters_when_geometry_changes() {
        let mut s = Shape::rectangle(Vec2::new(10.0, 10.0));
        s.set_centered(true);
        assert_eq!(s.origin(), Vec2::new(5.0, 5.0));
        s.set_kind(ShapeKind::Rectangle {
            size: Vec2::new(4.0, 8.0),
        });
        assert_eq!(s.origin(), Vec2::new(2.0, 4.0));
    }

    #[test]
    fn circle_starts_at_top() {
        let s = Shape::circle_with_points(5.0, 4);
        let p = s.local_points();
        assert_eq!(p.len(), 4);
        assert!((p[0].x - 5.0).abs() < 1e-5 && p[0].y.abs() < 1e-5, "{p:?}");
        assert!((p[1].x - 10.0).abs() < 1e-5 && (p[1].y - 5.0).abs() < 1e-5, "{p:?}");
    }

    #[test]
    fn edges_close_the_loop() {
        let s = Shape::convex(vec![
            Vec2::ZERO,
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 4.0),
        ]);
        let e = s.edges();
        assert_eq!(e.len(), 3);
        assert_eq!(e[2], FloatLine::new(Vec2::new(0.0, 4.0), Vec2::ZERO));
    }

    #[test]
    fn edges_algorithm_rejects_corner_miss() {
        // Triangles whose bounding boxes overlap but whose hypotenuses face away.
        let a = Shape::convex(vec![
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
        ]);
        let mut b = Shape::convex(vec![
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        b.move_by(Vec2::new(2.0, 2.0));
        assert!(a.intersects(&b, CollisionAlgorithm::Aabb));
        assert!(!a.intersects(&b, CollisionAlgorithm::Edges));
    }

    #[test]
    fn edges_algorithm_detects_crossing_outlines() {
        let a = Shape::rectangle(Vec2::new(10.0, 10.0));
        let mut b = Shape::circle(4.0);
        b.set_position(Vec2::new(7.0, 1.0));
        assert!(a.intersects(&b, CollisionAlgorithm::Edges));
    }
}
