// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Narrow-phase collision checks.
//!
//! Two algorithms are available:
//! - [`CollisionAlgorithm::Aabb`]: interval overlap of the global bounding
//!   boxes. O(1); exact only for axis-aligned rectangles.
//! - [`CollisionAlgorithm::Edges`]: AABB pre-test, then pairwise segment
//!   intersection of the outlines. O(n·m) in the edge counts.
//!
//! The edge method reports outlines that cross or touch. A shape lying
//! entirely inside another has no crossing edges and is not reported.

use kyanite_math::{FloatLine, FloatRect};
use tracing::trace;

/// Collision detection strategy for [`intersects`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CollisionAlgorithm {
    /// Axis-aligned bounding box overlap.
    #[default]
    Aabb,
    /// AABB pre-test followed by outline edge intersection.
    Edges,
}

/// Something with a global bounding box and a global outline.
///
/// `edges` is only consulted after the bounding boxes overlap, so
/// implementations may compute it lazily.
pub trait Collider {
    /// Axis-aligned bounds in world space.
    fn global_bounds(&self) -> FloatRect;
    /// Closed outline in world space.
    fn edges(&self) -> Vec<FloatLine>;
}

impl Collider for FloatRect {
    fn global_bounds(&self) -> FloatRect {
        *self
    }

    fn edges(&self) -> Vec<FloatLine> {
        let [a, b, c, d] = self.corners();
        vec![
            FloatLine::new(a, b),
            FloatLine::new(b, c),
            FloatLine::new(c, d),
            FloatLine::new(d, a),
        ]
    }
}

/// Returns `true` if the interiors of `a` and `b` overlap on both axes.
#[must_use]
pub fn aabb_intersect(a: &FloatRect, b: &FloatRect) -> bool {
    a.intersects(b)
}

/// Returns `true` on the first pair of intersecting edges.
#[must_use]
pub fn edge_intersect(a: &[FloatLine], b: &[FloatLine]) -> bool {
    a.iter().any(|e1| b.iter().any(|e2| e1.intersects(e2)))
}

/// Tests two colliders with the requested algorithm.
///
/// Disjoint bounding boxes short-circuit before any edge is built.
pub fn intersects<A, B>(a: &A, b: &B, algorithm: CollisionAlgorithm) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let a_bounds = a.global_bounds();
    let b_bounds = b.global_bounds();
    let Some(overlap) = a_bounds.intersection(&b_bounds) else {
        return false;
    };
    match algorithm {
        CollisionAlgorithm::Aabb => true,
        CollisionAlgorithm::Edges => {
            // Only edges reaching into the shared region can cross each other.
            let a_edges: Vec<FloatLine> = a
                .edges()
                .into_iter()
                .filter(|e| touches(&overlap, e))
                .collect();
            let b_edges: Vec<FloatLine> = b
                .edges()
                .into_iter()
                .filter(|e| touches(&overlap, e))
                .collect();
            trace!(
                a_edges = a_edges.len(),
                b_edges = b_edges.len(),
                "bounds overlap; testing edges"
            );
            edge_intersect(&a_edges, &b_edges)
        }
    }
}

/// Inclusive overlap of the segment's extent with `region`.
fn touches(region: &FloatRect, edge: &FloatLine) -> bool {
    let (p, q) = (edge.point1, edge.point2);
    p.x.min(q.x) <= region.right()
        && p.x.max(q.x) >= region.left
        && p.y.min(q.y) <= region.bottom()
        && p.y.max(q.y) >= region.top
}
