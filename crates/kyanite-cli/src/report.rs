// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Text and JSON renderings of command results.

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use kyanite_geom::CollisionAlgorithm;
use kyanite_math::Transform2D;
use serde::Serialize;

/// Result of `kyanite transform`.
#[derive(Debug, Serialize)]
pub struct TransformReport {
    /// Local-to-parent matrix, row-major.
    pub matrix: [[f32; 3]; 3],
    /// Parent-to-local matrix, row-major.
    pub inverse: [[f32; 3]; 3],
}

impl TransformReport {
    /// Captures a transform and its inverse.
    pub fn new(transform: &Transform2D, inverse: &Transform2D) -> Self {
        Self {
            matrix: rows(transform),
            inverse: rows(inverse),
        }
    }

    /// Two stacked tables.
    pub fn to_text(&self) -> String {
        format!(
            "matrix\n{}\ninverse\n{}",
            matrix_table(&self.matrix),
            matrix_table(&self.inverse)
        )
    }
}

// `+ 0.0` folds negative zero so output is stable across sign-of-zero noise.
fn rows(t: &Transform2D) -> [[f32; 3]; 3] {
    let m = t.to_array();
    [
        [m[0] + 0.0, m[1] + 0.0, m[2] + 0.0],
        [m[3] + 0.0, m[4] + 0.0, m[5] + 0.0],
        [m[6] + 0.0, m[7] + 0.0, m[8] + 0.0],
    ]
}

fn matrix_table(m: &[[f32; 3]; 3]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    for row in m {
        table.add_row(
            row.iter()
                .map(|v| Cell::new(format!("{v:.4}")).set_alignment(CellAlignment::Right)),
        );
    }
    table
}

/// Result of `kyanite collide`.
#[derive(Debug, Serialize)]
pub struct CollideReport {
    /// Narrow-phase algorithm used.
    pub algorithm: CollisionAlgorithm,
    /// Number of shapes in the scene.
    pub shapes: usize,
    /// Pairs whose bounding boxes overlap.
    pub candidates: usize,
    /// Colliding id pairs, `(low, high)` ascending.
    pub pairs: Vec<(usize, usize)>,
}

impl CollideReport {
    /// Pair table plus a one-line summary.
    pub fn to_text(&self) -> String {
        let summary = format!(
            "{} shapes, {} candidate pairs, {} collisions ({:?})",
            self.shapes,
            self.candidates,
            self.pairs.len(),
            self.algorithm
        );
        if self.pairs.is_empty() {
            return summary;
        }
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["a", "b"]);
        for (a, b) in &self.pairs {
            table.add_row(vec![a.to_string(), b.to_string()]);
        }
        format!("{table}\n{summary}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_report_has_no_negative_zero() {
        let t = Transform2D::from_parts(
            kyanite_math::Vec2::ZERO,
            0.0,
            kyanite_math::Vec2::ONE,
            kyanite_math::Vec2::ZERO,
        );
        let report = TransformReport::new(&t, &t.inverse());
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("-0.0"), "{json}");
        assert_eq!(report.matrix, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn empty_collision_report_is_a_summary_line() {
        let report = CollideReport {
            algorithm: CollisionAlgorithm::Aabb,
            shapes: 2,
            candidates: 0,
            pairs: Vec::new(),
        };
        assert_eq!(report.to_text(), "2 shapes, 0 candidate pairs, 0 collisions (Aabb)");
    }
}
