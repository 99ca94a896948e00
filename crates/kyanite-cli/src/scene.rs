// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON scene files: a flat list of placed shapes.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use kyanite_geom::shape::MAX_POINT_COUNT;
use kyanite_geom::{Shape, ShapeKind, Transformable};
use kyanite_math::Vec2;
use serde::Deserialize;

/// Top-level scene document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    /// Shapes in file order.
    pub shapes: Vec<ShapeSpec>,
}

/// One shape entry; transform fields default to the identity placement.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeSpec {
    /// Caller-chosen identifier, unique within the scene.
    pub id: usize,
    /// Geometry.
    pub kind: KindSpec,
    /// Position of the origin.
    #[serde(default)]
    pub position: [f32; 2],
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f32,
    /// Scale factors.
    #[serde(default = "unit_scale")]
    pub scale: [f32; 2],
    /// Local pivot; ignored when `centered` is set.
    #[serde(default)]
    pub origin: [f32; 2],
    /// Pivot around the centre of the local bounds.
    #[serde(default)]
    pub centered: bool,
}

const fn unit_scale() -> [f32; 2] {
    [1.0, 1.0]
}

/// Geometry tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum KindSpec {
    /// Axis-aligned rectangle from the local origin.
    Rectangle {
        /// Width.
        width: f32,
        /// Height.
        height: f32,
    },
    /// Circle approximated by a regular polygon.
    Circle {
        /// Radius.
        radius: f32,
        /// Vertex count; falls back to the configured default.
        #[serde(default)]
        point_count: Option<usize>,
    },
    /// Convex polygon.
    Convex {
        /// Vertices in order.
        points: Vec<[f32; 2]>,
    },
}

impl KindSpec {
    fn into_kind(self, circle_points: usize) -> ShapeKind {
        match self {
            Self::Rectangle { width, height } => ShapeKind::Rectangle {
                size: Vec2::new(width, height),
            },
            Self::Circle {
                radius,
                point_count,
            } => ShapeKind::Circle {
                radius,
                point_count: point_count.unwrap_or(circle_points),
            },
            Self::Convex { points } => ShapeKind::Convex {
                points: points.into_iter().map(Vec2::from).collect(),
            },
        }
    }
}

impl SceneFile {
    /// Reads and parses a scene from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scene {}", path.display()))
    }

    /// Parses a scene from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds placed shapes, rejecting duplicate ids and degenerate outlines.
    pub fn into_shapes(self, circle_points: usize) -> Result<Vec<(usize, Shape)>> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(self.shapes.len());
        for entry in self.shapes {
            if !seen.insert(entry.id) {
                bail!("duplicate shape id {}", entry.id);
            }
            let mut shape = Shape::new(entry.kind.into_kind(circle_points));
            let points = shape.point_count();
            if points < 3 {
                bail!("shape {} needs at least 3 points, has {points}", entry.id);
            }
            if points > MAX_POINT_COUNT {
                bail!(
                    "shape {} has {points} points, more than the {MAX_POINT_COUNT} allowed",
                    entry.id
                );
            }
            shape.set_scale(entry.scale.into());
            shape.set_rotation(entry.rotation);
            if entry.centered {
                shape.set_centered(true);
            } else {
                shape.set_origin(entry.origin.into());
            }
            shape.set_position(entry.position.into());
            out.push((entry.id, shape));
        }
        Ok(out)
    }
}
