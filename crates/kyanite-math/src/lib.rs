// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"2D math primitives for Kyanite.

This crate provides:
- Two-component vectors (`Vec2`).
- Affine 3×3 transforms (`Transform2D`) with inversion and composition.
- Axis-aligned rectangles (`FloatRect`, `IntRect`) and line segments (`FloatLine`).
- Compass directions and collision axes (`Direction`, `Axis`).
- Degree/radian helpers and rotation normalization (`angle`).

Design notes:
- Float32 throughout; every type is `Copy` and immutable once built.
- Degenerate inputs follow IEEE-754 semantics; nothing is silently clamped.
"]
#![forbid(unsafe_code)]

/// Degree/radian conversion and rotation normalization.
pub mod angle;
/// Compass directions and the axes they act on.
pub mod direction;
/// Line segments.
pub mod line;
/// Float and integer axis-aligned rectangles.
pub mod rect;
/// Affine 3×3 transforms.
pub mod transform;
/// Two-component vectors.
pub mod vec2;

pub use angle::normalize_degrees;
pub use direction::{Axis, Direction};
pub use line::FloatLine;
pub use rect::{FloatRect, IntRect};
pub use transform::Transform2D;
pub use vec2::Vec2;
