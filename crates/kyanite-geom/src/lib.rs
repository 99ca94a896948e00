// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    rust_2018_idioms,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![doc = r"Geometry services for Kyanite.

This crate provides:
- Transformables with a lazily cached affine matrix (`BasicTransformable`).
- Rectangle, circle and convex polygon shapes (`Shape`).
- AABB and edge-pair collision checks (`collision`).
- Velocity-based sweep helpers for moving bodies, with gravity (`sweep`).
- A minimal broad-phase trait and an AABB-based pairing structure.
- Texture-atlas region caching (`TextureAtlas`).

Design notes:
- Single-threaded: cached matrices live in `Cell`s, so cached types are `!Sync`.
- Float32 throughout, matching `kyanite-math`.
- Overlap is strict: rectangles that only touch do not collide.
"]

/// Texture-atlas sub-rectangle cache.
pub mod atlas;
/// Broad-phase pairing.
pub mod broad;
/// Narrow-phase collision checks.
pub mod collision;
/// Rectangle, circle and convex shapes.
pub mod shape;
/// Velocity-based contact prediction and resolution.
pub mod sweep;
/// Position/rotation/scale/origin with a cached matrix.
pub mod transformable;

pub use atlas::{AtlasError, AtlasRegion, RegionId, TextureAtlas};
pub use collision::{aabb_intersect, edge_intersect, intersects, Collider, CollisionAlgorithm};
pub use shape::{Shape, ShapeKind};
pub use sweep::{GravityBody, GravityShape, MovingBody, MovingShape};
pub use transformable::{BasicTransformable, Transformable};
