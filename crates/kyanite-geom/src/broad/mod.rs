// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Cheap candidate filtering before the narrow phase.
//!
//! A broad phase only answers "which bounding boxes overlap". Each pair it
//! returns still goes through [`crate::collision::intersects`]. Overlap here
//! uses [`crate::collision::aabb_intersect`], so boxes that merely touch are
//! never paired.

/// Id-keyed all-pairs broad phase.
pub mod aabb_tree;

pub use aabb_tree::{AabbTree, BroadPhase};
