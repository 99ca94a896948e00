// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use kyanite_math::FloatRect;
use tracing::debug;

use crate::collision::aabb_intersect;

/// Candidate-pair finder for scenes of placed shapes.
///
/// Shapes are registered under caller ids with their world-space bounds.
/// `pairs` lists every two ids whose bounds overlap, each pair written low id
/// first, the whole list ascending. The same set of proxies always yields the
/// same list, whatever order they were registered in.
pub trait BroadPhase {
    /// Registers `id` with `bounds`, replacing any bounds it had.
    fn upsert(&mut self, id: usize, bounds: FloatRect);
    /// Forgets `id`; unknown ids are ignored.
    fn remove(&mut self, id: usize);
    /// Overlapping id pairs in ascending `(low, high)` order.
    fn pairs(&self) -> Vec<(usize, usize)>;
}

/// Bounds keyed by id, tested all against all.
///
/// Fine for the scene sizes the CLI handles. Each proxy is compared only
/// with the ids after it in the map, which gives ordered output for free.
#[derive(Debug, Default)]
pub struct AabbTree {
    items: BTreeMap<usize, FloatRect>,
}

impl AabbTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of proxies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when no proxies are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounds stored for `id`.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<FloatRect> {
        self.items.get(&id).copied()
    }
}

impl BroadPhase for AabbTree {
    fn upsert(&mut self, id: usize, bounds: FloatRect) {
        self.items.insert(id, bounds);
    }

    fn remove(&mut self, id: usize) {
        self.items.remove(&id);
    }

    fn pairs(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (&low, bounds) in &self.items {
            let later = self.items.range((Excluded(low), Unbounded));
            out.extend(
                later
                    .filter(|(_, other)| aabb_intersect(bounds, other))
                    .map(|(&high, _)| (low, high)),
            );
        }
        debug!(proxies = self.items.len(), pairs = out.len(), "broad-phase sweep");
        out
    }
}
