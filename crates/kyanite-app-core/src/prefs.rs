// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved defaults for Kyanite tools.

use kyanite_geom::shape::{DEFAULT_CIRCLE_POINTS, MAX_POINT_COUNT};
use kyanite_geom::CollisionAlgorithm;
use serde::{Deserialize, Serialize};

/// Every preference section, as loaded from the prefs document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KyanitePrefs {
    /// Defaults for `kyanite collide`.
    pub collision: CollisionPrefs,
}

/// Preferences consulted when a command-line flag is absent.
///
/// Missing fields take their defaults, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionPrefs {
    /// Narrow-phase algorithm.
    pub algorithm: CollisionAlgorithm,
    /// Vertex count for circles that do not name one.
    pub circle_point_count: usize,
    /// Log at debug level.
    pub verbose: bool,
}

impl CollisionPrefs {
    /// Section name inside the prefs document.
    pub const SECTION: &'static str = "collision";

    /// Checks values serde cannot: the circle vertex count must describe a
    /// usable outline.
    pub fn validate(&self) -> Result<(), String> {
        if (3..=MAX_POINT_COUNT).contains(&self.circle_point_count) {
            Ok(())
        } else {
            Err(format!(
                "circle_point_count {} outside 3..={MAX_POINT_COUNT}",
                self.circle_point_count
            ))
        }
    }
}

impl Default for CollisionPrefs {
    fn default() -> Self {
        Self {
            algorithm: CollisionAlgorithm::Aabb,
            circle_point_count: DEFAULT_CIRCLE_POINTS,
            verbose: false,
        }
    }
}
