// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::vec2::Vec2;

/// Axis a collision or movement acts along.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
    /// Both axes at once (diagonals, or already-overlapping bodies).
    Both,
}

/// The eight compass directions. North is `-y` (screen up).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Up.
    North,
    /// Up-right.
    NorthEast,
    /// Right.
    East,
    /// Down-right.
    SouthEast,
    /// Down.
    South,
    /// Down-left.
    SouthWest,
    /// Left.
    West,
    /// Up-left.
    NorthWest,
}

impl Direction {
    /// Axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::North | Self::South => Axis::Y,
            Self::East | Self::West => Axis::X,
            Self::NorthEast | Self::SouthEast | Self::SouthWest | Self::NorthWest => Axis::Both,
        }
    }

    /// Direction rotated by 180°.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }

    /// Unit-step offset (`-1`, `0` or `1` per component; diagonals are not normalized).
    #[must_use]
    pub const fn offset(self) -> Vec2 {
        match self {
            Self::North => Vec2::new(0.0, -1.0),
            Self::NorthEast => Vec2::new(1.0, -1.0),
            Self::East => Vec2::new(1.0, 0.0),
            Self::SouthEast => Vec2::new(1.0, 1.0),
            Self::South => Vec2::new(0.0, 1.0),
            Self::SouthWest => Vec2::new(-1.0, 1.0),
            Self::West => Vec2::new(-1.0, 0.0),
            Self::NorthWest => Vec2::new(-1.0, -1.0),
        }
    }
}
