// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Sub-rectangles of a texture atlas.
//!
//! The atlas itself is just a pixel size here; pixel data stays with
//! whichever renderer uploads it. Each distinct rectangle is assigned a
//! stable [`RegionId`] the first time it is requested and served from the
//! cache afterwards.

use kyanite_math::{FloatRect, IntRect};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::trace;

/// Identifier of a cached atlas region, unique within one atlas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

/// A cached atlas sub-rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AtlasRegion {
    /// Stable identifier.
    pub id: RegionId,
    /// Pixel rectangle inside the atlas.
    pub bounds: IntRect,
    /// Same rectangle in normalized `[0, 1]` texture coordinates.
    pub uv: FloatRect,
}

/// Failure to resolve an atlas region.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AtlasError {
    /// The end corner lies before the start corner on some axis.
    #[error("inverted region: end ({end_x}, {end_y}) precedes start ({start_x}, {start_y})")]
    InvertedRange {
        /// Requested start x.
        start_x: i32,
        /// Requested start y.
        start_y: i32,
        /// Requested end x.
        end_x: i32,
        /// Requested end y.
        end_y: i32,
    },
    /// The region extends past the atlas edges.
    #[error(
        "region ({start_x}, {start_y})..({end_x}, {end_y}) lies outside the {width}x{height} atlas"
    )]
    OutOfBounds {
        /// Requested start x.
        start_x: i32,
        /// Requested start y.
        start_y: i32,
        /// Requested end x.
        end_x: i32,
        /// Requested end y.
        end_y: i32,
        /// Atlas width in pixels.
        width: i32,
        /// Atlas height in pixels.
        height: i32,
    },
    /// A grid cell whose pixel coordinates do not fit in `i32`.
    #[error("tile ({x}, {y}) of {tile_width}x{tile_height} px is not addressable")]
    TileOverflow {
        /// Column index.
        x: i32,
        /// Row index.
        y: i32,
        /// Tile width in pixels.
        tile_width: i32,
        /// Tile height in pixels.
        tile_height: i32,
    },
}

/// Region cache over an atlas of known pixel size.
#[derive(Debug)]
pub struct TextureAtlas {
    bounds: IntRect,
    cache: FxHashMap<IntRect, AtlasRegion>,
    next_id: u32,
}

impl TextureAtlas {
    /// Creates an empty cache for a `width`×`height` atlas.
    ///
    /// Dimensions above `i32::MAX` are clamped.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            bounds: IntRect::new(0, 0, w, h),
            cache: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Atlas size in pixels.
    #[must_use]
    pub const fn size(&self) -> (i32, i32) {
        (self.bounds.width, self.bounds.height)
    }

    /// Number of distinct regions handed out so far.
    #[must_use]
    pub fn cached_regions(&self) -> usize {
        self.cache.len()
    }

    /// Region spanning `[start_x, end_x) × [start_y, end_y)` in pixels.
    pub fn get(
        &mut self,
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
    ) -> Result<AtlasRegion, AtlasError> {
        if end_x < start_x || end_y < start_y {
            return Err(AtlasError::InvertedRange {
                start_x,
                start_y,
                end_x,
                end_y,
            });
        }
        let out_of_bounds = AtlasError::OutOfBounds {
            start_x,
            start_y,
            end_x,
            end_y,
            width: self.bounds.width,
            height: self.bounds.height,
        };
        // A span wider than i32::MAX cannot fit an atlas whose sides are at most i32::MAX.
        let (Some(w), Some(h)) = (end_x.checked_sub(start_x), end_y.checked_sub(start_y)) else {
            return Err(out_of_bounds);
        };
        let region = IntRect::new(start_x, start_y, w, h);
        if let Some(hit) = self.cache.get(&region) {
            return Ok(*hit);
        }
        if !self.bounds.contains_rect(&region) {
            return Err(out_of_bounds);
        }

        let id = RegionId(self.next_id);
        self.next_id += 1;
        let entry = AtlasRegion {
            id,
            bounds: region,
            uv: self.normalize(&region),
        };
        trace!(?id, ?region, "atlas cache miss");
        self.cache.insert(region, entry);
        Ok(entry)
    }

    #[allow(clippy::cast_precision_loss)]
    fn normalize(&self, region: &IntRect) -> FloatRect {
        let w = self.bounds.width.max(1) as f32;
        let h = self.bounds.height.max(1) as f32;
        let r = region.to_float_rect();
        FloatRect::new(r.left / w, r.top / h, r.width / w, r.height / h)
    }

    /// Cell `(x, y)` of a grid of `width`×`height` tiles.
    pub fn get_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<AtlasRegion, AtlasError> {
        let overflow = AtlasError::TileOverflow {
            x,
            y,
            tile_width: width,
            tile_height: height,
        };
        let corner = |i: i32, size: i32| -> Option<(i32, i32)> {
            let start = i.checked_mul(size)?;
            Some((start, start.checked_add(size)?))
        };
        let (Some((start_x, end_x)), Some((start_y, end_y))) = (corner(x, width), corner(y, height))
        else {
            return Err(overflow);
        };
        self.get(start_x, start_y, end_x, end_y)
    }

    fn offset_cell(
        origin: (i32, i32),
        dx: i32,
        dy: i32,
        tile: (i32, i32),
    ) -> Result<(i32, i32), AtlasError> {
        match (origin.0.checked_add(dx), origin.1.checked_add(dy)) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(AtlasError::TileOverflow {
                x: origin.0,
                y: origin.1,
                tile_width: tile.0,
                tile_height: tile.1,
            }),
        }
    }

    /// `count` consecutive tiles to the right of cell `(start_x, start_y)`.
    pub fn get_row(
        &mut self,
        start_x: i32,
        start_y: i32,
        width: i32,
        height: i32,
        count: i32,
    ) -> Result<Vec<AtlasRegion>, AtlasError> {
        (0..count)
            .map(|i| {
                let (x, y) = Self::offset_cell((start_x, start_y), i, 0, (width, height))?;
                self.get_rect(x, y, width, height)
            })
            .collect()
    }

    /// `count` consecutive tiles below cell `(start_x, start_y)`.
    pub fn get_column(
        &mut self,
        start_x: i32,
        start_y: i32,
        width: i32,
        height: i32,
        count: i32,
    ) -> Result<Vec<AtlasRegion>, AtlasError> {
        (0..count)
            .map(|i| {
                let (x, y) = Self::offset_cell((start_x, start_y), 0, i, (width, height))?;
                self.get_rect(x, y, width, height)
            })
            .collect()
    }

    /// A `count_x`×`count_y` block of tiles starting at cell `origin`,
    /// indexed `[x][y]`.
    pub fn get_matrix(
        &mut self,
        origin: (i32, i32),
        tile: (i32, i32),
        count_x: i32,
        count_y: i32,
    ) -> Result<Vec<Vec<AtlasRegion>>, AtlasError> {
        let (_, start_y) = origin;
        let (width, height) = tile;
        (0..count_x)
            .map(|x| {
                let (column, _) = Self::offset_cell(origin, x, 0, tile)?;
                self.get_column(column, start_y, width, height, count_y)
            })
            .collect()
    }
}
