//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//!Tile grids

use crate::grid_iterator::GridIterator;

/// Continuous extent of a source image, in source units
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Extent {
        Extent { width, height }
    }
    /// Zero, negative or non-finite extents cover no tiles at all
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Grid cell address of one output tile
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TileCoord {
    pub zoom: i32,
    pub x: u32,
    pub y: u32,
}

/// Source window covered by a tile, in source units
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TileWindow {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

/// Grid dimensions of one zoom level
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct LevelGrid {
    pub zoom: i32,
    /// Number of tile columns
    pub cols: u32,
    /// Number of tile rows
    pub rows: u32,
    /// Side length of one tile in source units
    pub source_tile_size: f64,
    /// Magnification relative to zoom level 0 (`2^zoom`)
    pub scale: f64,
}

impl LevelGrid {
    pub fn tile_count(&self) -> u64 {
        self.cols as u64 * self.rows as u64
    }
    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }
    /// Source position of the top left corner of a tile
    pub fn tile_origin(&self, xtile: u32, ytile: u32) -> (f64, f64) {
        (
            xtile as f64 * self.source_tile_size,
            ytile as f64 * self.source_tile_size,
        )
    }
    /// Output pixels per source unit for tiles of `tile_size` pixels
    pub fn pixel_scale(&self, tile_size: u32) -> f64 {
        tile_size as f64 / self.source_tile_size
    }
    /// All tile cells of this level, row by row
    pub fn tiles(&self) -> GridIterator {
        GridIterator::new(vec![*self])
    }
}

/// Tile pyramid of one source image
///
/// Zoom level 0 maps one source unit to one output pixel. Every level up doubles the
/// magnification, every level down halves it, so negative zoom levels are valid
/// "zoomed out" levels.
#[derive(Clone, Debug)]
pub struct Grid {
    /// The width and height of an individual tile, in pixels.
    tile_size: u32,
    /// Continuous extent of the source image. The grid origin is its top left corner.
    pub extent: Extent,
}

impl Grid {
    pub fn new(tile_size: u32, extent: Extent) -> Grid {
        Grid { tile_size, extent }
    }
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
    /// Magnification of a zoom level
    pub fn scale(zoom: i32) -> f64 {
        2f64.powi(zoom)
    }
    /// Side length of one tile in source units
    pub fn source_tile_size(&self, zoom: i32) -> f64 {
        self.tile_size as f64 / Grid::scale(zoom)
    }
    /// Columns and rows covering the extent at a zoom level
    pub fn level(&self, zoom: i32) -> LevelGrid {
        let scale = Grid::scale(zoom);
        let source_tile_size = self.tile_size as f64 / scale;
        let (cols, rows) = if self.extent.is_degenerate()
            || !(source_tile_size.is_finite() && source_tile_size > 0.0)
        {
            (0, 0)
        } else {
            (
                (self.extent.width / source_tile_size).ceil() as u32,
                (self.extent.height / source_tile_size).ceil() as u32,
            )
        };
        LevelGrid {
            zoom,
            cols,
            rows,
            source_tile_size,
            scale,
        }
    }
    /// Grids of all levels from `minzoom` to `maxzoom` (inclusive)
    pub fn levels(&self, minzoom: i32, maxzoom: i32) -> Vec<LevelGrid> {
        (minzoom..=maxzoom).map(|zoom| self.level(zoom)).collect()
    }
    /// Number of tiles from `minzoom` to `maxzoom` (inclusive)
    pub fn tile_count(&self, minzoom: i32, maxzoom: i32) -> u64 {
        self.levels(minzoom, maxzoom)
            .iter()
            .map(|level| level.tile_count())
            .sum()
    }
    /// Source window of a given tile, clipped to the image extent
    ///
    /// Tiles in the last row or column may cover less than `source_tile_size`.
    pub fn tile_window(&self, xtile: u32, ytile: u32, zoom: i32) -> TileWindow {
        let size = self.source_tile_size(zoom);
        let minx = xtile as f64 * size;
        let miny = ytile as f64 * size;
        TileWindow {
            minx,
            miny,
            maxx: (minx + size).min(self.extent.width),
            maxy: (miny + size).min(self.extent.height),
        }
    }
}
