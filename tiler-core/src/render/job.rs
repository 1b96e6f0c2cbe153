//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use resvg::tiny_skia::Transform;
use tile_grid::{LevelGrid, TileCoord};

/// One tile to render, consumed by exactly one render execution
#[derive(PartialEq, Clone, Debug)]
pub struct TileJob {
    /// Index of the source image in the run
    pub image: usize,
    pub tile: TileCoord,
    /// Source position of the tile origin
    pub src_x: f64,
    pub src_y: f64,
    /// Output pixels per source unit
    pub scale_x: f64,
    pub scale_y: f64,
}

impl TileJob {
    pub fn new(image: usize, level: &LevelGrid, tile: TileCoord, tile_size: u32) -> TileJob {
        let (src_x, src_y) = level.tile_origin(tile.x, tile.y);
        let scale = level.pixel_scale(tile_size);
        TileJob {
            image,
            tile,
            src_x,
            src_y,
            scale_x: scale,
            scale_y: scale,
        }
    }
    /// Source to tile transform: the tile's source window lands at the pixmap origin
    /// and is stretched to fill the tile.
    pub fn transform(&self) -> Transform {
        Transform::from_row(
            self.scale_x as f32,
            0.0,
            0.0,
            self.scale_y as f32,
            (-self.src_x * self.scale_x) as f32,
            (-self.src_y * self.scale_y) as f32,
        )
    }
}
