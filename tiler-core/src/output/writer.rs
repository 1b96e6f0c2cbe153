//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use tile_grid::TileCoord;

/// File extension of encoded tiles
pub const TILE_EXTENSION: &str = "png";

/// Relative path of a tile: `{zoom}/{x}/{y}.png`
pub fn tile_path(tile: &TileCoord) -> String {
    format!("{}/{}/{}.{}", tile.zoom, tile.x, tile.y, TILE_EXTENSION)
}

pub trait Writer {
    fn info(&self) -> String;
    /// Create the output root
    fn prepare(&self) -> Result<(), io::Error>;
    /// Write `obj` to `path`, relative to the output root
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error>;
}

/// Discards all tiles (dry run)
#[derive(Clone)]
pub struct Nooutput;

impl Writer for Nooutput {
    fn info(&self) -> String {
        "Dry run, no tiles written".to_string()
    }
    fn prepare(&self) -> Result<(), io::Error> {
        Ok(())
    }
    #[allow(unused_variables)]
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        Ok(())
    }
}
