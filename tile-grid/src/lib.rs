//! A library for tile pyramid calculations
//!
//! A source image with a continuous extent is cut into square tiles of a fixed pixel
//! size. At zoom level `z` one tile covers `tile_size / 2^z` source units.
//!
//! ## Level grids
//!
//! ```rust
//! use tile_grid::{Extent, Grid};
//!
//! let grid = Grid::new(512, Extent::new(1000.0, 1000.0));
//! let level = grid.level(1);
//! assert_eq!(level.source_tile_size, 256.0);
//! assert_eq!((level.cols, level.rows), (4, 4));
//! assert_eq!(grid.tile_count(0, 1), 4 + 16);
//! ```
//!
//! ## Grid iterators
//!
//! ```rust
//! use tile_grid::{Extent, Grid, GridIterator};
//!
//! let grid = Grid::new(400, Extent::new(800.0, 400.0));
//! let griditer = GridIterator::new(grid.levels(0, 1));
//! for tile in griditer {
//!     println!("Tile {}/{}/{}", tile.zoom, tile.x, tile.y);
//! }
//! ```

mod grid;
mod grid_iterator;

pub use grid::{Extent, Grid, LevelGrid, TileCoord, TileWindow};
pub use grid_iterator::GridIterator;
