//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid iterators

use crate::grid::{LevelGrid, TileCoord};

/// Level-by-level iterator
///
/// Visits the tiles of each level row by row. Empty levels are skipped.
pub struct GridIterator {
    levels: Vec<LevelGrid>,
    level: usize,
    x: u32,
    y: u32,
}

impl GridIterator {
    pub fn new(levels: Vec<LevelGrid>) -> GridIterator {
        GridIterator {
            levels,
            level: 0,
            x: 0,
            y: 0,
        }
    }
}

impl Iterator for GridIterator {
    type Item = TileCoord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let limit = self.levels.get(self.level)?;
            if limit.is_empty() || self.y >= limit.rows {
                self.level += 1;
                self.x = 0;
                self.y = 0;
                continue;
            }
            let current = TileCoord {
                zoom: limit.zoom,
                x: self.x,
                y: self.y,
            };
            self.x += 1;
            if self.x >= limit.cols {
                self.x = 0;
                self.y += 1;
            }
            return Some(current);
        }
    }
}

#[test]
fn test_level_iter() {
    use crate::grid::{Extent, Grid};
    let grid = Grid::new(400, Extent::new(800.0, 400.0));
    let cells = grid
        .levels(0, 1)
        .into_iter()
        .flat_map(|level| level.tiles())
        .map(|c| (c.zoom, c.x, c.y))
        .collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![
            (0, 0, 0),
            (0, 1, 0),
            (1, 0, 0),
            (1, 1, 0),
            (1, 2, 0),
            (1, 3, 0),
            (1, 0, 1),
            (1, 1, 1),
            (1, 2, 1),
            (1, 3, 1),
        ]
    );

    let griditer = GridIterator::new(grid.levels(0, 1));
    assert_eq!(griditer.count(), 10);
}

#[test]
fn test_empty_levels() {
    use crate::grid::{Extent, Grid};

    // no levels at all
    let griditer = GridIterator::new(Vec::new());
    assert_eq!(griditer.count(), 0);

    // degenerate extent
    let grid = Grid::new(256, Extent::new(0.0, 100.0));
    let griditer = GridIterator::new(grid.levels(-2, 3));
    assert_eq!(griditer.count(), 0);

    // empty level between non-empty levels
    let mut levels = Grid::new(256, Extent::new(300.0, 300.0)).levels(0, 1);
    levels.insert(
        1,
        LevelGrid {
            zoom: 7,
            cols: 5,
            rows: 0,
            source_tile_size: 1.0,
            scale: 1.0,
        },
    );
    let zooms = GridIterator::new(levels)
        .map(|c| c.zoom)
        .collect::<Vec<_>>();
    assert_eq!(zooms, vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
}
