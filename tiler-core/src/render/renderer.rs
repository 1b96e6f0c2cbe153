//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::progress::ProgressState;
use crate::output::{tile_path, TileOutput, Writer};
use crate::render::job::TileJob;
use crate::scene::Scene;
use resvg::tiny_skia::Pixmap;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tile_grid::TileCoord;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not allocate {0}x{0} pixel surface")]
    Surface(u32),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("writing {path} failed: {source}")]
    Write { path: String, source: io::Error },
}

/// Successfully written tile
#[derive(Debug)]
pub struct RenderedTile {
    pub tile: TileCoord,
    pub elapsed: Duration,
    pub bytes: usize,
}

/// Renders tiles of one image
///
/// Every job gets its own pixmap. The scene is only read, so one renderer can be
/// shared by all workers of a batch.
pub struct TileRenderer {
    scene: Arc<dyn Scene>,
    output: TileOutput,
    tile_size: u32,
    write_retries: u8,
    progress: Arc<ProgressState>,
}

impl TileRenderer {
    pub fn new(
        scene: Arc<dyn Scene>,
        output: TileOutput,
        tile_size: u32,
        progress: Arc<ProgressState>,
    ) -> TileRenderer {
        TileRenderer {
            scene,
            output,
            tile_size,
            write_retries: 0,
            progress,
        }
    }
    pub fn with_write_retries(mut self, write_retries: u8) -> TileRenderer {
        self.write_retries = write_retries;
        self
    }
    /// Render, encode and write one tile.
    ///
    /// The processed counter advances exactly once, also for failed tiles.
    pub fn render(&self, job: &TileJob) -> Result<RenderedTile, RenderError> {
        let now = Instant::now();
        let result = self.encode(job).and_then(|png| {
            self.write(&job.tile, &png)?;
            Ok(png.len())
        });
        if result.is_err() {
            self.progress.tile_failed();
        }
        self.progress.tile_done();
        let bytes = result?;
        debug!(
            "{}/{}/{} rendered ({} bytes)",
            job.tile.zoom, job.tile.x, job.tile.y, bytes
        );
        Ok(RenderedTile {
            tile: job.tile,
            elapsed: now.elapsed(),
            bytes,
        })
    }
    /// Rasterize one tile into PNG data
    ///
    /// Areas outside the scene stay fully transparent.
    pub fn encode(&self, job: &TileJob) -> Result<Vec<u8>, RenderError> {
        let mut pixmap =
            Pixmap::new(self.tile_size, self.tile_size).ok_or(RenderError::Surface(self.tile_size))?;
        self.scene.draw(job.transform(), &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
    fn write(&self, tile: &TileCoord, png: &[u8]) -> Result<(), RenderError> {
        let path = tile_path(tile);
        let mut attempt = 0;
        loop {
            match self.output.write(&path, png) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.write_retries => {
                    attempt += 1;
                    warn!(
                        "Error writing {}: {} (retry {}/{})",
                        path, e, attempt, self.write_retries
                    );
                }
                Err(source) => return Err(RenderError::Write { path, source }),
            }
        }
    }
}
