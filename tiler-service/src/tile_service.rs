//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::metadata::tiles_json;
use crate::progress_tracker::{ProgressSink, ProgressStyle, ProgressTracker};
use std::cmp;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tile_grid::{Grid, LevelGrid};
use tiler_core::core::progress::{format_duration, ProgressState};
use tiler_core::core::stats::Statistics;
use tiler_core::core::zoom::{ImageZoomSpec, ZoomRangeAllocator};
use tiler_core::core::{ApplicationCfg, Config};
use tiler_core::output::{TileOutput, Writer};
use tiler_core::render::{RenderError, RenderedTile, TileJob, TileRenderer};
use tiler_core::scene::{load_scene, Scene};
use tokio::task;

/// Interval between two progress reports
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Image with its decoded scene. `scene` is `None` for images which failed to load.
pub struct SourceImage {
    pub spec: ImageZoomSpec,
    pub scene: Option<Arc<dyn Scene>>,
}

impl SourceImage {
    pub fn grid(&self, tile_size: u32) -> Option<Grid> {
        self.scene
            .as_ref()
            .map(|scene| Grid::new(tile_size, scene.extent()))
    }
    /// Grid dimensions for all zoom levels of this image
    pub fn levels(&self, tile_size: u32) -> Vec<LevelGrid> {
        match self.grid(tile_size) {
            Some(grid) => grid.levels(self.spec.minzoom, self.spec.maxzoom),
            None => Vec::new(),
        }
    }
    pub fn tile_count(&self, tile_size: u32) -> u64 {
        self.levels(tile_size).iter().map(|l| l.tile_count()).sum()
    }
}

/// Outcome of a generation run
#[derive(Debug)]
pub struct GenerateSummary {
    pub total: u64,
    pub processed: u64,
    pub failed: u64,
    pub skipped_images: usize,
    pub cancelled: bool,
    pub elapsed: Duration,
    pub stats: Statistics,
}

impl fmt::Display for GenerateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cancelled {
            write!(
                f,
                "Tile generation cancelled after {}/{} tiles. Total time: {}.",
                self.processed,
                self.total,
                format_duration(self.elapsed)
            )?;
        } else {
            write!(
                f,
                "Tile generation complete. Total time: {}.",
                format_duration(self.elapsed)
            )?;
        }
        if self.failed > 0 {
            write!(f, " {} tiles failed.", self.failed)?;
        }
        if self.skipped_images > 0 {
            write!(f, " {} images skipped.", self.skipped_images)?;
        }
        Ok(())
    }
}

/// SVG tile pyramid generator
#[derive(Clone)]
pub struct TileService {
    pub images: Vec<ImageZoomSpec>,
    pub output: TileOutput,
    pub tile_size: u32,
    pub workers: usize,
    pub write_retries: u8,
    pub metadata: bool,
    pub system_fonts: bool,
}

impl TileService {
    /// Decode every image once. Images which can't be loaded are kept without scene.
    pub fn load_images(&self) -> Vec<SourceImage> {
        self.images
            .iter()
            .map(|spec| {
                let scene = load_scene(&spec.path, self.system_fonts);
                if let Some(ref scene) = scene {
                    if scene.extent().is_degenerate() {
                        warn!(
                            "'{}' has an empty extent, no tiles will be generated",
                            spec.path.display()
                        );
                    }
                }
                SourceImage {
                    spec: spec.clone(),
                    scene,
                }
            })
            .collect()
    }
    /// Number of tiles over all images and zoom levels
    pub fn tile_count(&self, images: &[SourceImage]) -> u64 {
        images.iter().map(|image| image.tile_count(self.tile_size)).sum()
    }
    /// Render all tiles, reporting progress with the given style
    pub fn generate(&self, progress: ProgressStyle) -> Result<GenerateSummary, String> {
        self.generate_with(|total| progress.sink(total))
    }
    /// Render all tiles, reporting progress to a sink created for the total tile count
    pub fn generate_with<F>(&self, sink: F) -> Result<GenerateSummary, String>
    where
        F: FnOnce(u64) -> Box<dyn ProgressSink>,
    {
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| format!("Couldn't initialize tokio runtime: {}", e))?;
        info!("{}", self.output.info());
        self.output
            .prepare()
            .map_err(|e| format!("Couldn't prepare output: {}", e))?;

        let images = self.load_images();
        let skipped_images = images.iter().filter(|image| image.scene.is_none()).count();
        let total = self.tile_count(&images);
        info!("Total tiles to generate: {}", total);
        if self.metadata {
            self.write_metadata(&images);
        }

        let state = Arc::new(ProgressState::new(total));
        let mut stats = Statistics::new();
        let sink = sink(total);
        rt.block_on(async {
            let interrupt = watch_interrupt(state.clone());
            let tracker = ProgressTracker::start(state.clone(), sink, PROGRESS_INTERVAL);
            for (image_no, image) in images.iter().enumerate() {
                if state.is_cancelled() {
                    break;
                }
                self.generate_image(image_no, image, &state, &mut stats).await;
            }
            tracker.stop().await;
            interrupt.abort();
        });

        Ok(GenerateSummary {
            total,
            processed: state.processed(),
            failed: state.failed(),
            skipped_images,
            cancelled: state.is_cancelled(),
            elapsed: state.elapsed(),
            stats,
        })
    }
    fn write_metadata(&self, images: &[SourceImage]) {
        let json = tiles_json(images, self.tile_size);
        match serde_json::to_vec_pretty(&json) {
            Ok(data) => {
                if let Err(e) = self.output.write("tiles.json", &data) {
                    error!("Error writing tiles.json: {}", e);
                }
            }
            Err(e) => error!("Error serializing tiles.json: {}", e),
        }
    }
    async fn generate_image(
        &self,
        image_no: usize,
        image: &SourceImage,
        state: &Arc<ProgressState>,
        stats: &mut Statistics,
    ) {
        let scene = match image.scene {
            Some(ref scene) => scene.clone(),
            None => return,
        };
        info!(
            "Generating zoom levels {} for '{}'",
            image.spec.range(),
            image.spec.name()
        );
        let renderer = Arc::new(
            TileRenderer::new(scene, self.output.clone(), self.tile_size, state.clone())
                .with_write_retries(self.write_retries),
        );
        for level in image.levels(self.tile_size) {
            if state.is_cancelled() {
                break;
            }
            info!(
                "Zoom level {}: calculated {} columns x {} rows (scale: {})",
                level.zoom, level.cols, level.rows, level.scale
            );
            state.set_zoom(level.zoom);
            self.generate_level(image_no, &level, &renderer, state, stats)
                .await;
        }
    }
    /// Render all tiles of one level. Returns after the last tile of the level is finished.
    async fn generate_level(
        &self,
        image_no: usize,
        level: &LevelGrid,
        renderer: &Arc<TileRenderer>,
        state: &Arc<ProgressState>,
        stats: &mut Statistics,
    ) {
        // Keep a queue of tasks waiting for parallel execution
        let task_queue_size = cmp::max(self.workers, 1);
        let mut tasks = Vec::with_capacity(task_queue_size);
        for tile in level.tiles() {
            if state.is_cancelled() {
                break;
            }
            let job = TileJob::new(image_no, level, tile, self.tile_size);
            let renderer = renderer.clone();
            tasks.push(task::spawn_blocking(move || renderer.render(&job)));
            if tasks.len() >= task_queue_size {
                let (result, remaining) = await_one_task(tasks).await;
                record_result(result, state, stats);
                tasks = remaining;
            }
        }
        // Finish remaining tasks
        for result in futures_util::future::join_all(tasks).await {
            record_result(result, state, stats);
        }
    }
}

type TaskResult = Result<Result<RenderedTile, RenderError>, task::JoinError>;

async fn await_one_task<T>(
    tasks: Vec<task::JoinHandle<T>>,
) -> (Result<T, task::JoinError>, Vec<task::JoinHandle<T>>) {
    let (result, _index, remaining) = futures_util::future::select_all(tasks).await;
    (result, remaining)
}

fn record_result(result: TaskResult, state: &ProgressState, stats: &mut Statistics) {
    match result {
        Ok(Ok(tile)) => stats.add_tile(tile.tile.zoom, tile.elapsed, tile.bytes),
        // already counted by the renderer
        Ok(Err(e)) => error!("{}", e),
        Err(e) => {
            error!("Render task failed: {}", e);
            state.tile_failed();
            state.tile_done();
        }
    }
}

/// Cancel the run on Ctrl-C. Tiles in progress are finished.
fn watch_interrupt(state: Arc<ProgressState>) -> task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing tiles in progress");
            state.cancel();
        }
    })
}

/// Quoted and escaped TOML string
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl<'a> Config<'a, ApplicationCfg> for TileService {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        if config.images.is_empty() {
            return Err("No images configured".to_string());
        }
        if config.render.tile_size == 0 {
            return Err("Tile size must be a positive integer".to_string());
        }
        let mut allocator = ZoomRangeAllocator::new();
        for image in &config.images {
            let path = Path::new(image.path.trim());
            if image.path.trim().is_empty() || !path.is_file() {
                return Err(format!("Invalid image path '{}'", image.path));
            }
            let range = image
                .zoom_range()
                .map_err(|e| format!("{}: {}", image.path, e))?;
            allocator
                .assign(path, range)
                .map_err(|e| format!("{}: {}", image.path, e))?;
        }
        let output = TileOutput::from_config(config)?;
        Ok(TileService {
            images: allocator.into_specs(),
            output,
            tile_size: config.render.tile_size,
            workers: config.render.workers.unwrap_or_else(num_cpus::get),
            write_retries: config.output.write_retries,
            metadata: config.output.metadata,
            system_fonts: config.render.system_fonts,
        })
    }
    fn gen_config() -> String {
        let toml = r#"# svg_tiler configuration

# One entry per image, ordered by zoom level.
# Zoom ranges must not overlap.
[[image]]
path = "overview.svg"
zoom = "0-2"

[[image]]
path = "detail.svg"
minzoom = 3
maxzoom = 5
"#;
        let mut config = toml.to_string();
        config.push_str(&TileOutput::gen_config());
        config.push_str(
            r#"
[render]
# Width and height of the output tiles in pixels
tile_size = 512
# Number of tiles rendered in parallel (Default: number of CPUs)
#workers = 4
system_fonts = true
"#,
        );
        config
    }
    fn gen_runtime_config(&self) -> String {
        let mut lines = vec!["# svg_tiler configuration".to_string()];
        for image in &self.images {
            lines.push(String::new());
            lines.push("[[image]]".to_string());
            lines.push(format!("path = {}", toml_string(&image.path.to_string_lossy())));
            lines.push(format!("zoom = \"{}\"", image.range()));
        }
        lines.push(String::new());
        lines.push("[output]".to_string());
        if let TileOutput::Filewriter(ref fw) = self.output {
            lines.push(format!("dir = {}", toml_string(&fw.basepath)));
        }
        lines.push(format!("write_retries = {}", self.write_retries));
        lines.push(format!("metadata = {}", self.metadata));
        lines.push(String::new());
        lines.push("[render]".to_string());
        lines.push(format!("tile_size = {}", self.tile_size));
        lines.push(format!("workers = {}", self.workers));
        lines.push(format!("system_fonts = {}", self.system_fonts));
        lines.join("\n") + "\n"
    }
}
