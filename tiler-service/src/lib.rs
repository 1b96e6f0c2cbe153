//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_json;

pub mod metadata;
pub mod progress_tracker;
pub mod tile_service;

pub use progress_tracker::{ProgressSink, ProgressStyle, ProgressTracker};
pub use tile_service::{GenerateSummary, SourceImage, TileService};
