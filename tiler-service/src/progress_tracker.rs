//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Periodic progress reporting

use pbr::ProgressBar;
use std::io::{self, Stdout, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tiler_core::core::progress::{ProgressEvent, ProgressState};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time;

/// Receives progress snapshots from the tracker
pub trait ProgressSink: Send {
    fn update(&mut self, event: &ProgressEvent);
    /// Called once after the last batch
    fn finish(&mut self, event: &ProgressEvent);
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ProgressStyle {
    Line,
    Bar,
    Off,
}

impl FromStr for ProgressStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" | "true" => Ok(ProgressStyle::Line),
            "bar" => Ok(ProgressStyle::Bar),
            "none" | "false" => Ok(ProgressStyle::Off),
            _ => Err(format!("Unknown progress style '{}'", s)),
        }
    }
}

impl ProgressStyle {
    pub fn sink(&self, total: u64) -> Box<dyn ProgressSink> {
        match self {
            ProgressStyle::Line => Box::new(StatusLine::new(io::stdout())),
            ProgressStyle::Bar => Box::new(BarSink::new(total)),
            ProgressStyle::Off => Box::new(NoProgress),
        }
    }
}

/// Erases leftovers of a longer previous line
const CLEAR_LINE_END: &str = "\x1b[K";

/// Status line rewritten in place
pub struct StatusLine<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> StatusLine<W> {
    pub fn new(out: W) -> StatusLine<W> {
        StatusLine { out }
    }
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ProgressSink for StatusLine<W> {
    fn update(&mut self, event: &ProgressEvent) {
        let _ = write!(self.out, "\r{}{}", event.status_line(), CLEAR_LINE_END);
        let _ = self.out.flush();
    }
    fn finish(&mut self, event: &ProgressEvent) {
        let _ = writeln!(self.out, "\r{}{}", event.status_line(), CLEAR_LINE_END);
        let _ = self.out.flush();
    }
}

/// pbr progress bar
pub struct BarSink {
    pb: ProgressBar<Stdout>,
    zoom: Option<i32>,
}

impl BarSink {
    pub fn new(total: u64) -> BarSink {
        let mut pb = ProgressBar::new(total);
        pb.show_speed = false;
        BarSink { pb, zoom: None }
    }
}

impl ProgressSink for BarSink {
    fn update(&mut self, event: &ProgressEvent) {
        if self.zoom != Some(event.zoom) {
            self.zoom = Some(event.zoom);
            self.pb.message(&format!("Zoom {}: ", event.zoom));
        }
        self.pb.set(event.processed);
    }
    fn finish(&mut self, event: &ProgressEvent) {
        self.pb.set(event.processed);
        self.pb.finish_println("");
    }
}

pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&mut self, _event: &ProgressEvent) {}
    fn finish(&mut self, _event: &ProgressEvent) {}
}

/// Background task reporting progress at a fixed interval.
///
/// Runs on the async runtime, separate from the blocking render workers.
pub struct ProgressTracker {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ProgressTracker {
    /// Start reporting. Must be called within a tokio runtime.
    pub fn start(
        state: Arc<ProgressState>,
        mut sink: Box<dyn ProgressSink>,
        interval: Duration,
    ) -> ProgressTracker {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => sink.update(&state.snapshot()),
                }
            }
            sink.finish(&state.snapshot());
        });
        ProgressTracker { stop, handle }
    }
    /// Stop reporting and emit the final progress state
    pub async fn stop(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.handle.await {
            error!("Progress reporting failed: {}", e);
        }
    }
}
