//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Shared progress accounting

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Progress of one run, shared between render workers and the progress tracker.
///
/// All mutation goes through atomics; readers take snapshots.
#[derive(Debug)]
pub struct ProgressState {
    processed: AtomicU64,
    failed: AtomicU64,
    total: u64,
    zoom: AtomicI32,
    cancelled: AtomicBool,
    start: Instant,
}

impl ProgressState {
    pub fn new(total: u64) -> ProgressState {
        ProgressState {
            processed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            total,
            zoom: AtomicI32::new(0),
            cancelled: AtomicBool::new(false),
            start: Instant::now(),
        }
    }
    /// Count a finished tile, whatever its outcome
    pub fn tile_done(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }
    pub fn tile_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
    pub fn total(&self) -> u64 {
        self.total
    }
    pub fn set_zoom(&self, zoom: i32) {
        self.zoom.store(zoom, Ordering::Relaxed);
    }
    pub fn zoom(&self) -> i32 {
        self.zoom.load(Ordering::Relaxed)
    }
    /// Stop dispatching further tiles
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
    pub fn snapshot(&self) -> ProgressEvent {
        let mut event = ProgressEvent::new(self.zoom(), self.processed(), self.total, self.elapsed());
        event.failed = self.failed();
        event
    }
}

/// Progress snapshot emitted on every tracker tick
#[derive(PartialEq, Clone, Debug)]
pub struct ProgressEvent {
    pub zoom: i32,
    pub processed: u64,
    pub total: u64,
    pub failed: u64,
    pub elapsed: Duration,
    pub remaining: Duration,
}

impl ProgressEvent {
    pub fn new(zoom: i32, processed: u64, total: u64, elapsed: Duration) -> ProgressEvent {
        let secs = elapsed.as_secs_f64();
        let tiles_per_sec = if secs > 0.0 {
            processed as f64 / secs
        } else {
            0.0
        };
        let remaining = if tiles_per_sec > 0.0 {
            Duration::from_secs_f64(total.saturating_sub(processed) as f64 / tiles_per_sec)
        } else {
            Duration::from_secs(0)
        };
        ProgressEvent {
            zoom,
            processed,
            total,
            failed: 0,
            elapsed,
            remaining,
        }
    }
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.processed as f64 * 100.0 / self.total as f64
        }
    }
    /// Fixed-width status line
    pub fn status_line(&self) -> String {
        let width = self.total.to_string().len();
        format!(
            "Zoom {}: {:>width$}/{:>width$} tiles ({:5.1}%). Elapsed: {}. Estimated remaining: {}.",
            self.zoom,
            self.processed,
            self.total,
            self.percent(),
            format_duration(self.elapsed),
            format_duration(self.remaining),
            width = width
        )
    }
}

/// `hh:mm:ss`, hours are not wrapped
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}
