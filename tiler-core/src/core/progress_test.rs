//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::progress::{format_duration, ProgressEvent, ProgressState};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_remaining_time() {
    // 50 tiles in 10s, 150 left at 5 tiles/s
    let event = ProgressEvent::new(3, 50, 200, Duration::from_secs(10));
    assert_eq!(event.remaining, Duration::from_secs(30));
    assert_eq!(event.percent(), 25.0);

    // nothing processed yet
    let event = ProgressEvent::new(0, 0, 200, Duration::from_secs(3));
    assert_eq!(event.remaining, Duration::from_secs(0));

    // at the very start
    let event = ProgressEvent::new(0, 0, 200, Duration::from_secs(0));
    assert_eq!(event.remaining, Duration::from_secs(0));

    let event = ProgressEvent::new(0, 0, 0, Duration::from_secs(1));
    assert_eq!(event.percent(), 100.0);
}

#[test]
fn test_status_line() {
    let event = ProgressEvent::new(4, 7, 1200, Duration::from_secs(3725));
    assert_eq!(
        event.status_line(),
        "Zoom 4:    7/1200 tiles (  0.6%). Elapsed: 01:02:05. Estimated remaining: 176:20:46."
    );

    // same width for every processed count
    let start = ProgressEvent::new(1, 0, 10, Duration::from_secs(1)).status_line();
    let end = ProgressEvent::new(1, 10, 10, Duration::from_secs(1)).status_line();
    assert_eq!(start.len(), end.len());
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_secs(0)), "00:00:00");
    assert_eq!(format_duration(Duration::from_millis(59_999)), "00:00:59");
    assert_eq!(format_duration(Duration::from_secs(3600 * 30 + 61)), "30:01:01");
}

#[test]
fn test_concurrent_counting() {
    let state = Arc::new(ProgressState::new(8000));
    let workers = (0..8)
        .map(|_| {
            let state = state.clone();
            thread::spawn(move || {
                for i in 0..1000 {
                    if i % 100 == 0 {
                        state.tile_failed();
                    }
                    state.tile_done();
                }
            })
        })
        .collect::<Vec<_>>();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(state.processed(), 8000);
    assert_eq!(state.failed(), 80);

    state.set_zoom(-2);
    let event = state.snapshot();
    assert_eq!(event.zoom, -2);
    assert_eq!(event.processed, 8000);
    assert_eq!(event.total, 8000);
    assert_eq!(event.failed, 80);
    assert_eq!(event.remaining, Duration::from_secs(0));
}

#[test]
fn test_cancel() {
    let state = ProgressState::new(1);
    assert!(!state.is_cancelled());
    state.cancel();
    assert!(state.is_cancelled());
}
