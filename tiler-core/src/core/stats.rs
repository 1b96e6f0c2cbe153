//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Statistics collector

use stats::{MinMax, OnlineStats};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

type MeasurementType = u64;

struct StatCollector {
    online: OnlineStats,
    minmax: MinMax<MeasurementType>,
}

#[derive(Default)]
pub struct StatResults {
    pub len: usize,
    pub min: MeasurementType,
    pub max: MeasurementType,
    pub mean: f64,
    pub stddev: f64,
}

/// Render measurements, keyed by `<measure>.<zoom>`
#[derive(Default)]
pub struct Statistics(BTreeMap<String, StatCollector>);

impl Statistics {
    pub fn new() -> Statistics {
        Statistics(BTreeMap::new())
    }
    pub fn add(&mut self, key: String, value: MeasurementType) {
        let collector = self.0.entry(key).or_insert_with(|| StatCollector {
            online: OnlineStats::new(),
            minmax: MinMax::new(),
        });
        collector.online.add(value);
        collector.minmax.add(value);
    }
    /// Record render time and encoded size of one tile
    pub fn add_tile(&mut self, zoom: i32, elapsed: Duration, bytes: usize) {
        self.add(format!("tile_ms.{}", zoom), elapsed.as_millis() as u64);
        self.add(format!("tile_bytes.{}", zoom), bytes as u64);
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Summary of one key, all zero for unknown keys
    pub fn results(&self, key: &str) -> StatResults {
        self.0
            .get(key)
            .map(|collector| StatResults {
                len: collector.minmax.len(),
                min: collector.minmax.min().copied().unwrap_or_default(),
                max: collector.minmax.max().copied().unwrap_or_default(),
                mean: collector.online.mean(),
                stddev: collector.online.stddev(),
            })
            .unwrap_or_default()
    }
    pub fn as_csv(&self) -> String {
        let mut csv = "key,count,min,max,mean,stddev\n".to_string();
        for key in self.0.keys() {
            let res = self.results(key);
            csv.push_str(&format!(
                "{},{},{},{},{:.3},{:.3}\n",
                key, res.len, res.min, res.max, res.mean, res.stddev
            ));
        }
        csv
    }
}

impl fmt::Debug for StatResults {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "n={} min={} max={} mean={:.3} stddev={:.3}",
            self.len, self.min, self.max, self.mean, self.stddev
        )
    }
}

impl fmt::Debug for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for key in self.0.keys() {
            writeln!(f, "{}: {:?}", key, self.results(key))?;
        }
        Ok(())
    }
}

#[test]
fn usage() {
    let mut stats = Statistics::new();
    assert!(stats.is_empty());
    stats.add_tile(2, Duration::from_millis(10), 100);
    stats.add_tile(2, Duration::from_millis(30), 300);
    stats.add_tile(3, Duration::from_millis(5), 50);
    assert_eq!(stats.results("tile_ms.2").mean, 20.0);
    assert_eq!(stats.results("tile_ms.2").len, 2);
    assert_eq!(stats.results("tile_bytes.2").min, 100);
    assert_eq!(stats.results("tile_bytes.2").max, 300);
    assert_eq!(stats.results("tile_ms.3").mean, 5.0);
    assert_eq!(stats.results("tile_ms.9").len, 0);

    let csv = stats.as_csv();
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.contains("tile_ms.2,2,10,30,20.000,10.000"), "{}", csv);
}
