//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Zoom range assignment

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, PartialEq, Clone, Debug)]
pub enum ZoomRangeError {
    #[error("invalid zoom range `{0}`, expected <min>-<max>")]
    InvalidFormat(String),
    #[error("invalid zoom level `{0}`, expected an integer")]
    InvalidNumber(String),
    #[error("minimum zoom level {min} is greater than maximum zoom level {max}")]
    MinGreaterThanMax { min: i32, max: i32 },
    #[error("zoom levels must not overlap, previous maximum zoom was {previous_max}, minimum zoom must be greater than {previous_max} (got {min})")]
    Overlap { previous_max: i32, min: i32 },
}

/// Inclusive range of zoom levels
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct ZoomRange {
    pub min: i32,
    pub max: i32,
}

impl ZoomRange {
    pub fn new(min: i32, max: i32) -> Result<ZoomRange, ZoomRangeError> {
        if min > max {
            return Err(ZoomRangeError::MinGreaterThanMax { min, max });
        }
        Ok(ZoomRange { min, max })
    }
    pub fn levels(&self) -> std::ops::RangeInclusive<i32> {
        self.min..=self.max
    }
}

impl fmt::Display for ZoomRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Parse a single zoom level
pub fn parse_zoom(input: &str) -> Result<i32, ZoomRangeError> {
    let input = input.trim();
    input
        .parse::<i32>()
        .map_err(|_| ZoomRangeError::InvalidNumber(input.to_string()))
}

/// Split a zoom token into minimum and optional maximum level.
///
/// `"3"` is a minimum only, `"0-3"` a combined range. A leading minus sign belongs to
/// the number, so `"-2--1"` is the range from -2 to -1.
pub fn parse_zoom_token(input: &str) -> Result<(i32, Option<i32>), ZoomRangeError> {
    let input = input.trim();
    match range_separator(input) {
        Some(pos) => {
            let (min, max) = (&input[..pos], &input[pos + 1..]);
            match (parse_zoom(min), parse_zoom(max)) {
                (Ok(min), Ok(max)) => Ok((min, Some(max))),
                _ => Err(ZoomRangeError::InvalidFormat(input.to_string())),
            }
        }
        None if input.chars().skip(1).any(|c| c == '-') => {
            Err(ZoomRangeError::InvalidFormat(input.to_string()))
        }
        None => parse_zoom(input).map(|min| (min, None)),
    }
}

/// Position of the first `-` that follows a digit (ignoring blanks)
fn range_separator(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    (1..bytes.len()).find(|&i| {
        bytes[i] == b'-'
            && bytes[..i]
                .iter()
                .rev()
                .find(|b| !b.is_ascii_whitespace())
                .map_or(false, |b| b.is_ascii_digit())
    })
}

impl FromStr for ZoomRange {
    type Err = ZoomRangeError;

    /// Combined `<min>-<max>` token, a single level means a range of one level
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = parse_zoom_token(s)?;
        ZoomRange::new(min, max.unwrap_or(min))
    }
}

/// Image with its assigned zoom levels
#[derive(PartialEq, Clone, Debug)]
pub struct ImageZoomSpec {
    pub path: PathBuf,
    pub minzoom: i32,
    pub maxzoom: i32,
}

impl ImageZoomSpec {
    pub fn range(&self) -> ZoomRange {
        ZoomRange {
            min: self.minzoom,
            max: self.maxzoom,
        }
    }
    pub fn name(&self) -> String {
        image_name(&self.path)
    }
}

/// File name used in prompts and log messages
pub fn image_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Assigns strictly increasing, non-overlapping zoom ranges to an ordered list of images.
///
/// A rejected range leaves all previous assignments untouched, so the caller can ask
/// again for the same image. Gaps between ranges are allowed.
#[derive(Default, Debug)]
pub struct ZoomRangeAllocator {
    assigned: Vec<ImageZoomSpec>,
}

impl ZoomRangeAllocator {
    pub fn new() -> ZoomRangeAllocator {
        ZoomRangeAllocator {
            assigned: Vec::new(),
        }
    }
    /// Maximum zoom of the last assigned image
    pub fn last_maxzoom(&self) -> Option<i32> {
        self.assigned.last().map(|spec| spec.maxzoom)
    }
    /// Check a range against the previous assignment without assigning it
    pub fn check(&self, range: ZoomRange) -> Result<ZoomRange, ZoomRangeError> {
        let range = ZoomRange::new(range.min, range.max)?;
        match self.last_maxzoom() {
            Some(previous_max) if range.min <= previous_max => Err(ZoomRangeError::Overlap {
                previous_max,
                min: range.min,
            }),
            _ => Ok(range),
        }
    }
    pub fn assign(
        &mut self,
        path: &Path,
        range: ZoomRange,
    ) -> Result<&ImageZoomSpec, ZoomRangeError> {
        let range = self.check(range)?;
        debug!("{}: zoom levels {}", path.display(), range);
        self.assigned.push(ImageZoomSpec {
            path: path.to_path_buf(),
            minzoom: range.min,
            maxzoom: range.max,
        });
        Ok(&self.assigned[self.assigned.len() - 1])
    }
    /// Assign a range given as combined `<min>-<max>` token
    pub fn assign_token(
        &mut self,
        path: &Path,
        token: &str,
    ) -> Result<&ImageZoomSpec, ZoomRangeError> {
        let range = token.parse::<ZoomRange>()?;
        self.assign(path, range)
    }
    pub fn assigned(&self) -> &[ImageZoomSpec] {
        &self.assigned
    }
    pub fn into_specs(self) -> Vec<ImageZoomSpec> {
        self.assigned
    }
}
