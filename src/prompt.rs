//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Interactive collection of run parameters

use std::io::{BufRead, Write};
use std::path::Path;
use tiler_core::core::config::{
    default_output_dir, default_tile_size, ImageCfg, OutputCfg, RenderCfg,
};
use tiler_core::core::zoom::{
    image_name, parse_zoom, parse_zoom_token, ZoomRange, ZoomRangeAllocator,
};
use tiler_core::core::ApplicationCfg;

pub struct Prompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Prompt<R, W> {
        Prompt { input, output }
    }
    pub fn into_output(self) -> W {
        self.output
    }
    fn say(&mut self, line: &str) -> Result<(), String> {
        writeln!(self.output, "{}", line).map_err(|e| e.to_string())
    }
    /// Ask a question and return the trimmed answer
    fn ask(&mut self, question: &str) -> Result<String, String> {
        write!(self.output, "{}", question)
            .and_then(|_| self.output.flush())
            .map_err(|e| e.to_string())?;
        let mut answer = String::new();
        let n = self
            .input
            .read_line(&mut answer)
            .map_err(|e| e.to_string())?;
        if n == 0 {
            return Err("Unexpected end of input".to_string());
        }
        Ok(answer.trim().to_string())
    }
    pub fn image_count(&mut self) -> Result<usize, String> {
        loop {
            let answer = self.ask("Enter the number of images to process: ")?;
            match answer.parse::<usize>() {
                Ok(n) if n > 0 => return Ok(n),
                _ => self.say("Invalid number of images. Please enter a positive integer.")?,
            }
        }
    }
    /// Ask for an image path. A path which doesn't exist is fatal.
    pub fn image_path(&mut self, no: usize) -> Result<String, String> {
        let answer = self.ask(&format!("Enter path for image #{}: ", no))?;
        let path = strip_quotes(&answer);
        if path.is_empty() || !Path::new(&path).is_file() {
            return Err(format!("Invalid image path '{}'", path));
        }
        Ok(path)
    }
    pub fn output_dir(&mut self) -> Result<String, String> {
        let answer = self.ask("Enter the output directory: ")?;
        let dir = strip_quotes(&answer);
        if dir.is_empty() {
            Ok(default_output_dir())
        } else {
            Ok(dir)
        }
    }
    pub fn tile_size(&mut self) -> Result<u32, String> {
        let answer = self.ask(&format!(
            "Use default tile size of {}? (Y/n): ",
            default_tile_size()
        ))?;
        if answer.to_lowercase() != "n" {
            return Ok(default_tile_size());
        }
        loop {
            let answer = self.ask("Enter desired tile size (in pixels): ")?;
            match answer.parse::<u32>() {
                Ok(size) if size > 0 => return Ok(size),
                _ => self.say("Invalid tile size. Please enter a positive integer.")?,
            }
        }
    }
    /// Ask until the allocator accepts a zoom range for the image
    pub fn zoom_range(
        &mut self,
        allocator: &ZoomRangeAllocator,
        name: &str,
    ) -> Result<ZoomRange, String> {
        loop {
            let answer = self.ask(&format!("Enter minimum zoom level for image '{}': ", name))?;
            let range = match parse_zoom_token(&answer) {
                Ok((min, Some(max))) => {
                    self.say(&format!("Maximum zoom level for image '{}': {}", name, max))?;
                    ZoomRange::new(min, max)
                }
                Ok((min, None)) => {
                    let answer =
                        self.ask(&format!("Enter maximum zoom level for image '{}': ", name))?;
                    parse_zoom(&answer).and_then(|max| ZoomRange::new(min, max))
                }
                Err(e) => Err(e),
            };
            match range.and_then(|range| allocator.check(range)) {
                Ok(range) => return Ok(range),
                Err(e) => self.say(&format!("{}. Please re-enter.", capitalize(&e.to_string())))?,
            }
        }
    }
    /// Collect a complete run configuration
    pub fn collect(&mut self) -> Result<ApplicationCfg, String> {
        self.say("========================================")?;
        self.say("          SVG Tile Generator            ")?;
        self.say("========================================")?;
        self.say("")?;
        let count = self.image_count()?;
        let mut paths = Vec::with_capacity(count);
        for no in 1..=count {
            paths.push(self.image_path(no)?);
        }
        let dir = self.output_dir()?;
        let tile_size = self.tile_size()?;

        let mut allocator = ZoomRangeAllocator::new();
        for path in &paths {
            let path = Path::new(path);
            let range = self.zoom_range(&allocator, &image_name(path))?;
            allocator.assign(path, range).map_err(|e| e.to_string())?;
        }
        let images = allocator
            .assigned()
            .iter()
            .map(|spec| ImageCfg::new(&spec.path.to_string_lossy(), spec.range()))
            .collect();
        Ok(ApplicationCfg {
            images,
            output: OutputCfg {
                dir,
                ..Default::default()
            },
            render: RenderCfg {
                tile_size,
                ..Default::default()
            },
        })
    }
}

/// Remove one pair of surrounding quotes
pub fn strip_quotes(answer: &str) -> String {
    let answer = answer.trim();
    for quote in &['"', '\''] {
        if answer.len() >= 2 && answer.starts_with(*quote) && answer.ends_with(*quote) {
            return answer[1..answer.len() - 1].trim().to_string();
        }
    }
    answer.to_string()
}

fn capitalize(msg: &str) -> String {
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
