//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::zoom::{ZoomRange, ZoomRangeError};
use serde::Deserialize;
use std;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
    /// Generate configuration template with runtime information
    fn gen_runtime_config(&self) -> String {
        Self::gen_config()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    #[serde(rename = "image", default)]
    pub images: Vec<ImageCfg>,
    #[serde(default)]
    pub output: OutputCfg,
    #[serde(default)]
    pub render: RenderCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ImageCfg {
    pub path: String,
    /// Combined zoom range `<min>-<max>`
    pub zoom: Option<String>,
    pub minzoom: Option<i32>,
    pub maxzoom: Option<i32>,
}

impl ImageCfg {
    pub fn new(path: &str, range: ZoomRange) -> ImageCfg {
        ImageCfg {
            path: path.to_string(),
            zoom: None,
            minzoom: Some(range.min),
            maxzoom: Some(range.max),
        }
    }
    /// Zoom range from either `zoom` or `minzoom`/`maxzoom`
    pub fn zoom_range(&self) -> Result<ZoomRange, ZoomRangeError> {
        match (&self.zoom, self.minzoom, self.maxzoom) {
            (Some(zoom), None, None) => zoom.parse(),
            (None, Some(min), Some(max)) => ZoomRange::new(min, max),
            (None, Some(min), None) => ZoomRange::new(min, min),
            _ => Err(ZoomRangeError::InvalidFormat(format!(
                "{:?}/{:?}/{:?}",
                self.zoom, self.minzoom, self.maxzoom
            ))),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputCfg {
    /// Output directory
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Additional attempts for a failed tile write
    #[serde(default = "default_write_retries")]
    pub write_retries: u8,
    /// Write tiles.json into the output directory
    #[serde(default = "default_true")]
    pub metadata: bool,
}

impl Default for OutputCfg {
    fn default() -> Self {
        OutputCfg {
            dir: default_output_dir(),
            write_retries: default_write_retries(),
            metadata: true,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct RenderCfg {
    /// Width and height of the output tiles in pixels
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// Number of tiles rendered in parallel (Default: number of CPUs)
    pub workers: Option<usize>,
    /// Load system fonts for text elements
    #[serde(default = "default_true")]
    pub system_fonts: bool,
}

impl Default for RenderCfg {
    fn default() -> Self {
        RenderCfg {
            tile_size: default_tile_size(),
            workers: None,
            system_fonts: true,
        }
    }
}

pub fn default_output_dir() -> String {
    "tiles".to_string()
}

pub fn default_tile_size() -> u32 {
    512
}

pub fn default_write_retries() -> u8 {
    2
}

fn default_true() -> bool {
    true
}

pub const DEFAULT_CONFIG: &'static str = r#"
[output]
dir = "tiles"

[render]
tile_size = 512
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| {
        format!(
            "Template error: {}",
            e.source().map_or(e.to_string(), |src| src.to_string())
        )
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
