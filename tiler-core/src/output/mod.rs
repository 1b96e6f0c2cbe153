//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod filewriter;
pub mod writer;


pub use self::filewriter::Filewriter;
pub use self::writer::{tile_path, Nooutput, Writer, TILE_EXTENSION};
use crate::core::ApplicationCfg;
use crate::core::Config;
use std::io;

#[derive(Clone)]
pub enum TileOutput {
    Nooutput(Nooutput),
    Filewriter(Filewriter),
}

impl TileOutput {
    pub fn writes_files(&self) -> bool {
        matches!(self, TileOutput::Filewriter(_))
    }
}

impl Writer for TileOutput {
    fn info(&self) -> String {
        match self {
            TileOutput::Nooutput(output) => output.info(),
            TileOutput::Filewriter(output) => output.info(),
        }
    }
    fn prepare(&self) -> Result<(), io::Error> {
        match self {
            TileOutput::Nooutput(output) => output.prepare(),
            TileOutput::Filewriter(output) => output.prepare(),
        }
    }
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        match self {
            TileOutput::Nooutput(output) => output.write(path, obj),
            TileOutput::Filewriter(output) => output.write(path, obj),
        }
    }
}

impl<'a> Config<'a, ApplicationCfg> for TileOutput {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let dir = config.output.dir.trim();
        if dir.is_empty() {
            return Err("Missing output directory".to_string());
        }
        Ok(TileOutput::Filewriter(Filewriter {
            basepath: dir.to_string(),
        }))
    }
    fn gen_config() -> String {
        let toml = r#"
[output]
dir = "tiles"
# Additional attempts for a failed tile write
write_retries = 2
# Write tiles.json with image and zoom level information
metadata = true
"#;
        toml.to_string()
    }
}
