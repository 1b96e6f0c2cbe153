//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::output::writer::Writer;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct Filewriter {
    pub basepath: String,
}

impl Filewriter {
    pub fn fullpath(&self, path: &str) -> PathBuf {
        Path::new(&self.basepath).join(path)
    }
}

impl Writer for Filewriter {
    fn info(&self) -> String {
        format!("Tile output directory: {}", self.basepath)
    }
    fn prepare(&self) -> Result<(), io::Error> {
        fs::create_dir_all(&self.basepath)
    }
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        let fullpath = self.fullpath(path);
        debug!("Filewriter.write {}", fullpath.display());
        if let Some(dir) = fullpath.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut f = File::create(&fullpath)?;
        f.write_all(obj)
    }
}
