//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::scene::scene::Scene;
use resvg::tiny_skia::{PixmapMut, Transform};
use resvg::usvg;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tile_grid::Extent;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Parse(#[from] usvg::Error),
}

/// SVG document rendered with resvg
pub struct SvgScene {
    tree: usvg::Tree,
}

impl SvgScene {
    pub fn load(path: &Path, system_fonts: bool) -> Result<SvgScene, SceneError> {
        let data = fs::read(path)?;
        let mut opt = usvg::Options::default();
        // relative <image> references
        opt.resources_dir = path.parent().map(|dir| dir.to_path_buf());
        if system_fonts {
            opt.fontdb_mut().load_system_fonts();
        }
        SvgScene::from_data(&data, &opt)
    }
    pub fn from_data(data: &[u8], opt: &usvg::Options) -> Result<SvgScene, SceneError> {
        let tree = usvg::Tree::from_data(data, opt)?;
        Ok(SvgScene { tree })
    }
}

impl Scene for SvgScene {
    fn extent(&self) -> Extent {
        let size = self.tree.size();
        Extent::new(size.width() as f64, size.height() as f64)
    }
    fn draw(&self, transform: Transform, pixmap: &mut PixmapMut<'_>) {
        resvg::render(&self.tree, transform, pixmap);
    }
}
