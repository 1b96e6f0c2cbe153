//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod scene;
pub mod svg;

#[cfg(test)]
mod svg_test;

pub use self::scene::Scene;
pub use self::svg::{SceneError, SvgScene};
use std::path::Path;
use std::sync::Arc;

/// Load a scene, logging a warning when it cannot be decoded
pub fn load_scene(path: &Path, system_fonts: bool) -> Option<Arc<dyn Scene>> {
    match SvgScene::load(path, system_fonts) {
        Ok(scene) => {
            let extent = scene.extent();
            info!(
                "Loaded '{}' ({} x {})",
                path.display(),
                extent.width,
                extent.height
            );
            Some(Arc::new(scene))
        }
        Err(e) => {
            warn!("Failed to load SVG '{}': {}. Skipping.", path.display(), e);
            None
        }
    }
}
