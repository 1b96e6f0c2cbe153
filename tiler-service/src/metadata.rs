//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tile_service::SourceImage;
use serde_json::Value;
use tiler_core::output::TILE_EXTENSION;

/// Description of the generated pyramid, written as `tiles.json`.
/// Images that failed to load are left out.
pub fn tiles_json(images: &[SourceImage], tile_size: u32) -> Value {
    let loaded = images
        .iter()
        .filter_map(|image| image.scene.as_ref().map(|scene| (image, scene.extent())))
        .collect::<Vec<_>>();
    let minzoom = loaded.iter().map(|(image, _)| image.spec.minzoom).min();
    let maxzoom = loaded.iter().map(|(image, _)| image.spec.maxzoom).max();
    let entries = loaded
        .iter()
        .map(|(image, extent)| {
            json!({
                "path": image.spec.path.display().to_string(),
                "minzoom": image.spec.minzoom,
                "maxzoom": image.spec.maxzoom,
                "width": extent.width,
                "height": extent.height,
            })
        })
        .collect::<Vec<_>>();
    json!({
        "tile_size": tile_size,
        "format": TILE_EXTENSION,
        "tiles": format!("{{z}}/{{x}}/{{y}}.{}", TILE_EXTENSION),
        "minzoom": minzoom,
        "maxzoom": maxzoom,
        "images": entries,
    })
}
