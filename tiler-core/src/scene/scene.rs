//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use resvg::tiny_skia::{PixmapMut, Transform};
use tile_grid::Extent;

/// Decoded vector image, read-only once loaded.
///
/// Implementations must support concurrent drawing from many tile jobs.
pub trait Scene: Send + Sync {
    /// Continuous bounding box in source units
    fn extent(&self) -> Extent;
    /// Draw the whole scene through `transform` onto `pixmap`
    fn draw(&self, transform: Transform, pixmap: &mut PixmapMut<'_>);
}
