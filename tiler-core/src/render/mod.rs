//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod job;
pub mod renderer;


pub use self::job::TileJob;
pub use self::renderer::{RenderError, RenderedTile, TileRenderer};
