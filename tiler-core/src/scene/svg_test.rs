//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::scene::{load_scene, Scene, SceneError, SvgScene};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use std::fs;
use std::path::Path;
use tile_grid::Extent;

const RECT_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="400">
<rect x="0" y="0" width="800" height="400" fill="#ff0000"/>
</svg>"##;

#[test]
fn test_extent() {
    let scene = SvgScene::from_data(RECT_SVG.as_bytes(), &usvg::Options::default()).unwrap();
    assert_eq!(scene.extent(), Extent::new(800.0, 400.0));

    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 50 20"></svg>"#;
    let scene = SvgScene::from_data(svg.as_bytes(), &usvg::Options::default()).unwrap();
    assert_eq!(scene.extent(), Extent::new(50.0, 20.0));
}

#[test]
fn test_draw() {
    let scene = SvgScene::from_data(RECT_SVG.as_bytes(), &usvg::Options::default()).unwrap();
    let mut pixmap = Pixmap::new(10, 10).unwrap();
    scene.draw(Transform::identity(), &mut pixmap.as_mut());
    let pixel = pixmap.pixel(5, 5).unwrap();
    assert_eq!(
        (pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()),
        (255, 0, 0, 255)
    );
}

#[test]
fn test_parse_error() {
    let res = SvgScene::from_data(b"not an svg", &usvg::Options::default());
    assert!(matches!(res, Err(SceneError::Parse(_))));

    let res = SvgScene::load(Path::new("does/not/exist.svg"), false);
    assert!(matches!(res, Err(SceneError::Io(_))));
}

#[test]
fn test_load_scene() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rect.svg");
    fs::write(&path, RECT_SVG).unwrap();
    let scene = load_scene(&path, false).expect("scene");
    assert_eq!(scene.extent(), Extent::new(800.0, 400.0));

    let broken = dir.path().join("broken.svg");
    fs::write(&broken, "<svg").unwrap();
    assert!(load_scene(&broken, false).is_none());
}
