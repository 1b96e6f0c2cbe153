//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::prompt::{strip_quotes, Prompt};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;
use tiler_core::core::zoom::ZoomRangeAllocator;

fn svg_file(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\"/>")
        .unwrap();
    path
}

fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
    Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

#[test]
fn test_collect() {
    let dir = tempfile::tempdir().unwrap();
    let a = svg_file(&dir, "a.svg");
    let b = svg_file(&dir, "b.svg");
    let input = format!(
        "2\n\"{}\"\n  {}  \n\nn\n0\n256\n0-2\n2\n4\n3-4\n",
        a.display(),
        b.display()
    );
    let mut prompt = prompt(&input);
    let config = prompt.collect().unwrap();
    assert_eq!(config.images.len(), 2);
    assert_eq!(config.images[0].path, a.to_string_lossy());
    assert_eq!(config.images[0].minzoom, Some(0));
    assert_eq!(config.images[0].maxzoom, Some(2));
    assert_eq!(config.images[1].minzoom, Some(3));
    assert_eq!(config.images[1].maxzoom, Some(4));
    assert_eq!(config.output.dir, "tiles");
    assert_eq!(config.render.tile_size, 256);

    let output = String::from_utf8(prompt.into_output()).unwrap();
    assert!(output.contains("Invalid tile size"));
    assert!(output.contains("Maximum zoom level for image 'a.svg': 2"));
    assert!(output.contains("Zoom levels must not overlap"));
    assert!(output.contains("Please re-enter."));
}

#[test]
fn test_default_tile_size() {
    assert_eq!(prompt("\n").tile_size().unwrap(), 512);
    assert_eq!(prompt("Y\n").tile_size().unwrap(), 512);
    assert_eq!(prompt("N\n1024\n").tile_size().unwrap(), 1024);
}

#[test]
fn test_invalid_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = format!("1\n{}\n", dir.path().join("missing.svg").display());
    let err = prompt(&input).collect().err().unwrap();
    assert!(err.starts_with("Invalid image path"), "{}", err);

    let err = prompt("1\n\"\"\n").collect().err().unwrap();
    assert!(err.starts_with("Invalid image path"), "{}", err);
}

#[test]
fn test_image_count() {
    let mut prompt = prompt("x\n0\n3\n");
    assert_eq!(prompt.image_count().unwrap(), 3);
    let output = String::from_utf8(prompt.into_output()).unwrap();
    assert_eq!(output.matches("Invalid number of images").count(), 2);
}

#[test]
fn test_zoom_range() {
    let allocator = ZoomRangeAllocator::new();
    let mut prompt = prompt("abc\n1-x\n5\n3\n-2--1\n");
    let range = prompt.zoom_range(&allocator, "a.svg").unwrap();
    assert_eq!((range.min, range.max), (-2, -1));
    let output = String::from_utf8(prompt.into_output()).unwrap();
    assert!(output.contains("Invalid zoom level `abc`"));
    assert!(output.contains("Invalid zoom range `1-x`"));
    assert!(output.contains("Minimum zoom level 5 is greater than maximum zoom level 3"));
}

#[test]
fn test_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let a = svg_file(&dir, "a.svg");
    let input = format!("1\n{}\nout\n\n5-3\n", a.display());
    let err = prompt(&input).collect().err().unwrap();
    assert_eq!(err, "Unexpected end of input");

    let allocator = ZoomRangeAllocator::new();
    assert!(prompt("").zoom_range(&allocator, "a.svg").is_err());
}

#[test]
fn test_path_with_apostrophe() {
    let dir = tempfile::tempdir().unwrap();
    let path = svg_file(&dir, "o'brien.svg");
    let answer = prompt(&format!("{}\n", path.display())).image_path(1).unwrap();
    assert_eq!(answer, path.to_string_lossy());
    let answer = prompt(&format!("\"{}\"\n", path.display())).image_path(1).unwrap();
    assert_eq!(answer, path.to_string_lossy());
}

#[test]
fn test_strip_quotes() {
    assert_eq!(strip_quotes(" \"a b.svg\" "), "a b.svg");
    assert_eq!(strip_quotes("'a.svg'"), "a.svg");
    assert_eq!(strip_quotes("o'brien.svg"), "o'brien.svg");
    assert_eq!(strip_quotes("\"a.svg'"), "\"a.svg'");
    assert_eq!(strip_quotes("\""), "\"");
    assert_eq!(strip_quotes("\"\""), "");
}
