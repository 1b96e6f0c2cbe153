//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::zoom::{
    image_name, parse_zoom, parse_zoom_token, ImageZoomSpec, ZoomRange, ZoomRangeAllocator,
    ZoomRangeError,
};
use std::path::Path;

#[test]
fn test_parse_token() {
    assert_eq!(parse_zoom_token("3"), Ok((3, None)));
    assert_eq!(parse_zoom_token(" 0-3 "), Ok((0, Some(3))));
    assert_eq!(parse_zoom_token("0 - 3"), Ok((0, Some(3))));
    assert_eq!(parse_zoom_token("-3"), Ok((-3, None)));
    assert_eq!(parse_zoom_token("-2--1"), Ok((-2, Some(-1))));
    assert_eq!(parse_zoom_token("-2-4"), Ok((-2, Some(4))));

    assert_eq!(
        parse_zoom_token("1-2-3"),
        Err(ZoomRangeError::InvalidFormat("1-2-3".to_string()))
    );
    assert_eq!(
        parse_zoom_token("a-b"),
        Err(ZoomRangeError::InvalidFormat("a-b".to_string()))
    );
    assert_eq!(
        parse_zoom_token("0-"),
        Err(ZoomRangeError::InvalidFormat("0-".to_string()))
    );
    assert_eq!(
        parse_zoom_token("x"),
        Err(ZoomRangeError::InvalidNumber("x".to_string()))
    );
    assert_eq!(
        parse_zoom(""),
        Err(ZoomRangeError::InvalidNumber("".to_string()))
    );
}

#[test]
fn test_parse_range() {
    assert_eq!("0-3".parse::<ZoomRange>(), Ok(ZoomRange { min: 0, max: 3 }));
    assert_eq!("5".parse::<ZoomRange>(), Ok(ZoomRange { min: 5, max: 5 }));
    assert_eq!(
        "4-2".parse::<ZoomRange>(),
        Err(ZoomRangeError::MinGreaterThanMax { min: 4, max: 2 })
    );
    assert_eq!(ZoomRange { min: -1, max: 2 }.to_string(), "-1-2");
    assert_eq!(
        ZoomRange::new(0, 2).unwrap().levels().collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn test_allocate_ranges() {
    let mut allocator = ZoomRangeAllocator::new();
    assert_eq!(allocator.last_maxzoom(), None);

    let spec = allocator
        .assign(Path::new("a.svg"), ZoomRange { min: 0, max: 2 })
        .unwrap();
    assert_eq!(
        spec,
        &ImageZoomSpec {
            path: "a.svg".into(),
            minzoom: 0,
            maxzoom: 2,
        }
    );

    // gaps are allowed
    allocator.assign_token(Path::new("b.svg"), "5-6").unwrap();
    assert_eq!(allocator.last_maxzoom(), Some(6));

    let specs = allocator.into_specs();
    assert_eq!(specs.len(), 2);
    for pair in specs.windows(2) {
        assert!(pair[0].maxzoom < pair[1].minzoom);
    }
}

#[test]
fn test_reject_ranges() {
    let mut allocator = ZoomRangeAllocator::new();
    allocator.assign_token(Path::new("a.svg"), "0-3").unwrap();

    // overlap with previous image
    assert_eq!(
        allocator.assign_token(Path::new("b.svg"), "3-5"),
        Err(ZoomRangeError::Overlap {
            previous_max: 3,
            min: 3
        })
    );
    assert_eq!(
        allocator.assign_token(Path::new("b.svg"), "1-2"),
        Err(ZoomRangeError::Overlap {
            previous_max: 3,
            min: 1
        })
    );
    // min > max
    assert_eq!(
        allocator.assign(Path::new("b.svg"), ZoomRange { min: 6, max: 4 }),
        Err(ZoomRangeError::MinGreaterThanMax { min: 6, max: 4 })
    );
    // malformed
    assert!(allocator.assign_token(Path::new("b.svg"), "4-x").is_err());

    // rejections leave previous state intact
    assert_eq!(allocator.assigned().len(), 1);
    assert_eq!(allocator.last_maxzoom(), Some(3));

    // re-solicited valid input is accepted
    allocator.assign_token(Path::new("b.svg"), "4-4").unwrap();
    assert_eq!(allocator.assigned().len(), 2);
}

#[test]
fn test_negative_previous_max() {
    let mut allocator = ZoomRangeAllocator::new();
    allocator.assign_token(Path::new("a.svg"), "-3--1").unwrap();
    assert_eq!(
        allocator.assign_token(Path::new("b.svg"), "-1-2"),
        Err(ZoomRangeError::Overlap {
            previous_max: -1,
            min: -1
        })
    );
    allocator.assign_token(Path::new("b.svg"), "0-2").unwrap();
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ZoomRangeError::Overlap {
            previous_max: 3,
            min: 2
        }
        .to_string(),
        "zoom levels must not overlap, previous maximum zoom was 3, minimum zoom must be greater than 3 (got 2)"
    );
    assert_eq!(
        ZoomRangeError::MinGreaterThanMax { min: 4, max: 1 }.to_string(),
        "minimum zoom level 4 is greater than maximum zoom level 1"
    );
}

#[test]
fn test_spec_name() {
    let spec = ImageZoomSpec {
        path: Path::new("maps").join("world.svg"),
        minzoom: 0,
        maxzoom: 1,
    };
    assert_eq!(spec.name(), "world.svg");
    assert_eq!(spec.range(), ZoomRange { min: 0, max: 1 });
}

#[test]
fn test_image_name() {
    assert_eq!(image_name(Path::new("/data/maps/o'brien.svg")), "o'brien.svg");
    assert_eq!(image_name(Path::new("/")), "/");
}

#[test]
fn test_non_ascii_token() {
    assert_eq!(
        parse_zoom_token("é"),
        Err(ZoomRangeError::InvalidNumber("é".to_string()))
    );
    assert_eq!(
        parse_zoom_token("½"),
        Err(ZoomRangeError::InvalidNumber("½".to_string()))
    );
    // full-width digits are not integers
    assert!(parse_zoom_token("１").is_err());
    assert_eq!(
        parse_zoom_token("é-2"),
        Err(ZoomRangeError::InvalidFormat("é-2".to_string()))
    );
    assert_eq!(
        parse_zoom_token("1-é"),
        Err(ZoomRangeError::InvalidFormat("1-é".to_string()))
    );
    assert!("ü-ö".parse::<ZoomRange>().is_err());
}
