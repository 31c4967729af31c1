// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end extraction tests over synthetic plans where the vector
//! description and the rendered raster disagree by a known translation.

use image::{GrayImage, Luma};
use roomplan_core::{parse_vector_plan, NormalizedBox};
use roomplan_vision::{
    extract_rooms, extract_rooms_from_raster, extract_rooms_from_svg_str, DetectionConfig,
    FloodFillSegmenter, Offset,
};

/// 200x200 raster with one rectangular room whose walls are drawn
/// translated by (dx, dy) relative to the vector polygon below.
fn rendered_plan(dx: i32, dy: i32) -> GrayImage {
    let mut img = GrayImage::from_pixel(200, 200, Luma([255]));
    for y in 0..200 {
        img.put_pixel((20 + dx) as u32, y, Luma([0]));
        img.put_pixel((120 + dx) as u32, y, Luma([0]));
    }
    for x in 0..200 {
        img.put_pixel(x, (30 + dy) as u32, Luma([0]));
        img.put_pixel(x, (130 + dy) as u32, Luma([0]));
    }
    img
}

const PLAN_SVG: &str = r#"<svg width="200" height="200">
    <g class="Space Kitchen">
        <polygon points="20,30 120,30 120,130 20,130"/>
        <g class="NameLabel"><text>Kitchen</text></g>
    </g>
</svg>"#;

#[test]
fn test_recovers_known_offset_end_to_end() {
    // Walls drawn 10 right and 5 down of the vector polygon; a tight
    // match tolerance makes the true offset the unique best candidate.
    let plan = parse_vector_plan(PLAN_SVG).unwrap();
    let raster = rendered_plan(10, 5);
    let config = DetectionConfig {
        match_tolerance: 4,
        ..Default::default()
    };

    let report = extract_rooms(&plan, &raster, &config);

    assert_eq!(report.offset, Offset::new(10, 5));
    assert_eq!(report.walls.vertical, vec![30, 130]);
    assert_eq!(report.walls.horizontal, vec![35, 135]);

    assert_eq!(report.rooms.len(), 1);
    let room = &report.rooms[0];
    assert_eq!(room.id, "room_001");
    assert_eq!(room.confidence, Some(1.0));
    assert_eq!(room.room_type.as_deref(), Some("Kitchen"));
    assert_eq!(room.name_hint.as_deref(), Some("Kitchen"));
    // Box (30, 35, 130, 135) over a 200px raster, scaled to 0-1000.
    assert_eq!(room.bounding_box, NormalizedBox::clamped(150, 175, 650, 675));
}

#[test]
fn test_snapping_absorbs_residual_misalignment() {
    // True offset (12, 5) is off the coarse search grid; the search
    // settles on dx=10 and snapping pulls the edges the rest of the way
    // onto the walls at x=32 and x=132.
    let plan = parse_vector_plan(PLAN_SVG).unwrap();
    let raster = rendered_plan(12, 5);
    let config = DetectionConfig {
        match_tolerance: 4,
        snap_to_walls: true,
        ..Default::default()
    };

    let report = extract_rooms(&plan, &raster, &config);

    assert_eq!(report.offset, Offset::new(10, 5));
    assert_eq!(
        report.rooms[0].bounding_box,
        NormalizedBox::clamped(160, 175, 660, 675)
    );
}

#[test]
fn test_raster_only_extraction() {
    // Two rooms separated by a divider, no vector data at all.
    let mut img = GrayImage::from_pixel(200, 200, Luma([255]));
    for x in 10..190 {
        for y in [10, 11, 187, 188] {
            img.put_pixel(x, y, Luma([0]));
        }
    }
    for y in 10..189 {
        for x in [10, 11, 99, 100, 187, 188] {
            img.put_pixel(x, y as u32, Luma([0]));
        }
    }

    let config = DetectionConfig {
        min_room_area: 3000.0,
        ..Default::default()
    };
    let report = extract_rooms_from_raster(&img, &FloodFillSegmenter, &config);

    // The unenclosed space outside the outer walls is not a room.
    assert_eq!(report.offset, Offset::ZERO);
    assert_eq!(report.rooms.len(), 2);
    for room in &report.rooms {
        assert!(room.id.starts_with("region_"));
        assert_eq!(room.confidence, None);
        let b = &room.bounding_box;
        for coord in [b.x_min, b.y_min, b.x_max, b.y_max] {
            assert!((0..=1000).contains(&coord));
        }
    }
}

#[test]
fn test_all_white_raster_yields_no_rooms() {
    // No walls, no enclosure: a blank plan must produce an empty room
    // list, not one room spanning the whole image.
    let img = GrayImage::from_pixel(200, 200, Luma([255]));
    let report =
        extract_rooms_from_raster(&img, &FloodFillSegmenter, &DetectionConfig::default());

    assert!(report.rooms.is_empty());
    assert!(report.walls.is_empty());
    assert_eq!(report.offset, Offset::ZERO);
}

#[test]
fn test_report_serializes_to_json() {
    let plan = parse_vector_plan(PLAN_SVG).unwrap();
    let raster = rendered_plan(0, 0);
    let report = extract_rooms(&plan, &raster, &DetectionConfig::default());

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"room_001\""));
    assert!(json.contains("\"offset\""));
    assert!(json.contains("\"walls\""));
}

#[test]
fn test_malformed_vector_document_is_an_error() {
    let raster = rendered_plan(0, 0);
    let result =
        extract_rooms_from_svg_str("not an svg <<", &raster, &DetectionConfig::default());
    assert!(result.is_err());
}
