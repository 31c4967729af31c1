// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction pipeline orchestration
//!
//! Every path ends in normalized 0-1000 room boxes. The vector+raster
//! path aligns parsed polygons with detected walls before normalizing;
//! the raster-only path segments open space directly; the vector-only
//! path normalizes against the canvas itself.
//!
//! The pipeline is a pure function of its inputs and holds no state
//! across invocations; batches of images can run on independent threads
//! with no synchronization.

use crate::error::Result;
use crate::normalize::{map_box, normalize_box, scale_factors, snap_box_to_walls};
use crate::offset::correct_offset;
use crate::segmenter::RoomSegmenter;
use crate::types::{DetectionConfig, Offset, RoomEdges, WallLines};
use crate::wall_detector::detect_walls;
use image::GrayImage;
use roomplan_core::{parse_vector_plan, Room, VectorPlan};
use serde::Serialize;

/// Pipeline output: rooms plus the diagnostics artifacts
/// (wall lines and the offset actually applied).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    pub rooms: Vec<Room>,
    pub walls: WallLines,
    pub offset: Offset,
}

/// Extract normalized rooms from a vector plan registered against a
/// raster of the same floor plan.
///
/// Room boxes are scaled into raster space, translated by the offset
/// found by wall alignment, optionally snapped to walls, and normalized
/// against the raster dimensions. Vector-derived rooms carry confidence
/// 1.0 and whatever label/type hints the parser found.
///
/// A zero-size raster or a degenerate canvas yields an empty report;
/// neither can produce finite scale factors.
pub fn extract_rooms(
    plan: &VectorPlan,
    grayscale: &GrayImage,
    config: &DetectionConfig,
) -> ExtractionReport {
    let width = grayscale.width();
    let height = grayscale.height();
    if width == 0 || height == 0 || plan.canvas.width <= 0.0 || plan.canvas.height <= 0.0 {
        return ExtractionReport::default();
    }

    let (scale_x, scale_y) = scale_factors(&plan.canvas, width, height);
    let walls = detect_walls(grayscale, config);
    tracing::debug!(
        horizontal = walls.horizontal.len(),
        vertical = walls.vertical.len(),
        "Wall detection complete"
    );

    let scaled: Vec<_> = plan
        .rooms
        .iter()
        .map(|r| map_box(&r.bounding_box, scale_x, scale_y, Offset::ZERO))
        .collect();
    let edges = RoomEdges::from_boxes(&scaled);
    let offset = correct_offset(&edges, &walls, config);

    let rooms = plan
        .rooms
        .iter()
        .zip(&scaled)
        .enumerate()
        .map(|(i, (vector_room, scaled_box))| {
            let mut raster_box = map_box(scaled_box, 1.0, 1.0, offset);
            if config.snap_to_walls {
                raster_box = snap_box_to_walls(&raster_box, &walls, config.snap_tolerance);
            }
            Room {
                id: format!("room_{:03}", i + 1),
                bounding_box: normalize_box(&raster_box, width as f64, height as f64),
                confidence: Some(1.0),
                name_hint: vector_room.name_hint.clone(),
                room_type: vector_room.room_type.clone(),
            }
        })
        .collect();

    tracing::info!(
        rooms = plan.rooms.len(),
        dx = offset.dx,
        dy = offset.dy,
        "Vector room extraction complete"
    );

    ExtractionReport {
        rooms,
        walls,
        offset,
    }
}

/// Convenience wrapper: parse the vector document text, then run
/// [`extract_rooms`].
pub fn extract_rooms_from_svg_str(
    xml: &str,
    grayscale: &GrayImage,
    config: &DetectionConfig,
) -> Result<ExtractionReport> {
    let plan = parse_vector_plan(xml)?;
    Ok(extract_rooms(&plan, grayscale, config))
}

/// Extract normalized rooms from a raster alone, with no vector data.
///
/// The segmentation strategy is chosen by the caller at construction
/// time. Raster-derived rooms have no confidence or label hints.
pub fn extract_rooms_from_raster(
    grayscale: &GrayImage,
    segmenter: &dyn RoomSegmenter,
    config: &DetectionConfig,
) -> ExtractionReport {
    let width = grayscale.width();
    let height = grayscale.height();
    if width == 0 || height == 0 {
        return ExtractionReport::default();
    }

    let walls = detect_walls(grayscale, config);
    let regions = segmenter.segment(grayscale, config);

    let rooms = regions
        .iter()
        .enumerate()
        .map(|(i, region)| {
            let mut raster_box = region.bounding_box;
            if config.snap_to_walls {
                raster_box = snap_box_to_walls(&raster_box, &walls, config.snap_tolerance);
            }
            Room {
                id: format!("region_{:03}", i + 1),
                bounding_box: normalize_box(&raster_box, width as f64, height as f64),
                confidence: None,
                name_hint: None,
                room_type: None,
            }
        })
        .collect();

    tracing::info!(regions = regions.len(), "Raster room extraction complete");

    ExtractionReport {
        rooms,
        walls,
        offset: Offset::ZERO,
    }
}

/// Extract normalized rooms from a vector plan with no raster at all.
///
/// Boxes are normalized directly against the canvas dimensions.
pub fn extract_rooms_from_vector(plan: &VectorPlan) -> Vec<Room> {
    if plan.canvas.width <= 0.0 || plan.canvas.height <= 0.0 {
        return Vec::new();
    }

    plan.rooms
        .iter()
        .enumerate()
        .map(|(i, vector_room)| Room {
            id: format!("room_{:03}", i + 1),
            bounding_box: normalize_box(
                &vector_room.bounding_box,
                plan.canvas.width,
                plan.canvas.height,
            ),
            confidence: Some(1.0),
            name_hint: vector_room.name_hint.clone(),
            room_type: vector_room.room_type.clone(),
        })
        .collect()
}
