// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raster-side types for wall detection and offset correction

use roomplan_core::BoundingBox;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Detected wall-line positions in raster pixel space.
///
/// Each entry is the centroid of a contiguous run of wall-classified
/// rows or columns; both lists are ascending. Wall lines are derived
/// per detection pass and never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WallLines {
    /// Row indices of horizontal walls
    pub horizontal: Vec<i32>,
    /// Column indices of vertical walls
    pub vertical: Vec<i32>,
}

impl WallLines {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}

/// Integer pixel translation aligning vector geometry with the raster
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Deduplicated room-edge positions used for offset correction.
///
/// Edges are in raster units (already scaled from canvas space) but not
/// yet shifted by any offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomEdges {
    /// x positions of left/right edges, matched against vertical walls
    pub vertical: Vec<i32>,
    /// y positions of top/bottom edges, matched against horizontal walls
    pub horizontal: Vec<i32>,
}

impl RoomEdges {
    /// Collect the distinct edge positions of a set of boxes.
    pub fn from_boxes(boxes: &[BoundingBox]) -> Self {
        let mut vertical = FxHashSet::default();
        let mut horizontal = FxHashSet::default();

        for b in boxes {
            vertical.insert(b.x_min as i32);
            vertical.insert(b.x_max as i32);
            horizontal.insert(b.y_min as i32);
            horizontal.insert(b.y_max as i32);
        }

        let mut vertical: Vec<i32> = vertical.into_iter().collect();
        let mut horizontal: Vec<i32> = horizontal.into_iter().collect();
        vertical.sort_unstable();
        horizontal.sort_unstable();

        Self {
            vertical,
            horizontal,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// A connected open-space region reduced to its bounding box
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentedRegion {
    pub bounding_box: BoundingBox,
    /// Region pixel count for flood fill, rectangle area for the grid
    /// fallback
    pub area: f64,
}

/// Configuration for the detection and correction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Intensity below which a pixel counts as wall (0-255)
    pub wall_threshold: u8,
    /// Fraction of a row/column that must be dark for it to be
    /// wall-bearing; the count must strictly exceed
    /// `dimension * min_run_fraction`
    pub min_run_fraction: f64,
    /// Adjacent wall-bearing positions within this distance merge into
    /// one wall line (pixels)
    pub wall_merge_distance: i32,
    /// Minimum connected-region pixel area for a room (square pixels)
    pub min_room_area: f64,
    /// Minimum rectangle area accepted by the grid fallback segmenter
    pub min_cell_area: f64,
    /// Offset search extends over -search_range..=search_range (pixels)
    pub search_range: i32,
    /// Offset search grid step (pixels)
    pub search_step: i32,
    /// An edge matches a wall when strictly closer than this (pixels)
    pub match_tolerance: i32,
    /// Coarse-to-fine offset search instead of the flat grid
    pub two_stage_search: bool,
    /// Snap box edges to detected walls after offset correction
    pub snap_to_walls: bool,
    /// Maximum edge-to-wall distance for snapping (pixels)
    pub snap_tolerance: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            wall_threshold: 50,
            min_run_fraction: 0.1,
            wall_merge_distance: 3,
            min_room_area: 5000.0,
            min_cell_area: 1000.0,
            search_range: 50,
            search_step: 5,
            match_tolerance: 10,
            two_stage_search: false,
            snap_to_walls: false,
            snap_tolerance: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_edges_deduplicate_and_sort() {
        let boxes = vec![
            BoundingBox::new(10.0, 20.0, 110.0, 220.0),
            BoundingBox::new(110.0, 20.0, 210.0, 220.0),
        ];

        let edges = RoomEdges::from_boxes(&boxes);
        assert_eq!(edges.vertical, vec![10, 110, 210]);
        assert_eq!(edges.horizontal, vec![20, 220]);
    }

    #[test]
    fn test_room_edges_empty() {
        let edges = RoomEdges::from_boxes(&[]);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_default_config_matches_reference_values() {
        let config = DetectionConfig::default();
        assert_eq!(config.wall_threshold, 50);
        assert_eq!(config.search_range, 50);
        assert_eq!(config.search_step, 5);
        assert_eq!(config.match_tolerance, 10);
        assert!(!config.two_stage_search);
    }
}
