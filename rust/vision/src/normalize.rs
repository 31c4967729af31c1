// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate-space conversions and wall snapping
//!
//! Three coordinate systems meet here: the vector canvas the polygons
//! were authored in, the raster pixel grid of the rendered plan, and the
//! fixed normalized 0-1000 output range. Letterbox handling covers boxes
//! that passed through an aspect-preserving square resize with centered
//! padding.

use crate::types::{Offset, WallLines};
use roomplan_core::{BoundingBox, Canvas, NormalizedBox, Point2D};

/// Per-axis scale factors from canvas space to raster space.
///
/// The two axes scale independently; no uniform-scale assumption.
pub fn scale_factors(canvas: &Canvas, raster_width: u32, raster_height: u32) -> (f64, f64) {
    (
        raster_width as f64 / canvas.width,
        raster_height as f64 / canvas.height,
    )
}

/// Map a canvas-space point into raster space with a corrected offset.
pub fn map_point(p: Point2D, scale_x: f64, scale_y: f64, offset: Offset) -> Point2D {
    Point2D::new(
        p.x * scale_x + offset.dx as f64,
        p.y * scale_y + offset.dy as f64,
    )
}

/// Map a canvas-space box into raster space with a corrected offset.
pub fn map_box(b: &BoundingBox, scale_x: f64, scale_y: f64, offset: Offset) -> BoundingBox {
    BoundingBox::new(
        b.x_min * scale_x + offset.dx as f64,
        b.y_min * scale_y + offset.dy as f64,
        b.x_max * scale_x + offset.dx as f64,
        b.y_max * scale_y + offset.dy as f64,
    )
}

/// Geometry of an aspect-preserving resize into a padded target frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f64,
    pub pad_x: f64,
    pub pad_y: f64,
}

impl Letterbox {
    /// Compute the scale and centered padding used when `src` was fitted
    /// into `target` (the external resize truncates the scaled content
    /// size to whole pixels and splits the remainder evenly).
    pub fn new(src_width: u32, src_height: u32, target_width: u32, target_height: u32) -> Self {
        let scale = (target_width as f64 / src_width as f64)
            .min(target_height as f64 / src_height as f64);
        let content_width = (src_width as f64 * scale) as i32;
        let content_height = (src_height as f64 * scale) as i32;
        Self {
            scale,
            pad_x: ((target_width as i32 - content_width) / 2) as f64,
            pad_y: ((target_height as i32 - content_height) / 2) as f64,
        }
    }

    /// Original-space box to letterboxed-frame coordinates.
    pub fn apply(&self, b: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            b.x_min * self.scale + self.pad_x,
            b.y_min * self.scale + self.pad_y,
            b.x_max * self.scale + self.pad_x,
            b.y_max * self.scale + self.pad_y,
        )
    }

    /// Letterboxed-frame box back to original-space coordinates.
    pub fn invert(&self, b: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            (b.x_min - self.pad_x) / self.scale,
            (b.y_min - self.pad_y) / self.scale,
            (b.x_max - self.pad_x) / self.scale,
            (b.y_max - self.pad_y) / self.scale,
        )
    }
}

/// Map a pixel-space box into the normalized 0-1000 range.
///
/// Each coordinate is rounded first and clamped after; the four
/// coordinates are treated identically with no cross-coordinate repair,
/// so a fully out-of-frame box collapses to a legal zero-extent result.
pub fn normalize_box(b: &BoundingBox, width: f64, height: f64) -> NormalizedBox {
    let range = NormalizedBox::RANGE as f64;
    NormalizedBox::clamped(
        (b.x_min / width * range).round() as i32,
        (b.y_min / height * range).round() as i32,
        (b.x_max / width * range).round() as i32,
        (b.y_max / height * range).round() as i32,
    )
}

/// Snap each box edge to the nearest same-axis wall line within
/// tolerance, then repair any axis the snap collapsed.
pub fn snap_box_to_walls(b: &BoundingBox, walls: &WallLines, tolerance: f64) -> BoundingBox {
    BoundingBox::new(
        snap_edge(b.x_min, &walls.vertical, tolerance),
        snap_edge(b.y_min, &walls.horizontal, tolerance),
        snap_edge(b.x_max, &walls.vertical, tolerance),
        snap_edge(b.y_max, &walls.horizontal, tolerance),
    )
    .ensure_positive_extent()
}

fn snap_edge(value: f64, walls: &[i32], tolerance: f64) -> f64 {
    let mut nearest = value;
    let mut nearest_distance = f64::MAX;
    for &wall in walls {
        let distance = (wall as f64 - value).abs();
        if distance < nearest_distance {
            nearest_distance = distance;
            nearest = wall as f64;
        }
    }

    if nearest_distance <= tolerance {
        nearest
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scale_factors_are_independent_per_axis() {
        let canvas = Canvas::new(1000.0, 800.0);
        let (sx, sy) = scale_factors(&canvas, 500, 600);
        assert_relative_eq!(sx, 0.5);
        assert_relative_eq!(sy, 0.75);
    }

    #[test]
    fn test_map_point_applies_scale_then_offset() {
        let p = map_point(Point2D::new(100.0, 200.0), 2.0, 0.5, Offset::new(10, -5));
        assert_eq!(p, Point2D::new(210.0, 95.0));
    }

    #[test]
    fn test_letterbox_round_trip_within_one_pixel() {
        let cases = [
            (800u32, 600u32),
            (600, 800),
            (640, 640),
            (1023, 511),
            (333, 777),
        ];

        for (w, h) in cases {
            let letterbox = Letterbox::new(w, h, 640, 640);
            let original = BoundingBox::new(12.0, 34.0, 400.0, 250.0);
            let recovered = letterbox.invert(&letterbox.apply(&original));

            assert_relative_eq!(recovered.x_min, original.x_min, epsilon = 1.0);
            assert_relative_eq!(recovered.y_min, original.y_min, epsilon = 1.0);
            assert_relative_eq!(recovered.x_max, original.x_max, epsilon = 1.0);
            assert_relative_eq!(recovered.y_max, original.y_max, epsilon = 1.0);
        }
    }

    #[test]
    fn test_letterbox_pads_the_short_axis() {
        // 800x600 into 640x640: scale 0.8, content 640x480, pad (0, 80).
        let letterbox = Letterbox::new(800, 600, 640, 640);
        assert_relative_eq!(letterbox.scale, 0.8);
        assert_relative_eq!(letterbox.pad_x, 0.0);
        assert_relative_eq!(letterbox.pad_y, 80.0);
    }

    #[test]
    fn test_normalize_rounds_then_clamps() {
        let b = BoundingBox::new(-10.0, 0.0, 639.9, 640.0);
        let n = normalize_box(&b, 640.0, 640.0);
        assert_eq!(n.x_min, 0);
        assert_eq!(n.y_min, 0);
        // 639.9 / 640 * 1000 = 999.84..., rounds to 1000 before clamping
        assert_eq!(n.x_max, 1000);
        assert_eq!(n.y_max, 1000);
    }

    #[test]
    fn test_normalize_is_idempotent_over_normalized_boxes() {
        let n = NormalizedBox::clamped(0, 100, 125, 1000);
        let as_box = BoundingBox::new(
            n.x_min as f64,
            n.y_min as f64,
            n.x_max as f64,
            n.y_max as f64,
        );
        let again = normalize_box(&as_box, 1000.0, 1000.0);
        assert_eq!(again, n);
    }

    #[test]
    fn test_normalize_clamp_invariant() {
        let extremes = [
            BoundingBox::new(-1e6, -1e6, 1e6, 1e6),
            BoundingBox::new(0.0, 0.0, 0.0, 0.0),
            BoundingBox::new(5000.0, 5000.0, 6000.0, 6000.0),
        ];
        for b in extremes {
            let n = normalize_box(&b, 640.0, 480.0);
            for coord in [n.x_min, n.y_min, n.x_max, n.y_max] {
                assert!((0..=1000).contains(&coord));
            }
        }
    }

    #[test]
    fn test_fully_clamped_box_may_collapse() {
        let b = BoundingBox::new(2000.0, 2000.0, 3000.0, 3000.0);
        let n = normalize_box(&b, 640.0, 640.0);
        assert_eq!(n.x_min, n.x_max);
        assert_eq!(n.x_min, 1000);
    }

    #[test]
    fn test_snap_moves_edges_within_tolerance_only() {
        let walls = WallLines {
            horizontal: vec![100, 300],
            vertical: vec![50, 250],
        };
        let b = BoundingBox::new(45.0, 110.0, 200.0, 290.0);
        let snapped = snap_box_to_walls(&b, &walls, 15.0);

        assert_eq!(snapped.x_min, 50.0); // within 15 of wall 50
        assert_eq!(snapped.y_min, 100.0); // within 15 of wall 100
        assert_eq!(snapped.x_max, 200.0); // 50 from nearest wall, unchanged
        assert_eq!(snapped.y_max, 300.0); // within 15 of wall 300
    }

    #[test]
    fn test_snap_collapse_guard() {
        // Both x edges snap onto the wall at 11; the repair restores a
        // positive width by pushing x_max to 12.
        let walls = WallLines {
            horizontal: vec![],
            vertical: vec![11],
        };
        let b = BoundingBox::new(10.0, 10.0, 12.0, 50.0);
        let snapped = snap_box_to_walls(&b, &walls, 15.0);

        assert_eq!(snapped.x_min, 11.0);
        assert_eq!(snapped.x_max, 12.0);
        assert_eq!(snapped.y_min, 10.0);
        assert_eq!(snapped.y_max, 50.0);
    }

    #[test]
    fn test_snap_with_no_walls_is_identity() {
        let b = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let snapped = snap_box_to_walls(&b, &WallLines::default(), 15.0);
        assert_eq!(snapped, b);
    }
}
