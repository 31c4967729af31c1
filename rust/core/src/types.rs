// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core record types for floor-plan room extraction

use serde::{Deserialize, Serialize};

/// A 2D point in vector-canvas or raster-pixel units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An ordered sequence of points describing a room outline.
///
/// The outline is implicitly closed; the first point is not repeated at
/// the end. Degenerate outlines (fewer than 3 points, collinear points)
/// are permitted and produce degenerate bounding boxes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point2D>,
}

impl Polygon {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Axis-aligned bounding box over all points.
    ///
    /// Returns `None` for an empty point list; a single point or a
    /// collinear run yields a zero-area box rather than an error.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let mut x_min = first.x;
        let mut y_min = first.y;
        let mut x_max = first.x;
        let mut y_max = first.y;

        for p in &self.points[1..] {
            x_min = x_min.min(p.x);
            y_min = y_min.min(p.y);
            x_max = x_max.max(p.x);
            y_max = y_max.max(p.y);
        }

        Some(BoundingBox::new(x_min, y_min, x_max, y_max))
    }

    /// Translate every point by (-dx, -dy).
    ///
    /// Used to remove a canvas space-shift origin before scaling.
    pub fn shifted(&self, dx: f64, dy: f64) -> Polygon {
        Polygon::new(
            self.points
                .iter()
                .map(|p| Point2D::new(p.x - dx, p.y - dy))
                .collect(),
        )
    }
}

/// Axis-aligned bounding box in vector-canvas or raster-pixel space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Construct a box, swapping any inverted axis so that
    /// `x_min <= x_max` and `y_min <= y_max` always hold.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        let (x_min, x_max) = if x_min <= x_max {
            (x_min, x_max)
        } else {
            (x_max, x_min)
        };
        let (y_min, y_max) = if y_min <= y_max {
            (y_min, y_max)
        } else {
            (y_max, y_min)
        };
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Expand any collapsed axis by one unit so both extents are positive.
    ///
    /// Snapping can pull opposite edges onto the same wall line; the max
    /// edge is pushed out by 1 unit in that case.
    pub fn ensure_positive_extent(mut self) -> Self {
        if self.x_max <= self.x_min {
            self.x_max = self.x_min + 1.0;
        }
        if self.y_max <= self.y_min {
            self.y_max = self.y_min + 1.0;
        }
        self
    }
}

/// Bounding box in the fixed normalized 0-1000 output range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl NormalizedBox {
    /// Upper bound of the normalized coordinate range
    pub const RANGE: i32 = 1000;

    /// Construct a normalized box, clamping every coordinate to
    /// [0, 1000] independently. A clamped `x_max` equal to a clamped
    /// `x_min` is legal; no cross-coordinate adjustment happens here.
    pub fn clamped(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            x_min: x_min.clamp(0, Self::RANGE),
            y_min: y_min.clamp(0, Self::RANGE),
            x_max: x_max.clamp(0, Self::RANGE),
            y_max: y_max.clamp(0, Self::RANGE),
        }
    }

    /// Map back into pixel space for a raster of the given dimensions.
    pub fn denormalize(&self, width: f64, height: f64) -> BoundingBox {
        let range = Self::RANGE as f64;
        BoundingBox::new(
            self.x_min as f64 / range * width,
            self.y_min as f64 / range * height,
            self.x_max as f64 / range * width,
            self.y_max as f64 / range * height,
        )
    }
}

/// Canvas dimensions and space-shift origin of a vector description.
///
/// The shift (a viewBox-style origin) must be subtracted from raw
/// polygon coordinates before any scaling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub shift_x: f64,
    pub shift_y: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shift_x: 0.0,
            shift_y: 0.0,
        }
    }
}

impl Default for Canvas {
    /// 1000x1000 with zero shift, used when the vector description
    /// declares no dimensions at all.
    fn default() -> Self {
        Self::new(1000.0, 1000.0)
    }
}

/// A detected or extracted room in normalized output space
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    pub bounding_box: NormalizedBox,
    /// 1.0 for rooms taken from structured vector data, absent for
    /// raster-derived rooms
    pub confidence: Option<f32>,
    /// Room name text found near the polygon, if any
    pub name_hint: Option<String>,
    /// Room classification tag from the vector description, if any
    pub room_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_bounding_box() {
        let poly = Polygon::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(100.0, 0.0),
            Point2D::new(100.0, 100.0),
            Point2D::new(0.0, 100.0),
        ]);

        let bbox = poly.bounding_box().unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_empty_polygon_has_no_bbox() {
        let poly = Polygon::new(vec![]);
        assert!(poly.bounding_box().is_none());
    }

    #[test]
    fn test_degenerate_polygon_yields_zero_area_box() {
        let poly = Polygon::new(vec![
            Point2D::new(5.0, 2.0),
            Point2D::new(9.0, 2.0),
            Point2D::new(7.0, 2.0),
        ]);

        let bbox = poly.bounding_box().unwrap();
        assert_eq!(bbox.area(), 0.0);
        assert_eq!(bbox.width(), 4.0);
    }

    #[test]
    fn test_bounding_box_repairs_inverted_axes() {
        let bbox = BoundingBox::new(10.0, 20.0, 4.0, 6.0);
        assert_eq!(bbox, BoundingBox::new(4.0, 6.0, 10.0, 20.0));
    }

    #[test]
    fn test_ensure_positive_extent() {
        let collapsed = BoundingBox::new(11.0, 10.0, 11.0, 50.0);
        let repaired = collapsed.ensure_positive_extent();
        assert_eq!(repaired.x_max, 12.0);
        assert_eq!(repaired.y_max, 50.0);
    }

    #[test]
    fn test_normalized_box_clamps_each_coordinate() {
        let boxed = NormalizedBox::clamped(-20, 500, 1400, 1000);
        assert_eq!(boxed.x_min, 0);
        assert_eq!(boxed.y_min, 500);
        assert_eq!(boxed.x_max, 1000);
        assert_eq!(boxed.y_max, 1000);
    }

    #[test]
    fn test_denormalize_scales_back_to_pixels() {
        let boxed = NormalizedBox::clamped(0, 0, 500, 1000);
        let pixels = boxed.denormalize(640.0, 480.0);
        assert_eq!(pixels, BoundingBox::new(0.0, 0.0, 320.0, 480.0));
    }

    #[test]
    fn test_polygon_shift() {
        let poly = Polygon::new(vec![Point2D::new(10.0, 20.0)]);
        let shifted = poly.shifted(10.0, 20.0);
        assert_eq!(shifted.points[0], Point2D::new(0.0, 0.0));
    }
}
