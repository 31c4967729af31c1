// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data model and vector floor-plan parsing for room extraction
//!
//! This crate holds the coordinate-space record types shared by the
//! extraction pipeline (points, polygons, bounding boxes, rooms) and the
//! parser that pulls room polygons out of an SVG-like vector description
//! of a floor plan.
//!
//! Raster-side processing (wall detection, segmentation, offset
//! correction, normalization) lives in `roomplan-vision`.

pub mod error;
pub mod types;
pub mod vector;

pub use error::{Error, Result};
pub use types::{BoundingBox, Canvas, NormalizedBox, Point2D, Polygon, Room};
pub use vector::{parse_points, parse_vector_plan, VectorPlan, VectorRoom};
