// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raster processing and room-box extraction for floor plans
//!
//! This crate provides the pipeline that turns a floor plan into
//! normalized room bounding boxes:
//! 1. Detecting wall lines in a grayscale raster (dark row/column scans)
//! 2. Segmenting open space into rooms (flood fill or wall-grid fallback)
//! 3. Correcting the systematic offset between vector and raster space
//! 4. Normalizing boxes into the fixed 0-1000 output range
//!
//! # Usage
//!
//! ```rust,ignore
//! use roomplan_vision::{extract_rooms, DetectionConfig};
//! use roomplan_core::parse_vector_plan;
//!
//! let plan = parse_vector_plan(&svg_text)?;
//! let report = extract_rooms(&plan, &grayscale_image, &DetectionConfig::default());
//! for room in &report.rooms {
//!     println!("{}: {:?}", room.id, room.bounding_box);
//! }
//! ```

pub mod error;
pub mod normalize;
pub mod offset;
pub mod pipeline;
pub mod segmenter;
pub mod types;
pub mod wall_detector;

// Re-export commonly used types and functions
pub use error::{Error, Result};
pub use normalize::{map_box, map_point, normalize_box, scale_factors, snap_box_to_walls, Letterbox};
pub use offset::correct_offset;
pub use pipeline::{
    extract_rooms, extract_rooms_from_raster, extract_rooms_from_svg_str,
    extract_rooms_from_vector, ExtractionReport,
};
pub use segmenter::{FloodFillSegmenter, RoomSegmenter, WallGridSegmenter};
pub use types::{DetectionConfig, Offset, RoomEdges, SegmentedRegion, WallLines};
pub use wall_detector::detect_walls;
