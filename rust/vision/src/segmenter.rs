// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room segmentation over the open-space mask
//!
//! Two strategies implement [`RoomSegmenter`]; the caller picks one at
//! construction time. [`FloodFillSegmenter`] labels connected open-space
//! regions and is the accurate default. [`WallGridSegmenter`] subdivides
//! the raster into rectangles bounded by detected wall lines and is a
//! strictly less accurate fallback; it must be selected explicitly,
//! never substituted at call time.

use crate::types::{DetectionConfig, SegmentedRegion};
use crate::wall_detector::detect_walls;
use image::GrayImage;
use roomplan_core::BoundingBox;

/// Reduces a floor-plan raster to open-space regions with bounding boxes
pub trait RoomSegmenter {
    fn segment(&self, grayscale: &GrayImage, config: &DetectionConfig) -> Vec<SegmentedRegion>;
}

/// Connected-component labeling of the open-space mask (4-connected).
///
/// Components touching the image border are unenclosed exterior space,
/// not rooms, and are dropped; an all-white raster therefore yields no
/// regions at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloodFillSegmenter;

impl RoomSegmenter for FloodFillSegmenter {
    fn segment(&self, grayscale: &GrayImage, config: &DetectionConfig) -> Vec<SegmentedRegion> {
        let width = grayscale.width();
        let height = grayscale.height();
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let mut visited = vec![false; (width * height) as usize];
        let mut regions = Vec::new();

        for start_y in 0..height {
            for start_x in 0..width {
                let idx = (start_y * width + start_x) as usize;
                if visited[idx] {
                    continue;
                }
                if grayscale.get_pixel(start_x, start_y).0[0] < config.wall_threshold {
                    visited[idx] = true;
                    continue;
                }

                let region = fill_region(grayscale, start_x, start_y, &mut visited, config);
                if is_enclosed(&region, width, height) && region.area > config.min_room_area {
                    regions.push(region);
                }
            }
        }

        regions
    }
}

/// Whether a region stays clear of the image border. Border contact
/// means no wall encloses it on that side.
fn is_enclosed(region: &SegmentedRegion, width: u32, height: u32) -> bool {
    let b = &region.bounding_box;
    b.x_min > 0.0
        && b.y_min > 0.0
        && b.x_max < (width - 1) as f64
        && b.y_max < (height - 1) as f64
}

/// Flood fill one open-space component, tracking its extent and area.
fn fill_region(
    grayscale: &GrayImage,
    start_x: u32,
    start_y: u32,
    visited: &mut [bool],
    config: &DetectionConfig,
) -> SegmentedRegion {
    let width = grayscale.width();
    let height = grayscale.height();

    let mut min_x = start_x;
    let mut min_y = start_y;
    let mut max_x = start_x;
    let mut max_y = start_y;
    let mut area = 0u64;

    let mut stack = vec![(start_x, start_y)];
    while let Some((x, y)) = stack.pop() {
        let idx = (y * width + x) as usize;
        if visited[idx] {
            continue;
        }
        if grayscale.get_pixel(x, y).0[0] < config.wall_threshold {
            continue;
        }

        visited[idx] = true;
        area += 1;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);

        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
    }

    SegmentedRegion {
        bounding_box: BoundingBox::new(min_x as f64, min_y as f64, max_x as f64, max_y as f64),
        area: area as f64,
    }
}

/// Fallback segmenter: rectangles between consecutive wall lines.
///
/// A candidate rectangle is a room when at least half its interior
/// pixels are non-wall and its area exceeds `min_cell_area`. Less
/// accurate than flood fill: rooms spanning several wall cells come back
/// fragmented.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallGridSegmenter;

impl RoomSegmenter for WallGridSegmenter {
    fn segment(&self, grayscale: &GrayImage, config: &DetectionConfig) -> Vec<SegmentedRegion> {
        let walls = detect_walls(grayscale, config);

        let mut regions = Vec::new();
        for pair_y in walls.horizontal.windows(2) {
            for pair_x in walls.vertical.windows(2) {
                let (y_min, y_max) = (pair_y[0], pair_y[1]);
                let (x_min, x_max) = (pair_x[0], pair_x[1]);

                let cell_area = ((x_max - x_min) as f64) * ((y_max - y_min) as f64);
                if cell_area <= config.min_cell_area {
                    continue;
                }

                let space = count_space_pixels(grayscale, x_min, y_min, x_max, y_max, config);
                if space as f64 > cell_area * 0.5 {
                    regions.push(SegmentedRegion {
                        bounding_box: BoundingBox::new(
                            x_min as f64,
                            y_min as f64,
                            x_max as f64,
                            y_max as f64,
                        ),
                        area: cell_area,
                    });
                }
            }
        }

        regions
    }
}

fn count_space_pixels(
    grayscale: &GrayImage,
    x_min: i32,
    y_min: i32,
    x_max: i32,
    y_max: i32,
    config: &DetectionConfig,
) -> u64 {
    let mut count = 0u64;
    for y in y_min.max(0)..y_max.min(grayscale.height() as i32) {
        for x in x_min.max(0)..x_max.min(grayscale.width() as i32) {
            if grayscale.get_pixel(x as u32, y as u32).0[0] >= config.wall_threshold {
                count += 1;
            }
        }
    }
    count
}
