// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall-line detection from grayscale floor-plan rasters
//!
//! Walls are rows or columns that are predominantly dark. A row is
//! wall-bearing when its dark-pixel count strictly exceeds
//! `width * min_run_fraction` (columns symmetric against the height).
//! Adjacent wall-bearing positions merge into a single line at their
//! mean position, so one physically thick wall reports one line.

use crate::types::{DetectionConfig, WallLines};
use image::GrayImage;

/// Scan a grayscale raster for horizontal and vertical wall lines.
///
/// A single O(width x height) pass; the row and column sweeps are
/// independent of each other. An image with no pixel below the threshold
/// yields empty lists; an all-black image never fails and merges each
/// axis into a single line.
pub fn detect_walls(grayscale: &GrayImage, config: &DetectionConfig) -> WallLines {
    let width = grayscale.width();
    let height = grayscale.height();
    if width == 0 || height == 0 {
        return WallLines::default();
    }

    let mut row_counts = vec![0u32; height as usize];
    let mut col_counts = vec![0u32; width as usize];

    for (x, y, pixel) in grayscale.enumerate_pixels() {
        if pixel.0[0] < config.wall_threshold {
            row_counts[y as usize] += 1;
            col_counts[x as usize] += 1;
        }
    }

    let row_required = width as f64 * config.min_run_fraction;
    let col_required = height as f64 * config.min_run_fraction;

    let rows: Vec<i32> = row_counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count as f64 > row_required)
        .map(|(y, _)| y as i32)
        .collect();
    let cols: Vec<i32> = col_counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count as f64 > col_required)
        .map(|(x, _)| x as i32)
        .collect();

    WallLines {
        horizontal: group_adjacent(&rows, config.wall_merge_distance),
        vertical: group_adjacent(&cols, config.wall_merge_distance),
    }
}

/// Merge ascending positions within `merge_distance` of their
/// predecessor into one line at the truncated mean of the run.
fn group_adjacent(positions: &[i32], merge_distance: i32) -> Vec<i32> {
    let Some(&first) = positions.first() else {
        return Vec::new();
    };

    let mut grouped = Vec::new();
    let mut run: Vec<i32> = vec![first];

    for &p in &positions[1..] {
        if p - run[run.len() - 1] <= merge_distance {
            run.push(p);
        } else {
            grouped.push(run_mean(&run));
            run.clear();
            run.push(p);
        }
    }
    grouped.push(run_mean(&run));

    grouped
}

fn run_mean(run: &[i32]) -> i32 {
    (run.iter().map(|&v| v as i64).sum::<i64>() as f64 / run.len() as f64) as i32
}
