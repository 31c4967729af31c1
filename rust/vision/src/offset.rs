// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registration-offset discovery between vector and raster space
//!
//! The vector description and the rendered raster of the same floor plan
//! frequently disagree by a small systematic translation. The corrector
//! searches a bounded grid of candidate (dx, dy) translations for the
//! one that lands the most room edges within tolerance of a detected
//! wall, independently per axis.

use crate::types::{DetectionConfig, Offset, RoomEdges, WallLines};

/// Find the (dx, dy) translation that best aligns room edges with
/// detected walls.
///
/// The two axes are searched independently: dx against vertical walls,
/// dy against horizontal walls. With no edges or no walls on an axis
/// the identity offset is returned for that axis; an all-zero score
/// surface also yields the identity. Ties keep the first-seen candidate
/// in ascending iteration order.
pub fn correct_offset(edges: &RoomEdges, walls: &WallLines, config: &DetectionConfig) -> Offset {
    let dx = best_axis_offset(&edges.vertical, &walls.vertical, config);
    let dy = best_axis_offset(&edges.horizontal, &walls.horizontal, config);

    tracing::debug!(dx, dy, "Offset search complete");
    Offset::new(dx, dy)
}

fn best_axis_offset(edges: &[i32], walls: &[i32], config: &DetectionConfig) -> i32 {
    if edges.is_empty() || walls.is_empty() {
        return 0;
    }

    let range = config.search_range;
    let step = config.search_step.max(1);

    let coarse_candidates = step_range(-range, range, step);
    let (best, best_matches) = scan(edges, walls, coarse_candidates, config.match_tolerance);

    if !config.two_stage_search {
        return best;
    }

    // Refine around the coarse winner with a step-1 pass, clamped to the
    // original search range. A tie keeps the coarse winner.
    let half = (step / 2).max(1);
    let lo = (best - half).max(-range);
    let hi = (best + half).min(range);
    let (refined, refined_matches) = scan(edges, walls, step_range(lo, hi, 1), config.match_tolerance);

    if refined_matches > best_matches {
        refined
    } else {
        best
    }
}

fn step_range(lo: i32, hi: i32, step: i32) -> impl Iterator<Item = i32> {
    std::iter::successors(Some(lo), move |&c| {
        let next = c + step;
        (next <= hi).then_some(next)
    })
}

/// Count edges landing within tolerance of any wall for each candidate,
/// keeping the first-seen highest score.
fn scan(
    edges: &[i32],
    walls: &[i32],
    candidates: impl Iterator<Item = i32>,
    tolerance: i32,
) -> (i32, usize) {
    let mut best = 0;
    let mut best_matches = 0;

    for candidate in candidates {
        let matches = edges
            .iter()
            .filter(|&&edge| {
                let adjusted = edge + candidate;
                walls.iter().any(|&wall| (adjusted - wall).abs() < tolerance)
            })
            .count();
        if matches > best_matches {
            best_matches = matches;
            best = candidate;
        }
    }

    (best, best_matches)
}
