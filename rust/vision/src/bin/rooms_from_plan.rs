// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Extract normalized room bounding boxes from a floor plan
//!
//! Works from a raster alone (segmentation) or from a raster paired with
//! an SVG vector description of the same plan (parse + wall alignment).
//!
//! Usage:
//!   rooms-from-plan <image_path> [options]

use image::{GrayImage, ImageReader};
use roomplan_vision::{
    extract_rooms_from_raster, extract_rooms_from_svg_str, DetectionConfig, ExtractionReport,
    FloodFillSegmenter, RoomSegmenter, WallGridSegmenter,
};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let image_path = &args[1];

    // Parse options
    let mut svg_path: Option<String> = None;
    let mut segmenter_name = String::from("flood");
    let mut output_path = String::from("rooms.json");
    let mut snap = false;
    let mut two_stage = false;
    let mut debug_mode = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--svg" => {
                i += 1;
                svg_path = Some(args[i].clone());
            }
            "--segmenter" => {
                i += 1;
                segmenter_name = args[i].clone();
            }
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--snap" => {
                snap = true;
            }
            "--two-stage" => {
                two_stage = true;
            }
            "--debug" => {
                debug_mode = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    println!("=== Room Box Extractor ===");
    println!();

    // Step 1: Load image
    println!("[1/4] Loading image: {}", image_path);
    let img = ImageReader::open(image_path)
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot open image '{}': {}", image_path, e);
            std::process::exit(1);
        })
        .decode()
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot decode image '{}': {}", image_path, e);
            std::process::exit(1);
        });

    let grayscale: GrayImage = img.to_luma8();
    println!(
        "  Image size: {}x{} pixels",
        grayscale.width(),
        grayscale.height()
    );

    // Step 2: Configure
    println!("[2/4] Configuring extraction...");
    let config = DetectionConfig {
        snap_to_walls: snap,
        two_stage_search: two_stage,
        ..Default::default()
    };
    println!("  Snap to walls: {}", snap);
    println!("  Two-stage offset search: {}", two_stage);

    // Step 3: Extract
    let report = if let Some(svg_path) = &svg_path {
        println!("[3/4] Extracting rooms from vector plan: {}", svg_path);
        let xml = fs::read_to_string(svg_path).unwrap_or_else(|e| {
            eprintln!("Error: Cannot read SVG '{}': {}", svg_path, e);
            std::process::exit(1);
        });
        extract_rooms_from_svg_str(&xml, &grayscale, &config).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        })
    } else {
        println!("[3/4] Segmenting raster (strategy: {})...", segmenter_name);
        let segmenter: Box<dyn RoomSegmenter> = match segmenter_name.as_str() {
            "flood" => Box::new(FloodFillSegmenter),
            "grid" => Box::new(WallGridSegmenter),
            other => {
                eprintln!("Unknown segmenter '{}' (expected flood or grid)", other);
                std::process::exit(1);
            }
        };
        extract_rooms_from_raster(&grayscale, segmenter.as_ref(), &config)
    };

    println!(
        "  Walls: {} horizontal, {} vertical",
        report.walls.horizontal.len(),
        report.walls.vertical.len()
    );
    println!(
        "  Offset applied: ({}, {})",
        report.offset.dx, report.offset.dy
    );
    println!("  Rooms found: {}", report.rooms.len());
    for room in &report.rooms {
        let b = &room.bounding_box;
        println!(
            "    {}: [{}, {}, {}, {}]{}",
            room.id,
            b.x_min,
            b.y_min,
            b.x_max,
            b.y_max,
            room.name_hint
                .as_deref()
                .map(|n| format!(" \"{}\"", n))
                .unwrap_or_default()
        );
    }

    // Step 4: Write JSON
    println!("[4/4] Writing output: {}", output_path);
    let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        eprintln!("Error: Cannot serialize report: {}", e);
        std::process::exit(1);
    });
    fs::write(&output_path, json).unwrap_or_else(|e| {
        eprintln!("Error: Cannot write '{}': {}", output_path, e);
        std::process::exit(1);
    });

    if debug_mode {
        save_debug_image(&grayscale, &report, image_path);
    }

    println!();
    println!("Done! {} rooms written to {}.", report.rooms.len(), output_path);
}

/// Save a debug overlay with room boxes denormalized back to pixel space
fn save_debug_image(grayscale: &GrayImage, report: &ExtractionReport, input_path: &str) {
    use image::{Rgb, RgbImage};
    use imageproc::drawing::draw_hollow_rect_mut;
    use imageproc::rect::Rect;

    let width = grayscale.width();
    let height = grayscale.height();

    let mut debug_img = RgbImage::new(width, height);
    for (x, y, pixel) in grayscale.enumerate_pixels() {
        let v = pixel.0[0];
        debug_img.put_pixel(x, y, Rgb([v, v, v]));
    }

    for room in &report.rooms {
        let b = room.bounding_box.denormalize(width as f64, height as f64);
        let w = (b.x_max - b.x_min).round() as u32;
        let h = (b.y_max - b.y_min).round() as u32;
        if w == 0 || h == 0 {
            continue;
        }
        draw_hollow_rect_mut(
            &mut debug_img,
            Rect::at(b.x_min.round() as i32, b.y_min.round() as i32).of_size(w, h),
            Rgb([0, 200, 0]),
        );
    }

    let debug_path = Path::new(input_path)
        .with_extension("rooms.png")
        .to_string_lossy()
        .to_string();
    debug_img.save(&debug_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not save debug image: {}", e);
    });
    println!("  Debug image saved: {}", debug_path);
}

fn print_usage() {
    println!(
        r#"Room Box Extractor
==================

Extracts normalized (0-1000) room bounding boxes from a floor plan.
With --svg the room polygons come from the vector description and are
aligned to the raster's detected walls; without it the raster is
segmented directly.

USAGE:
  rooms-from-plan <image_path> [OPTIONS]

ARGUMENTS:
  <image_path>           Path to floor plan raster (PNG, JPEG)

OPTIONS:
  --svg <path>           SVG vector description of the same plan
  --segmenter <name>     Raster segmentation strategy: flood | grid
                         (default: flood; ignored with --svg)
  --snap                 Snap box edges to detected walls
  --two-stage            Refine the offset search to unit precision
  --output <path>        Output JSON path (default: rooms.json)
  --debug                Save an overlay image with the room boxes
  -h, --help             Show this help message

EXAMPLES:
  # Raster-only extraction
  rooms-from-plan floorplan.png --debug

  # Vector + raster with wall alignment and snapping
  rooms-from-plan floorplan.png --svg floorplan.svg --snap --two-stage
"#
    );
}
