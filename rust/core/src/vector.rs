// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vector floor-plan parsing
//!
//! Reads an SVG-like vector description of a floor plan and extracts one
//! [`VectorRoom`] per room-bearing element, together with the canvas
//! dimensions and space-shift origin. The parser is a pure function over
//! the input text and performs no I/O.

use crate::error::{Error, Result};
use crate::types::{BoundingBox, Canvas, Point2D, Polygon};

/// Class markers that disqualify a `Space` element from room extraction
const EXCLUDED_MARKERS: [&str; 4] = ["Window", "Door", "Wall", "FixedFurniture"];

/// A single room as authored in the vector description.
///
/// Coordinates are in canvas units with the space shift already removed.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRoom {
    pub polygon: Polygon,
    pub bounding_box: BoundingBox,
    pub name_hint: Option<String>,
    pub room_type: Option<String>,
}

/// Parsed vector description: canvas geometry plus all extracted rooms
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPlan {
    pub canvas: Canvas,
    pub rooms: Vec<VectorRoom>,
}

/// Parse a coordinate-pair token string into points.
///
/// Tokens may be separated by commas, whitespace, or any mix of the two;
/// empty tokens are skipped. An odd token count is malformed input and
/// fails rather than silently dropping the trailing value.
pub fn parse_points(points_str: &str) -> Result<Vec<Point2D>> {
    let mut values = Vec::new();
    for token in points_str.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let value: f64 = token
            .parse()
            .map_err(|_| Error::InvalidCoordinate(token.to_string()))?;
        values.push(value);
    }

    if values.len() % 2 != 0 {
        return Err(Error::OddCoordinateCount(values.len()));
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| Point2D::new(pair[0], pair[1]))
        .collect())
}

/// Parse a full vector floor-plan document.
pub fn parse_vector_plan(xml: &str) -> Result<VectorPlan> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    let canvas = parse_canvas(&root)?;

    let mut rooms = Vec::new();
    for elem in root.descendants() {
        let Some(class) = elem.attribute("class") else {
            continue;
        };
        if !is_room_class(class) {
            continue;
        }

        let Some(polygon_node) = elem
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "polygon")
        else {
            continue;
        };

        let points_str = polygon_node.attribute("points").unwrap_or("");
        let points = parse_points(points_str)?;

        let polygon = Polygon::new(points).shifted(canvas.shift_x, canvas.shift_y);
        let Some(bounding_box) = polygon.bounding_box() else {
            continue;
        };

        rooms.push(VectorRoom {
            polygon,
            bounding_box,
            name_hint: extract_name_hint(&elem),
            room_type: extract_room_type(class),
        });
    }

    Ok(VectorPlan { canvas, rooms })
}

/// Whether a class attribute marks a room-bearing space element.
///
/// Windows, doors, walls, and fixed furniture match the generic space
/// marker in some sources and are excluded here.
fn is_room_class(class: &str) -> bool {
    if !class.contains("Space") || class.starts_with("SpaceDimensions") {
        return false;
    }
    !EXCLUDED_MARKERS.iter().any(|m| class.contains(m))
}

/// Room classification token from the class attribute, e.g. "Kitchen"
/// out of `class="Space Kitchen"`.
fn extract_room_type(class: &str) -> Option<String> {
    let tokens: Vec<&str> = class.split_whitespace().collect();
    if !tokens.contains(&"Space") {
        return None;
    }
    tokens
        .iter()
        .find(|t| **t != "Space")
        .map(|t| t.to_string())
}

/// Room name text: first text inside a NameLabel descendant, falling
/// back to the first text element anywhere under the space element.
fn extract_name_hint(elem: &roxmltree::Node) -> Option<String> {
    let label_group = elem.descendants().find(|n| {
        n.is_element()
            && (n.attribute("id").is_some_and(|id| id.ends_with("NameLabel"))
                || n.attribute("class").is_some_and(|c| c.contains("NameLabel")))
    });

    if let Some(group) = label_group {
        if let Some(text) = first_text(&group) {
            return Some(text);
        }
    }

    first_text(elem)
}

fn first_text(node: &roxmltree::Node) -> Option<String> {
    node.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "text")
        .find_map(|n| {
            let text = n.text()?.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        })
}

/// Canvas dimensions from `width`/`height` attributes or a viewBox.
///
/// A viewBox wins for the extents and supplies the shift origin. With
/// neither present the canvas defaults to 1000x1000 and zero shift.
fn parse_canvas(root: &roxmltree::Node) -> Result<Canvas> {
    let mut canvas = Canvas::default();

    if let Some(width) = root.attribute("width") {
        canvas.width = parse_dimension("width", width)?;
    }
    if let Some(height) = root.attribute("height") {
        canvas.height = parse_dimension("height", height)?;
    }

    if let Some(view_box) = root.attribute("viewBox") {
        let parts: Vec<&str> = view_box.split_whitespace().collect();
        if parts.len() >= 4 {
            let mut values = [0.0f64; 4];
            for (i, part) in parts[..4].iter().enumerate() {
                values[i] = part.parse().map_err(|_| Error::InvalidCanvasDimension {
                    attribute: "viewBox",
                    value: view_box.to_string(),
                })?;
            }
            canvas.shift_x = values[0];
            canvas.shift_y = values[1];
            canvas.width = values[2];
            canvas.height = values[3];
        }
    }

    Ok(canvas)
}

fn parse_dimension(attribute: &'static str, value: &str) -> Result<f64> {
    let trimmed = value.trim().trim_end_matches("px");
    trimmed.parse().map_err(|_| Error::InvalidCanvasDimension {
        attribute,
        value: value.to_string(),
    })
}
