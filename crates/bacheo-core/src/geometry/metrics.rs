//! Area, centroid and extent of vertex lists

use crate::models::{BoundingSpan, Vertex};

/// Signed areas below this magnitude are treated as degenerate.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-6;

/// Shoelace sum over consecutive vertex pairs, wrapping at the end.
///
/// Positive for counter-clockwise winding in a y-up frame.
pub fn signed_area(vertices: &[Vertex]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let n = vertices.len();
    let sum: f64 = (0..n)
        .map(|i| {
            let p = vertices[i];
            let q = vertices[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    sum / 2.0
}

/// Unsigned polygon area in square meters; 0 for fewer than 3 vertices
pub fn polygon_area(vertices: &[Vertex]) -> f64 {
    signed_area(vertices).abs()
}

/// Area centroid of the polygon.
///
/// Falls back to the vertex mean when the polygon is degenerate
/// (collinear or coincident points). `None` for an empty list.
pub fn centroid(vertices: &[Vertex]) -> Option<Vertex> {
    if vertices.is_empty() {
        return None;
    }

    let n = vertices.len();
    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        twice_area += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }

    let area = twice_area / 2.0;
    if n < 3 || area.abs() < DEGENERATE_AREA_EPSILON {
        return Some(vertex_mean(vertices));
    }

    Some(Vertex::new(cx / (6.0 * area), cy / (6.0 * area)))
}

fn vertex_mean(vertices: &[Vertex]) -> Vertex {
    let n = vertices.len() as f64;
    let sx: f64 = vertices.iter().map(|v| v.x).sum();
    let sy: f64 = vertices.iter().map(|v| v.y).sum();
    Vertex::new(sx / n, sy / n)
}

/// Axis-aligned extent; `None` for an empty list
pub fn bounding_span(vertices: &[Vertex]) -> Option<BoundingSpan> {
    let first = vertices.first()?;
    let init = BoundingSpan { min_x: first.x, max_x: first.x, min_y: first.y, max_y: first.y };
    Some(vertices.iter().skip(1).fold(init, |span, v| BoundingSpan {
        min_x: span.min_x.min(v.x),
        max_x: span.max_x.max(v.x),
        min_y: span.min_y.min(v.y),
        max_y: span.max_y.max(v.y),
    }))
}
