//! Polygon construction from edge measurements
//!
//! Vertex order is fixed: the top edge first, left to right, then around
//! the shape. The curb edge tables in `models::curb` index into this order.

use crate::geometry::metrics::polygon_area;
use crate::models::{MeasurementSet, Polygon, Vertex};

/// Vertices for a measurement set, in builder order
pub fn build_vertices(set: &MeasurementSet) -> Vec<Vertex> {
    match *set {
        MeasurementSet::Triangle { base_top, h_right, h_left } => {
            // Apex centred under the top edge, at the larger side height.
            let height = h_right.max(h_left);
            vec![
                Vertex::ORIGIN,
                Vertex::new(base_top, 0.0),
                Vertex::new(base_top / 2.0, height),
            ]
        }
        MeasurementSet::Trapezoid { w_top, h_right, w_bottom, h_left } => {
            // Bottom edge centred under the top edge.
            let offset = (w_top - w_bottom) / 2.0;
            vec![
                Vertex::ORIGIN,
                Vertex::new(w_top, 0.0),
                Vertex::new(offset + w_bottom, h_right),
                Vertex::new(offset, h_left),
            ]
        }
    }
}

/// Build the polygon for parsed measurements.
///
/// Returns `None` for fewer than 3 measurements.
pub fn build_polygon(measurements: &[f64]) -> Option<Polygon> {
    let set = MeasurementSet::from_values(measurements)?;
    let vertices = build_vertices(&set);
    let area = polygon_area(&vertices);
    Some(Polygon::new(set.kind(), vertices, area))
}
