//! Measurement-driven polygon engine
//!
//! Pure, synchronous functions: measurement text in, polygon out. The same
//! input always yields bit-identical vertices, so a result computed locally
//! while offline matches the one persisted later.

pub mod builder;
pub mod metrics;
pub mod parser;

pub use builder::{build_polygon, build_vertices};
pub use metrics::{bounding_span, centroid, polygon_area, signed_area, DEGENERATE_AREA_EPSILON};
pub use parser::{parse_measurement_line, parse_measurements};

use crate::models::Polygon;

/// Parse measurement text and build its polygon in one step
pub fn polygon_from_text(text: &str) -> Option<Polygon> {
    build_polygon(&parse_measurements(text))
}
