//! Bacheo Geo - Map and canvas geometry
//!
//! This crate places local-plane bache polygons on the map (projection,
//! bounds, curb edges, GeoJSON overlays), fits them into a drawing canvas,
//! and hosts the asphalt repair calculator.

pub mod calculator;
pub mod canvas;
pub mod curb;
pub mod models;
pub mod projection;
pub mod sketch;

pub use calculator::{AsphaltEstimate, AsphaltInput, AsphaltTotals, LengthUnit};
pub use canvas::CanvasFit;
pub use curb::{curb_edge, curb_edge_for_token, curb_edge_of_record};
pub use models::{map_overlay, MapOverlay};
pub use projection::{GeoBounds, GeoProjector};
pub use sketch::{render_svg, SketchOptions};
