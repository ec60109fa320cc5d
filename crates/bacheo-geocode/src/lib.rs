//! Bacheo Geocode - Street name resolution
//!
//! This crate defines the reverse-geocoding port used to pre-fill a
//! record's street metadata, along with an OpenStreetMap adapter
//! (Nominatim for the main street, Overpass for the cross streets).

pub mod osm;
pub mod ports;
pub mod streets;

// Re-export main types
pub use osm::OsmGeocoder;
pub use ports::ReverseGeocoder;
pub use streets::{main_street_from_address, nearest_by_name, pick_cross_streets, NearbyStreet};
