//! Bacheo Lifecycle - Record lifecycle management
//!
//! This crate implements the bache record use cases: registration, geometry
//! edits, anchor moves, status advances, evidence and deletion. It is the
//! only writer of a record's derived geometry.

pub mod export;
pub mod manager;

pub use export::{to_csv, CSV_HEADERS};
pub use manager::{BacheManager, GeometryPreview};
