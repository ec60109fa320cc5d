mod baches;
mod geocode;
mod geometry;
mod health;
mod map;

pub use baches::{
    advance_status, attach_evidence, create_bache, delete_bache, edit_geometry, export_csv,
    get_bache, list_baches, move_anchor, sketch_svg,
};
pub use geocode::reverse_geocode;
pub use geometry::{calculate, preview_geometry};
pub use health::health_check;
pub use map::map_overlay;
