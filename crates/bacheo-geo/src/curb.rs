//! Curb edge selection.
//!
//! Resolves a curb side to the two endpoints of its polygon edge. Works on
//! any point type, so the same lookup serves local vertices, projected map
//! points and canvas pixels. Edge indices come from the shared tables in
//! `bacheo_core::models::curb`.

use bacheo_core::models::{BacheRecord, CurbSide, GeoPoint, ShapeKind};

use crate::projection::GeoProjector;

/// Endpoints of `side` on a `kind` polygon, or `None` when the side does not
/// exist on that shape or `points` is too short.
pub fn curb_edge<T: Copy>(kind: ShapeKind, points: &[T], side: CurbSide) -> Option<(T, T)> {
    let (start, end) = side.edge_indices(kind)?;
    Some((*points.get(start)?, *points.get(end)?))
}

/// Like [`curb_edge`], with the shape inferred from the point count and the
/// side given as a raw token. Unknown tokens resolve to `None`.
pub fn curb_edge_for_token<T: Copy>(points: &[T], token: &str) -> Option<(T, T)> {
    let kind = ShapeKind::from_vertex_count(points.len())?;
    let side = token.parse::<CurbSide>().ok()?;
    curb_edge(kind, points, side)
}

/// Projected curb edge of a stored record, if it has one
pub fn curb_edge_of_record(
    record: &BacheRecord,
    projector: &GeoProjector,
) -> Option<(GeoPoint, GeoPoint)> {
    let side = record.curb_side?;
    let points = projector.project_record(record);
    curb_edge(record.forma(), &points, side)
}
