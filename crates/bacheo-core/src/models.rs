pub mod command;
pub mod curb;
pub mod geometry;
pub mod record;
pub mod status;

pub use command::{GeometryEdit, ListFilter, NewBache};
pub use curb::{parse_curb_token, CurbSide, TRAPEZOID_EDGES, TRIANGLE_EDGES};
pub use geometry::{
    BoundingSpan, GeoPoint, MeasurementSet, Polygon, ShapeKind, Vertex, METERS_PER_DEGREE,
    SPAN_EPSILON,
};
pub use record::{BacheId, BacheRecord, BacheShape, Evidence, EvidencePhase, StreetMeta};
pub use status::BacheStatus;
