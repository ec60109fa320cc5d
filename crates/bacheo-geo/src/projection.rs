//! Local-plane to WGS 84 projection.
//!
//! Uses an equirectangular small-area approximation: one degree of latitude
//! is [`METERS_PER_DEGREE`] meters and one degree of longitude shrinks with
//! `cos(lat)` of the anchor. This is only valid for sub-kilometer spans,
//! which is all a pothole ever covers. It is not a geodesic projection and
//! must keep the builder's sign convention: local `+y` points south, so
//! `dLat = -dy / METERS_PER_DEGREE`.

use bacheo_core::config::{validate_shrink_factor, DEFAULT_SHRINK_FACTOR};
use bacheo_core::error::Result;
use bacheo_core::geometry::centroid;
use bacheo_core::models::{BacheRecord, GeoPoint, Vertex, METERS_PER_DEGREE};
use serde::{Deserialize, Serialize};

/// Lower bound for `cos(lat)` so longitudes stay finite near the poles
const MIN_COS_LAT: f64 = 1e-6;

/// Padding ratio the map viewer applies around the collected bounds
pub const MAP_BOUNDS_PAD: f64 = 0.2;

/// Meters spanned by one degree of longitude at `lat`
pub fn meters_per_degree_lng(lat: f64) -> f64 {
    METERS_PER_DEGREE * lat.to_radians().cos().max(MIN_COS_LAT)
}

/// Projects local polygons around a GPS anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoProjector {
    shrink: f64,
}

impl Default for GeoProjector {
    fn default() -> Self {
        Self { shrink: DEFAULT_SHRINK_FACTOR }
    }
}

impl GeoProjector {
    /// Create a projector with a visual shrink factor in (0, 1]
    pub fn new(shrink: f64) -> Result<Self> {
        Ok(Self { shrink: validate_shrink_factor(shrink)? })
    }

    /// A projector that keeps true size
    pub fn true_scale() -> Self {
        Self { shrink: 1.0 }
    }

    pub fn shrink(&self) -> f64 {
        self.shrink
    }

    /// Place `vertices` so their centroid lands on `anchor`.
    ///
    /// Output order matches input order, so curb edge indices still apply.
    pub fn project(&self, vertices: &[Vertex], anchor: GeoPoint) -> Vec<GeoPoint> {
        let Some(c) = centroid(vertices) else {
            return Vec::new();
        };
        let m_lng = meters_per_degree_lng(anchor.lat);

        vertices
            .iter()
            .map(|v| {
                let dx = (v.x - c.x) * self.shrink;
                let dy = (v.y - c.y) * self.shrink;
                GeoPoint::new(anchor.lat - dy / METERS_PER_DEGREE, anchor.lng + dx / m_lng)
            })
            .collect()
    }

    /// Inverse of [`project`](Self::project): local offsets from the anchor,
    /// with the shrink undone.
    pub fn unproject(&self, points: &[GeoPoint], anchor: GeoPoint) -> Vec<Vertex> {
        let m_lng = meters_per_degree_lng(anchor.lat);

        points
            .iter()
            .map(|p| {
                let dx = (p.lng - anchor.lng) * m_lng / self.shrink;
                let dy = -(p.lat - anchor.lat) * METERS_PER_DEGREE / self.shrink;
                Vertex::new(dx, dy)
            })
            .collect()
    }

    /// Projected outline of a stored record
    pub fn project_record(&self, record: &BacheRecord) -> Vec<GeoPoint> {
        self.project(record.vertices(), record.coordenadas)
    }

    /// Every point a map view must show.
    ///
    /// Items with a usable polygon (3 or more vertices) contribute their
    /// projected vertices; the rest contribute only their anchor. The user
    /// location, when known, is appended last.
    pub fn collect_points<'a, I>(&self, items: I, user: Option<GeoPoint>) -> Vec<GeoPoint>
    where
        I: IntoIterator<Item = (&'a [Vertex], GeoPoint)>,
    {
        let mut points = Vec::new();
        for (vertices, anchor) in items {
            if vertices.len() >= 3 {
                points.extend(self.project(vertices, anchor));
            } else {
                points.push(anchor);
            }
        }
        if let Some(user) = user {
            points.push(user);
        }
        points
    }

    /// [`collect_points`](Self::collect_points) over stored records
    pub fn collect_bounds(&self, records: &[BacheRecord], user: Option<GeoPoint>) -> Vec<GeoPoint> {
        self.collect_points(records.iter().map(|r| (r.vertices(), r.coordenadas)), user)
    }
}

/// Geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Smallest box holding every point; `None` for an empty list
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let init = GeoBounds {
            min_lat: first.lat,
            min_lng: first.lng,
            max_lat: first.lat,
            max_lng: first.lng,
        };
        Some(points.iter().skip(1).fold(init, |b, p| GeoBounds {
            min_lat: b.min_lat.min(p.lat),
            min_lng: b.min_lng.min(p.lng),
            max_lat: b.max_lat.max(p.lat),
            max_lng: b.max_lng.max(p.lng),
        }))
    }

    /// Grow each side by `ratio` times the box extent
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_pad = (self.max_lat - self.min_lat) * ratio;
        let lng_pad = (self.max_lng - self.min_lng) * ratio;
        GeoBounds {
            min_lat: self.min_lat - lat_pad,
            min_lng: self.min_lng - lng_pad,
            max_lat: self.max_lat + lat_pad,
            max_lng: self.max_lng + lng_pad,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.min_lat + self.max_lat) / 2.0, (self.min_lng + self.max_lng) / 2.0)
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }

    /// `[[south, west], [north, east]]`, the order map widgets take
    pub fn to_corners(&self) -> [[f64; 2]; 2] {
        [[self.min_lat, self.min_lng], [self.max_lat, self.max_lng]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bacheo_core::geometry::polygon_from_text;
    use proptest::prelude::*;

    const ANCHOR: GeoPoint = GeoPoint::new(19.4326, -99.1332);

    #[test]
    fn test_square_projects_around_anchor() {
        let polygon = polygon_from_text("4\n4\n4\n4").unwrap();
        let points = GeoProjector::true_scale().project(polygon.vertices(), ANCHOR);

        assert_eq!(points.len(), 4);
        // vertex 0 is the top-left corner: north-west of the anchor
        assert!(points[0].lat > ANCHOR.lat);
        assert!(points[0].lng < ANCHOR.lng);
        // vertex 2 is bottom-right: south-east
        assert!(points[2].lat < ANCHOR.lat);
        assert!(points[2].lng > ANCHOR.lng);

        let half_side_deg = 2.0 / METERS_PER_DEGREE;
        assert!((points[0].lat - ANCHOR.lat - half_side_deg).abs() < 1e-12);
    }

    #[test]
    fn test_shrink_scales_offsets() {
        let polygon = polygon_from_text("4\n4\n4\n4").unwrap();
        let full = GeoProjector::true_scale().project(polygon.vertices(), ANCHOR);
        let half = GeoProjector::new(0.5).unwrap().project(polygon.vertices(), ANCHOR);

        let full_d = full[0].lat - ANCHOR.lat;
        let half_d = half[0].lat - ANCHOR.lat;
        assert!((full_d / 2.0 - half_d).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_shrink_rejected() {
        assert!(GeoProjector::new(0.0).is_err());
        assert!(GeoProjector::new(1.2).is_err());
        assert_eq!(GeoProjector::default().shrink(), 0.75);
    }

    #[test]
    fn test_empty_vertices_project_to_nothing() {
        assert!(GeoProjector::default().project(&[], ANCHOR).is_empty());
    }

    #[test]
    fn test_collect_points_falls_back_to_anchor() {
        let polygon = polygon_from_text("3\n2\n2").unwrap();
        let other = GeoPoint::new(19.5, -99.2);
        let user = GeoPoint::new(19.0, -99.0);
        let items: Vec<(&[Vertex], GeoPoint)> =
            vec![(polygon.vertices(), ANCHOR), (&[], other)];

        let points = GeoProjector::default().collect_points(items, Some(user));
        assert_eq!(points.len(), 5);
        assert_eq!(points[3], other);
        assert_eq!(points[4], user);
    }

    #[test]
    fn test_bounds_and_pad() {
        let points = [GeoPoint::new(1.0, 10.0), GeoPoint::new(3.0, 14.0), GeoPoint::new(2.0, 12.0)];
        let bounds = GeoBounds::from_points(&points).unwrap();
        assert_eq!(bounds.to_corners(), [[1.0, 10.0], [3.0, 14.0]]);
        assert_eq!(bounds.center(), GeoPoint::new(2.0, 12.0));

        let padded = bounds.pad(MAP_BOUNDS_PAD);
        assert!((padded.min_lat - 0.6).abs() < 1e-12);
        assert!((padded.max_lng - 14.8).abs() < 1e-12);
        assert!(padded.contains(GeoPoint::new(3.2, 14.5)));
        assert!(GeoBounds::from_points(&[]).is_none());
    }

    proptest! {
        #[test]
        fn prop_projection_round_trip(
            values in prop::collection::vec(0.05f64..50.0, 3..5),
            lat in -70.0f64..70.0,
            lng in -179.0f64..179.0,
            shrink in 0.1f64..=1.0,
        ) {
            let polygon = bacheo_core::geometry::build_polygon(&values).unwrap();
            let anchor = GeoPoint::new(lat, lng);
            let projector = GeoProjector::new(shrink).unwrap();

            let projected = projector.project(polygon.vertices(), anchor);
            let local = projector.unproject(&projected, anchor);
            let c = centroid(&local).unwrap();

            prop_assert!(c.x.abs() < 1e-6, "centroid x drifted: {}", c.x);
            prop_assert!(c.y.abs() < 1e-6, "centroid y drifted: {}", c.y);

            let original = centroid(polygon.vertices()).unwrap();
            for (v, back) in polygon.vertices().iter().zip(&local) {
                prop_assert!((v.x - original.x - back.x).abs() < 1e-6);
                prop_assert!((v.y - original.y - back.y).abs() < 1e-6);
            }
        }
    }
}
