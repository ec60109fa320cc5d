//! Street selection rules, independent of any HTTP client

use bacheo_core::models::GeoPoint;
use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Address keys tried in order when picking the main street
pub const ADDRESS_KEYS: [&str; 12] = [
    "road",
    "pedestrian",
    "cycleway",
    "footway",
    "path",
    "residential",
    "neighbourhood",
    "suburb",
    "hamlet",
    "village",
    "city_district",
    "city",
];

/// How many cross streets a record keeps
pub const MAX_CROSS_STREETS: usize = 2;

/// A named street near the query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStreet {
    pub name: String,
    pub distance_m: f64,
}

/// First non-blank value among [`ADDRESS_KEYS`], trimmed
pub fn main_street_from_address(address: &HashMap<String, String>) -> String {
    ADDRESS_KEYS
        .iter()
        .filter_map(|key| address.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Deduplicate candidates by name keeping the nearest, sorted by distance.
///
/// Blank names are skipped. Distances are great-circle meters from `origin`.
pub fn nearest_by_name<I>(origin: GeoPoint, candidates: I) -> Vec<NearbyStreet>
where
    I: IntoIterator<Item = (String, GeoPoint)>,
{
    let from = Point::new(origin.lng, origin.lat);
    let mut best: HashMap<String, f64> = HashMap::new();

    for (name, at) in candidates {
        let name = name.trim().to_string();
        if name.is_empty() {
            continue;
        }
        let distance = Haversine.distance(from, Point::new(at.lng, at.lat));
        best.entry(name)
            .and_modify(|d| *d = d.min(distance))
            .or_insert(distance);
    }

    let mut streets: Vec<NearbyStreet> = best
        .into_iter()
        .map(|(name, distance_m)| NearbyStreet { name, distance_m })
        .collect();
    streets.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m).then_with(|| a.name.cmp(&b.name)));
    streets
}

/// Choose the cross streets for `calle` from distance-sorted `nearby`.
///
/// Takes up to two names that differ from the main street (ignoring case)
/// and from each other. If none qualify, falls back to the first two
/// nearby names.
pub fn pick_cross_streets(calle: &str, nearby: &[NearbyStreet]) -> Vec<String> {
    let main = calle.trim().to_lowercase();
    let mut picked: Vec<String> = Vec::new();

    for street in nearby {
        if picked.len() >= MAX_CROSS_STREETS {
            break;
        }
        let lower = street.name.to_lowercase();
        if !main.is_empty() && lower == main {
            continue;
        }
        if picked.iter().any(|p| p.to_lowercase() == lower) {
            continue;
        }
        picked.push(street.name.clone());
    }

    if picked.is_empty() {
        picked = nearby.iter().take(MAX_CROSS_STREETS).map(|s| s.name.clone()).collect();
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: GeoPoint = GeoPoint::new(19.4326, -99.1332);

    fn street(name: &str, distance_m: f64) -> NearbyStreet {
        NearbyStreet { name: name.to_string(), distance_m }
    }

    #[test]
    fn test_main_street_key_order() {
        let mut address = HashMap::new();
        address.insert("city".to_string(), "Ciudad de México".to_string());
        address.insert("suburb".to_string(), "Centro".to_string());
        assert_eq!(main_street_from_address(&address), "Centro");

        address.insert("road".to_string(), "  Av. Juárez ".to_string());
        assert_eq!(main_street_from_address(&address), "Av. Juárez");

        assert_eq!(main_street_from_address(&HashMap::new()), "");
    }

    #[test]
    fn test_nearest_by_name_dedupes_and_sorts() {
        let candidates = vec![
            ("Madero".to_string(), GeoPoint::new(19.4336, -99.1332)),
            ("Bolívar".to_string(), GeoPoint::new(19.4328, -99.1332)),
            ("Madero".to_string(), GeoPoint::new(19.4327, -99.1332)),
            ("  ".to_string(), GeoPoint::new(19.4326, -99.1332)),
        ];

        let streets = nearest_by_name(ORIGIN, candidates);
        assert_eq!(streets.len(), 2);
        assert_eq!(streets[0].name, "Madero");
        assert_eq!(streets[1].name, "Bolívar");
        // 0.0001 degrees of latitude is roughly 11 m
        assert!((streets[0].distance_m - 11.1).abs() < 0.5);
    }

    #[test]
    fn test_cross_streets_skip_main() {
        let nearby = vec![
            street("Av. Juárez", 3.0),
            street("Madero", 10.0),
            street("madero", 12.0),
            street("Bolívar", 20.0),
            street("Isabel la Católica", 30.0),
        ];
        assert_eq!(pick_cross_streets("AV. JUÁREZ", &nearby), vec!["Madero", "Bolívar"]);
    }

    #[test]
    fn test_cross_streets_fallback() {
        let nearby = vec![street("Av. Juárez", 3.0)];
        assert_eq!(pick_cross_streets("Av. Juárez", &nearby), vec!["Av. Juárez"]);
        assert!(pick_cross_streets("Av. Juárez", &[]).is_empty());
    }

    #[test]
    fn test_cross_streets_without_main() {
        let nearby = vec![street("A", 1.0), street("B", 2.0), street("C", 3.0)];
        assert_eq!(pick_cross_streets("", &nearby), vec!["A", "B"]);
    }
}
