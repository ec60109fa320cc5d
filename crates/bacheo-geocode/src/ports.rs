//! Geocoding port definitions

use async_trait::async_trait;
use bacheo_core::error::Result;
use bacheo_core::models::{GeoPoint, StreetMeta};

/// Port for resolving a GPS fix to street metadata
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Main street and up to two cross streets near `point`.
    ///
    /// Implementations degrade to an empty `StreetMeta` rather than fail
    /// when the upstream service is unreachable.
    async fn reverse(&self, point: GeoPoint) -> Result<StreetMeta>;
}
