use std::sync::Arc;

use bacheo_core::config::LayeredConfig;
use bacheo_core::error::Result;
use bacheo_geocode::ReverseGeocoder;
use bacheo_lifecycle::BacheManager;
use bacheo_store::BacheStore;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<BacheManager<dyn BacheStore>>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub config: LayeredConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn BacheStore>,
        geocoder: Arc<dyn ReverseGeocoder>,
        config: LayeredConfig,
    ) -> Result<Self> {
        let manager = BacheManager::from_config(store, &config)?;
        Ok(Self { manager: Arc::new(manager), geocoder, config })
    }
}
