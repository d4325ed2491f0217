use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::services::GeocodeCache;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub geocode_cache: Arc<GeocodeCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: Catalog, geocode_cache: GeocodeCache, config: Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            geocode_cache: Arc::new(geocode_cache),
            config: Arc::new(config),
        }
    }
}
