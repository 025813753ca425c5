use std::sync::Arc;

use crate::config::SiteConfig;
use crate::location::Runtime;
use crate::models::{ServiceArea, SiteCopy};
use crate::services::ServiceCatalog;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteCopy>,
    pub catalog: Arc<ServiceCatalog>,
    pub service_areas: Arc<Vec<ServiceArea>>,
    pub runtime: Runtime,
    pub public_base_url: String,
    pub custom_css: Option<String>,
    pub geo_debug: bool,
}

impl AppState {
    pub fn new(config: SiteConfig, runtime: Runtime, public_base_url: String) -> Self {
        Self {
            site: Arc::new(config.site),
            catalog: Arc::new(ServiceCatalog::new(config.services)),
            service_areas: Arc::new(config.service_areas),
            runtime,
            public_base_url,
            custom_css: None,
            geo_debug: false,
        }
    }

    /// First service area whose canonical name or member cities match the
    /// city in a location slug.
    pub fn area_for_city(&self, city: &str) -> Option<&ServiceArea> {
        self.service_areas.iter().find(|a| a.contains_city(city))
    }
}
