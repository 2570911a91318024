use std::time::Duration;

use storeloc_core::AppConfig;

/// Tunables for [`crate::SearchOrchestrator`] and [`crate::GeocodeResolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub geocode_ttl: Duration,
    pub search_ttl: Duration,
    /// Upper bound on one outbound geocoding call.
    pub geocoder_timeout: Duration,
    pub max_radius_miles: f64,
    pub default_country: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geocode_ttl: Duration::from_secs(30 * 24 * 60 * 60),
            search_ttl: Duration::from_secs(5 * 60),
            geocoder_timeout: Duration::from_secs(10),
            max_radius_miles: 100.0,
            default_country: "USA".to_string(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            geocode_ttl: Duration::from_secs(config.geocode_ttl_secs),
            search_ttl: Duration::from_secs(config.search_ttl_secs),
            geocoder_timeout: Duration::from_secs(config.geocoder_timeout_secs),
            max_radius_miles: config.max_radius_miles,
            default_country: config.default_country.clone(),
        }
    }
}
