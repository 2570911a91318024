//! `search` and `geocode` command handlers.
//!
//! Both build the same engine the server runs, so results and errors match
//! what the HTTP API would return.

use std::sync::Arc;

use clap::Args;
use storeloc_core::{AppConfig, LocationSpec};
use storeloc_geocode::NominatimClient;
use storeloc_search::{
    EngineConfig, InMemoryStoreRepository, SearchOrchestrator, SearchRequest, StoreRepository,
    WeeklyHoursEvaluator,
};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Latitude of the search origin (requires --lon)
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,
    /// Longitude of the search origin (requires --lat)
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,
    /// Free-text address to geocode
    #[arg(long)]
    pub address: Option<String>,
    /// Postal code to geocode
    #[arg(long)]
    pub postal_code: Option<String>,
    /// Search radius in miles
    #[arg(long, default_value = "10")]
    pub radius: f64,
    /// Required service; repeat for several (all must be offered)
    #[arg(long = "service")]
    pub services: Vec<String>,
    /// Accepted store type; repeat for several (any may match)
    #[arg(long = "store-type")]
    pub store_types: Vec<String>,
    /// Only stores open right now
    #[arg(long)]
    pub open_now: bool,
}

impl SearchArgs {
    pub(crate) fn to_request(&self) -> SearchRequest {
        SearchRequest {
            latitude: self.lat,
            longitude: self.lon,
            address: self.address.clone(),
            postal_code: self.postal_code.clone(),
            radius_miles: self.radius,
            services: Some(self.services.clone()).filter(|s| !s.is_empty()),
            store_types: Some(self.store_types.clone()).filter(|s| !s.is_empty()),
            open_now: Some(self.open_now),
        }
    }
}

/// Run one search and print the response as pretty JSON.
///
/// # Errors
///
/// Returns an error if the engine cannot be built or the search fails.
pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let engine = build_engine(config).await?;
    let response = engine.search_request(&args.to_request()).await?;
    println!("{}", serde_json::to_string_pretty(&*response)?);
    Ok(())
}

/// Geocode `text` and print the coordinate and formatted address.
///
/// # Errors
///
/// Returns an error if the client cannot be built or geocoding fails.
pub(crate) async fn run_geocode(config: &AppConfig, text: &str, postal: bool) -> anyhow::Result<()> {
    let spec = if postal {
        LocationSpec::PostalCode(text.to_string())
    } else {
        LocationSpec::Address(text.to_string())
    };

    let engine = SearchOrchestrator::build(
        &EngineConfig::from_app_config(config),
        Arc::new(nominatim(config)?),
        Arc::new(InMemoryStoreRepository::default()),
        Arc::new(WeeklyHoursEvaluator::utc()),
    );
    let found = engine.resolver().resolve_detailed(&spec).await?;

    println!(
        "{:.6}, {:.6}  {}",
        found.coordinate.latitude,
        found.coordinate.longitude,
        found.formatted_address.as_deref().unwrap_or("")
    );
    Ok(())
}

async fn build_engine(config: &AppConfig) -> anyhow::Result<SearchOrchestrator> {
    let repository: Arc<dyn StoreRepository> = if config.database_url.is_some() {
        let pool = storeloc_db::connect_pool_from_config(config).await?;
        Arc::new(storeloc_db::PgStoreRepository::new(pool))
    } else {
        let catalog = storeloc_core::load_store_catalog(&config.stores_path)?;
        tracing::debug!(stores = catalog.stores.len(), "loaded store catalog");
        Arc::new(InMemoryStoreRepository::new(catalog.stores))
    };

    Ok(SearchOrchestrator::build(
        &EngineConfig::from_app_config(config),
        Arc::new(nominatim(config)?),
        repository,
        Arc::new(WeeklyHoursEvaluator::utc()),
    ))
}

fn nominatim(config: &AppConfig) -> anyhow::Result<NominatimClient> {
    NominatimClient::with_base_url(
        &config.geocoder_base_url,
        config.geocoder_timeout_secs,
        &config.geocoder_user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build geocoding client: {e}"))
}
