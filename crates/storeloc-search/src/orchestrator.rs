//! End-to-end store search: validate, consult the result cache, resolve the
//! origin, prefilter by bounding box, then filter exactly and rank.

use std::sync::Arc;

use chrono::Utc;
use storeloc_core::{GeocodeMatch, LocationSpec, SearchError, StoreStatus};

use crate::bbox::bounding_box;
use crate::cache::TtlCache;
use crate::config::EngineConfig;
use crate::distance::distance_miles;
use crate::hours::HoursEvaluator;
use crate::provider::GeocodingProvider;
use crate::query::{SearchQuery, SearchRequest};
use crate::repository::StoreRepository;
use crate::resolver::GeocodeResolver;
use crate::types::{
    EngineCacheStats, FiltersApplied, SearchLocation, SearchResponse, SearchResultEntry,
};

pub struct SearchOrchestrator {
    resolver: GeocodeResolver,
    repository: Arc<dyn StoreRepository>,
    hours: Arc<dyn HoursEvaluator>,
    results: Arc<TtlCache<Arc<SearchResponse>>>,
    max_radius_miles: f64,
}

impl SearchOrchestrator {
    /// Assemble an orchestrator from explicitly constructed parts.
    ///
    /// `results`' default TTL applies to every cached response.
    #[must_use]
    pub fn new(
        resolver: GeocodeResolver,
        repository: Arc<dyn StoreRepository>,
        hours: Arc<dyn HoursEvaluator>,
        results: Arc<TtlCache<Arc<SearchResponse>>>,
        max_radius_miles: f64,
    ) -> Self {
        Self {
            resolver,
            repository,
            hours,
            results,
            max_radius_miles,
        }
    }

    /// Build both caches and the resolver from `config`.
    #[must_use]
    pub fn build(
        config: &EngineConfig,
        provider: Arc<dyn GeocodingProvider>,
        repository: Arc<dyn StoreRepository>,
        hours: Arc<dyn HoursEvaluator>,
    ) -> Self {
        let geocode_cache = Arc::new(TtlCache::<GeocodeMatch>::new("geocode", config.geocode_ttl));
        let resolver = GeocodeResolver::new(
            provider,
            geocode_cache,
            config.geocoder_timeout,
            config.default_country.clone(),
        );
        let results = Arc::new(TtlCache::new("search", config.search_ttl));
        Self::new(resolver, repository, hours, results, config.max_radius_miles)
    }

    #[must_use]
    pub fn resolver(&self) -> &GeocodeResolver {
        &self.resolver
    }

    /// Normalize a raw client request and run it.
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    pub async fn search_request(
        &self,
        request: &SearchRequest,
    ) -> Result<Arc<SearchResponse>, SearchError> {
        let query = SearchQuery::from_request(request)?;
        self.search(&query).await
    }

    /// Run a search, serving from the result cache when possible.
    ///
    /// Results are sorted by ascending distance, ties broken by store id.
    /// Only successful, complete responses are cached.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidRadius`] / [`SearchError::InvalidCoordinate`]
    ///   before any cache or provider interaction.
    /// - [`SearchError::GeocodingFailure`] when the origin cannot be resolved.
    /// - [`SearchError::RepositoryUnavailable`] when the store lookup fails.
    pub async fn search(&self, query: &SearchQuery) -> Result<Arc<SearchResponse>, SearchError> {
        self.validate(query)?;

        let cache_key = query.cache_key();
        if let Some(cached) = self.results.get(&cache_key) {
            return Ok(cached);
        }

        let origin = self.resolver.resolve_detailed(&query.location).await?;
        let bbox = bounding_box(&origin.coordinate, query.radius_miles);
        if bbox.crosses_antimeridian() {
            tracing::warn!(
                latitude = origin.coordinate.latitude,
                longitude = origin.coordinate.longitude,
                radius_miles = query.radius_miles,
                "search area crosses the antimeridian; stores beyond it are not considered"
            );
        }

        let candidates = self
            .repository
            .query_by_bounding_box(&bbox, StoreStatus::Active)
            .await
            .map_err(|error| {
                tracing::error!(error = %error, "store repository query failed");
                SearchError::RepositoryUnavailable(error.0)
            })?;
        let candidate_count = candidates.len();

        let now = Utc::now();
        let mut results: Vec<SearchResultEntry> = candidates
            .into_iter()
            .filter(|store| store.status == StoreStatus::Active)
            .filter_map(|store| {
                let distance = distance_miles(&origin.coordinate, &store.coordinate);
                if distance > query.radius_miles || !query.matches_filters(&store) {
                    return None;
                }
                let is_open_now = self.hours.is_open_now(&store, now);
                if query.open_now && !is_open_now {
                    return None;
                }
                Some(SearchResultEntry {
                    store,
                    distance_miles: distance,
                    is_open_now,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance_miles
                .total_cmp(&b.distance_miles)
                .then_with(|| a.store.id.cmp(&b.store.id))
        });

        tracing::debug!(
            key = %cache_key,
            candidates = candidate_count,
            matched = results.len(),
            "search computed"
        );

        let response = Arc::new(SearchResponse {
            total_results: results.len(),
            results,
            search_location: SearchLocation::new(&query.location, &origin),
            filters_applied: FiltersApplied::from(query),
        });
        self.results.insert(cache_key, Arc::clone(&response));
        Ok(response)
    }

    fn validate(&self, query: &SearchQuery) -> Result<(), SearchError> {
        let radius = query.radius_miles;
        if !(radius.is_finite() && radius > 0.0 && radius <= self.max_radius_miles) {
            return Err(SearchError::InvalidRadius {
                radius_miles: radius,
                max_radius_miles: self.max_radius_miles,
            });
        }
        if let LocationSpec::Coordinates(coordinate) = &query.location {
            coordinate.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn cache_stats(&self) -> EngineCacheStats {
        EngineCacheStats {
            geocode_cache: self.resolver.cache().stats(),
            search_cache: self.results.stats(),
        }
    }

    /// Drop every cached search response, e.g. after the store data changed.
    /// Geocode entries are kept. Returns the number of entries removed.
    pub fn clear_results(&self) -> usize {
        let cleared = self.results.clear();
        tracing::info!(cleared, "search cache cleared");
        cleared
    }

    /// Remove expired entries from both caches; returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let geocode = self.resolver.cache().purge_expired();
        let search = self.results.purge_expired();
        tracing::debug!(geocode, search, "purged expired cache entries");
        geocode + search
    }
}
