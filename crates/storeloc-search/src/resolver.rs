//! Address and postal-code resolution through the geocode cache.

use std::sync::Arc;
use std::time::Duration;

use storeloc_core::{Coordinate, GeocodeMatch, LocationSpec, SearchError};

use crate::cache::TtlCache;
use crate::provider::{GeocodingProvider, ProviderError};
use crate::query::normalize_text;

/// Resolves a [`LocationSpec`] to a coordinate.
///
/// Successful provider answers are cached under the normalized query text.
/// Failures are never cached, so an outage clears up on the next call once the
/// provider recovers. Each provider call is bounded by `timeout`.
pub struct GeocodeResolver {
    provider: Arc<dyn GeocodingProvider>,
    cache: Arc<TtlCache<GeocodeMatch>>,
    timeout: Duration,
    default_country: String,
}

impl GeocodeResolver {
    /// `cache`'s default TTL is used for every entry written.
    #[must_use]
    pub fn new(
        provider: Arc<dyn GeocodingProvider>,
        cache: Arc<TtlCache<GeocodeMatch>>,
        timeout: Duration,
        default_country: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            cache,
            timeout,
            default_country: default_country.into(),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &TtlCache<GeocodeMatch> {
        &self.cache
    }

    /// # Errors
    ///
    /// Returns [`SearchError::GeocodingFailure`] when the provider finds no
    /// match, fails, or does not answer within the timeout.
    pub async fn resolve(&self, spec: &LocationSpec) -> Result<Coordinate, SearchError> {
        self.resolve_detailed(spec).await.map(|found| found.coordinate)
    }

    /// Like [`Self::resolve`], also returning the provider's formatted address.
    ///
    /// Coordinates pass through untouched without touching the cache.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_detailed(&self, spec: &LocationSpec) -> Result<GeocodeMatch, SearchError> {
        let (cache_key, provider_query, query_text) = match spec {
            LocationSpec::Coordinates(coordinate) => return Ok(GeocodeMatch::from(*coordinate)),
            LocationSpec::Address(address) => (
                format!("geocode:address:{}", normalize_text(address)),
                address.trim().to_string(),
                address.trim(),
            ),
            LocationSpec::PostalCode(postal) => (
                format!("geocode:postal:{}", normalize_text(postal)),
                format!("{}, {}", postal.trim(), self.default_country),
                postal.trim(),
            ),
        };

        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let found = match tokio::time::timeout(self.timeout, self.provider.geocode(&provider_query)).await {
            Ok(Ok(found)) => found,
            Ok(Err(error)) => return Err(geocoding_failure(query_text, &error)),
            Err(_) => return Err(geocoding_failure(query_text, &ProviderError::Timeout)),
        };

        if let Err(error) = found.coordinate.validate() {
            tracing::warn!(query = %query_text, error = %error, "geocoder returned an out-of-range coordinate");
            return Err(SearchError::GeocodingFailure {
                query: query_text.to_string(),
                reason: error.to_string(),
            });
        }

        tracing::debug!(
            query = %query_text,
            latitude = found.coordinate.latitude,
            longitude = found.coordinate.longitude,
            "geocoded location"
        );
        self.cache.insert(cache_key, found.clone());
        Ok(found)
    }
}

fn geocoding_failure(query: &str, error: &ProviderError) -> SearchError {
    tracing::warn!(query, error = %error, "geocoding failed");
    SearchError::GeocodingFailure {
        query: query.to_string(),
        reason: error.to_string(),
    }
}
