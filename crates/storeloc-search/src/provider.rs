use async_trait::async_trait;
use storeloc_core::GeocodeMatch;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("no match found")]
    NoMatch,

    #[error("geocoding request timed out")]
    Timeout,

    #[error("geocoding provider unavailable: {0}")]
    Unavailable(String),
}

/// External service turning free text into a coordinate.
///
/// When the provider has several candidates it returns its top-ranked one;
/// callers do not disambiguate further.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<GeocodeMatch, ProviderError>;
}
