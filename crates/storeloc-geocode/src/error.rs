use storeloc_search::ProviderError;
use thiserror::Error;

/// Errors returned by the Nominatim client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoder base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("no match for '{0}'")]
    NoMatch(String),

    /// Nominatim returned coordinates that are not numbers.
    #[error("invalid coordinate in response: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: String, lon: String },
}

impl From<GeocodeError> for ProviderError {
    fn from(error: GeocodeError) -> Self {
        match error {
            GeocodeError::NoMatch(_) => ProviderError::NoMatch,
            GeocodeError::Http(e) if e.is_timeout() => ProviderError::Timeout,
            other => ProviderError::Unavailable(other.to_string()),
        }
    }
}
