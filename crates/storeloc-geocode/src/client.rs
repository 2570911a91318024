//! HTTP client for the Nominatim search API.
//!
//! Each lookup asks for a single, top-ranked match (`limit=1`); the caller
//! never sees alternative candidates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use storeloc_core::{Coordinate, GeocodeMatch};
use storeloc_search::{GeocodingProvider, ProviderError};

use crate::error::GeocodeError;
use crate::types::NominatimPlace;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";
const DEFAULT_USER_AGENT: &str = "storeloc/0.1 (store-locator)";

/// Client for the Nominatim geocoding service.
///
/// Use [`NominatimClient::new`] for the public instance or
/// [`NominatimClient::with_base_url`] for a self-hosted one or a mock server.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Creates a client against a custom base URL.
    ///
    /// Nominatim's usage policy requires an identifying `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join("search")` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Geocodes free text to its top-ranked match.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NoMatch`] if Nominatim returns no results.
    /// - [`GeocodeError::Http`] on network failure or timeout.
    /// - [`GeocodeError::UnexpectedStatus`] on a non-2xx response.
    /// - [`GeocodeError::Deserialize`] / [`GeocodeError::InvalidCoordinate`]
    ///   if the body is not the expected shape.
    pub async fn search(&self, query: &str) -> Result<GeocodeMatch, GeocodeError> {
        let url = self.build_url(query)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))?;
        Self::to_match(place)
    }

    fn build_url(&self, query: &str) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        Ok(url)
    }

    fn to_match(place: NominatimPlace) -> Result<GeocodeMatch, GeocodeError> {
        let invalid = || GeocodeError::InvalidCoordinate {
            lat: place.lat.clone(),
            lon: place.lon.clone(),
        };
        let latitude: f64 = place.lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = place.lon.trim().parse().map_err(|_| invalid())?;
        let coordinate = Coordinate::new(latitude, longitude).map_err(|_| invalid())?;

        Ok(GeocodeMatch {
            coordinate,
            formatted_address: place.display_name,
        })
    }
}

#[async_trait]
impl GeocodingProvider for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<GeocodeMatch, ProviderError> {
        self.search(query).await.map_err(|error| {
            tracing::warn!(query, error = %error, "nominatim lookup failed");
            ProviderError::from(error)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> NominatimClient {
        NominatimClient::with_base_url(base_url, 5, "storeloc-test")
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_search_query() {
        let client = test_client("https://nominatim.openstreetmap.org");
        let url = client.build_url("32801, USA").unwrap();
        assert_eq!(
            url.as_str(),
            "https://nominatim.openstreetmap.org/search?q=32801%2C+USA&format=jsonv2&limit=1"
        );
    }

    #[test]
    fn build_url_keeps_base_path() {
        let client = test_client("http://geo.internal/nominatim/");
        let url = client.build_url("orlando").unwrap();
        assert_eq!(
            url.as_str(),
            "http://geo.internal/nominatim/search?q=orlando&format=jsonv2&limit=1"
        );
    }

    #[test]
    fn with_base_url_rejects_garbage() {
        let result = NominatimClient::with_base_url("not a url", 5, "storeloc-test");
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn to_match_parses_string_coordinates() {
        let found = NominatimClient::to_match(NominatimPlace {
            lat: "28.5383".to_string(),
            lon: "-81.3792".to_string(),
            display_name: Some("Orlando, FL".to_string()),
        })
        .unwrap();
        assert!((found.coordinate.latitude - 28.5383).abs() < 1e-9);
        assert_eq!(found.formatted_address.as_deref(), Some("Orlando, FL"));
    }

    #[test]
    fn to_match_rejects_out_of_range_or_non_numeric() {
        for (lat, lon) in [("abc", "1.0"), ("95.0", "1.0")] {
            let err = NominatimClient::to_match(NominatimPlace {
                lat: lat.to_string(),
                lon: lon.to_string(),
                display_name: None,
            })
            .unwrap_err();
            assert!(matches!(err, GeocodeError::InvalidCoordinate { .. }));
        }
    }

    #[test]
    fn no_match_maps_to_provider_no_match() {
        let provider_error = ProviderError::from(GeocodeError::NoMatch("x".to_string()));
        assert_eq!(provider_error, ProviderError::NoMatch);
    }
}
