//! Integration tests for `NominatimClient` using wiremock HTTP mocks.

use std::time::Duration;

use storeloc_geocode::{GeocodeError, NominatimClient};
use storeloc_search::{GeocodingProvider, ProviderError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NominatimClient {
    NominatimClient::with_base_url(base_url, 1, "storeloc-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_top_match() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "place_id": 1001,
            "lat": "28.5421",
            "lon": "-81.3790",
            "display_name": "Orlando, Orange County, Florida, 32801, United States",
            "importance": 0.71
        },
        {
            "place_id": 1002,
            "lat": "10.0",
            "lon": "10.0",
            "display_name": "Somewhere else"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "32801, USA"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "storeloc-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let found = client.search("32801, USA").await.expect("should geocode");

    assert!((found.coordinate.latitude - 28.5421).abs() < 1e-9);
    assert!((found.coordinate.longitude + 81.3790).abs() < 1e-9);
    assert_eq!(
        found.formatted_address.as_deref(),
        Some("Orlando, Orange County, Florida, 32801, United States")
    );
}

#[tokio::test]
async fn empty_result_is_no_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("zzzz nowhere").await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::NoMatch(ref q) if q == "zzzz nowhere"),
        "expected NoMatch, got: {err:?}"
    );

    let provider_err = client.geocode("zzzz nowhere").await.unwrap_err();
    assert_eq!(provider_err, ProviderError::NoMatch);
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("orlando").await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus, got: {err:?}"
    );

    let provider_err = client.geocode("orlando").await.unwrap_err();
    assert!(matches!(provider_err, ProviderError::Unavailable(_)));
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("orlando").await.unwrap_err();
    assert!(
        matches!(err, GeocodeError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.geocode("orlando").await.unwrap_err();
    assert_eq!(err, ProviderError::Timeout);
}
