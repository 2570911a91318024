//! Search request parsing, normalization, filters, and result-cache keys.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use storeloc_core::{LocationSpec, SearchError, StoreRecord};

/// Raw search request as received from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default = "default_radius_miles")]
    pub radius_miles: f64,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub store_types: Option<Vec<String>>,
    #[serde(default)]
    pub open_now: Option<bool>,
}

fn default_radius_miles() -> f64 {
    10.0
}

/// A validated, normalized search.
///
/// `services` are combined with AND: a store must offer every one of them.
/// `store_types` are combined with OR: a store's type must be one of them.
/// An empty set disables its filter. Both sets hold trimmed, lower-cased
/// values and are only reachable through the normalizing builders, so equal
/// filters always produce equal cache keys. Only stores with status `active`
/// are ever considered.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub location: LocationSpec,
    pub radius_miles: f64,
    services: BTreeSet<String>,
    store_types: BTreeSet<String>,
    pub open_now: bool,
}

impl SearchQuery {
    /// A query with no service or store type filter.
    #[must_use]
    pub fn new(location: LocationSpec, radius_miles: f64) -> Self {
        Self {
            location,
            radius_miles,
            services: BTreeSet::new(),
            store_types: BTreeSet::new(),
            open_now: false,
        }
    }

    #[must_use]
    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.services = normalize_set(services);
        self
    }

    #[must_use]
    pub fn with_store_types<I, S>(mut self, store_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.store_types = normalize_set(store_types);
        self
    }

    #[must_use]
    pub fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = open_now;
        self
    }

    /// Required services, normalized.
    #[must_use]
    pub fn services(&self) -> &BTreeSet<String> {
        &self.services
    }

    /// Accepted store types, normalized.
    #[must_use]
    pub fn store_types(&self) -> &BTreeSet<String> {
        &self.store_types
    }

    /// Normalize a client request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingLocation`] or
    /// [`SearchError::InvalidCoordinate`] when no usable location is present.
    /// Radius bounds are checked by the orchestrator.
    pub fn from_request(request: &SearchRequest) -> Result<Self, SearchError> {
        let location = LocationSpec::from_parts(
            request.latitude,
            request.longitude,
            request.address.as_deref(),
            request.postal_code.as_deref(),
        )?;

        Ok(Self::new(location, request.radius_miles)
            .with_services(request.services.as_deref().unwrap_or_default())
            .with_store_types(request.store_types.as_deref().unwrap_or_default())
            .with_open_now(request.open_now.unwrap_or(false)))
    }

    /// Canonical result-cache key.
    ///
    /// Coordinates are rounded to 4 decimal places, the radius to the nearest
    /// 0.1 mile, and filter sets are sorted and lower-cased, so requests that
    /// differ only in formatting share a key.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let location = match &self.location {
            LocationSpec::Coordinates(c) => {
                format!("{:.4}:{:.4}", round_to(c.latitude, 1e4), round_to(c.longitude, 1e4))
            }
            LocationSpec::Address(address) => format!("addr:{}", normalize_text(address)),
            LocationSpec::PostalCode(postal) => format!("postal:{}", normalize_text(postal)),
        };
        format!(
            "search:{location}:r{:.1}:s={}:t={}:open={}",
            round_to(self.radius_miles, 10.0),
            join_set(&self.services),
            join_set(&self.store_types),
            self.open_now
        )
    }

    /// `true` when `store` passes the service (AND) and store type (OR) filters.
    #[must_use]
    pub fn matches_filters(&self, store: &StoreRecord) -> bool {
        offers_all_services(store, &self.services) && has_any_store_type(store, &self.store_types)
    }
}

/// Trim and lower-case free text for cache keys and filter comparison.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn normalize_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| normalize_text(v.as_ref()))
        .filter(|v| !v.is_empty())
        .collect()
}

fn join_set(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

/// Round to `1 / scale` precision; the `+ 0.0` folds `-0.0` into `0.0`.
fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale + 0.0
}

/// AND semantics: the store must offer every requested service.
///
/// `requested` holds normalized values; store values go through
/// [`normalize_text`] before comparison.
#[must_use]
pub fn offers_all_services(store: &StoreRecord, requested: &BTreeSet<String>) -> bool {
    if requested.is_empty() {
        return true;
    }
    let offered: BTreeSet<String> = store.services.iter().map(|s| normalize_text(s)).collect();
    requested.is_subset(&offered)
}

/// OR semantics: the store's type must be one of the requested types.
#[must_use]
pub fn has_any_store_type(store: &StoreRecord, requested: &BTreeSet<String>) -> bool {
    requested.is_empty() || requested.contains(&normalize_text(&store.store_type))
}

#[cfg(test)]
mod tests {
    use storeloc_core::{Coordinate, StoreAddress, StoreStatus, WeeklyHours};

    use super::*;

    fn coordinate_request(latitude: f64, longitude: f64) -> SearchRequest {
        SearchRequest {
            latitude: Some(latitude),
            longitude: Some(longitude),
            radius_miles: 25.0,
            ..SearchRequest::default()
        }
    }

    fn store(store_type: &str, services: &[&str]) -> StoreRecord {
        StoreRecord {
            id: "S-1".to_string(),
            name: "Test".to_string(),
            store_type: store_type.to_string(),
            status: StoreStatus::Active,
            coordinate: Coordinate {
                latitude: 0.0,
                longitude: 0.0,
            },
            address: StoreAddress {
                street: "1 Main St".to_string(),
                city: "Orlando".to_string(),
                state: "FL".to_string(),
                postal_code: "32801".to_string(),
                country: "USA".to_string(),
            },
            phone: None,
            services: services.iter().map(ToString::to_string).collect(),
            hours: WeeklyHours::default(),
        }
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"postal_code": "32801"}"#).expect("parse");
        assert!((request.radius_miles - 10.0).abs() < f64::EPSILON);
        assert!(request.services.is_none());
        assert!(request.open_now.is_none());
    }

    #[test]
    fn from_request_normalizes_filter_sets() {
        let mut request = coordinate_request(28.5813, -81.3862);
        request.services = Some(vec![
            " Pharmacy ".to_string(),
            "bakery".to_string(),
            String::new(),
        ]);
        request.store_types = Some(vec!["OUTLET".to_string()]);
        request.open_now = Some(true);

        let query = SearchQuery::from_request(&request).expect("query");
        assert_eq!(
            query.services().iter().collect::<Vec<_>>(),
            vec!["bakery", "pharmacy"]
        );
        assert!(query.store_types().contains("outlet"));
        assert!(query.open_now);
    }

    #[test]
    fn from_request_without_location_fails() {
        let request = SearchRequest {
            radius_miles: 5.0,
            ..SearchRequest::default()
        };
        assert_eq!(
            SearchQuery::from_request(&request).unwrap_err(),
            SearchError::MissingLocation
        );
    }

    #[test]
    fn cache_key_ignores_service_order_case_and_whitespace() {
        let mut a = coordinate_request(28.5813, -81.3862);
        a.services = Some(vec!["pharmacy".to_string(), "bakery".to_string()]);
        let mut b = coordinate_request(28.58131, -81.38619);
        b.services = Some(vec!["  BAKERY".to_string(), "Pharmacy ".to_string()]);

        let key_a = SearchQuery::from_request(&a).unwrap().cache_key();
        let key_b = SearchQuery::from_request(&b).unwrap().cache_key();
        assert_eq!(key_a, key_b);
        assert_eq!(
            key_a,
            "search:28.5813:-81.3862:r25.0:s=bakery,pharmacy:t=:open=false"
        );
    }

    #[test]
    fn cache_key_rounds_radius_to_tenth_of_a_mile() {
        let mut a = coordinate_request(10.0, 10.0);
        a.radius_miles = 10.04;
        let mut b = coordinate_request(10.0, 10.0);
        b.radius_miles = 9.96;
        assert_eq!(
            SearchQuery::from_request(&a).unwrap().cache_key(),
            SearchQuery::from_request(&b).unwrap().cache_key()
        );
    }

    #[test]
    fn cache_key_folds_negative_zero() {
        let a = SearchQuery::from_request(&coordinate_request(-0.00001, 0.0)).unwrap();
        let b = SearchQuery::from_request(&coordinate_request(0.00001, 0.0)).unwrap();
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn cache_key_distinguishes_open_now_and_location_kind() {
        let mut open = coordinate_request(1.0, 1.0);
        open.open_now = Some(true);
        let closed = coordinate_request(1.0, 1.0);
        assert_ne!(
            SearchQuery::from_request(&open).unwrap().cache_key(),
            SearchQuery::from_request(&closed).unwrap().cache_key()
        );

        let address = SearchRequest {
            address: Some("32801".to_string()),
            ..SearchRequest::default()
        };
        let postal = SearchRequest {
            postal_code: Some("32801".to_string()),
            ..SearchRequest::default()
        };
        assert_ne!(
            SearchQuery::from_request(&address).unwrap().cache_key(),
            SearchQuery::from_request(&postal).unwrap().cache_key()
        );
    }

    #[test]
    fn services_filter_requires_every_service() {
        let wanted: BTreeSet<String> = ["pharmacy", "bakery"].iter().map(ToString::to_string).collect();
        assert!(offers_all_services(&store("regular", &["Pharmacy", "bakery", "deli"]), &wanted));
        assert!(!offers_all_services(&store("regular", &["pharmacy"]), &wanted));
        assert!(offers_all_services(&store("regular", &[]), &BTreeSet::new()));
    }

    #[test]
    fn store_type_filter_accepts_any_listed_type() {
        let wanted: BTreeSet<String> = ["outlet", "express"].iter().map(ToString::to_string).collect();
        assert!(has_any_store_type(&store("Express", &[]), &wanted));
        assert!(!has_any_store_type(&store("flagship", &[]), &wanted));
        assert!(has_any_store_type(&store("flagship", &[]), &BTreeSet::new()));
    }

    #[test]
    fn filters_fold_non_ascii_case_on_both_sides() {
        let request = SearchRequest {
            latitude: Some(0.0),
            longitude: Some(0.0),
            services: Some(vec!["CAFÉ".to_string()]),
            store_types: Some(vec!["ÉPICERIE".to_string()]),
            ..SearchRequest::default()
        };
        let query = SearchQuery::from_request(&request).expect("query");

        assert!(query.matches_filters(&store("Épicerie", &["Café", "Boulangerie"])));
        assert!(query.matches_filters(&store("ÉPICERIE", &["CAFÉ"])));
        assert!(!query.matches_filters(&store("épicerie", &["cafe"])));
    }

    #[test]
    fn builders_normalize_like_requests() {
        let built = SearchQuery::new(
            LocationSpec::Coordinates(Coordinate {
                latitude: 28.5813,
                longitude: -81.3862,
            }),
            25.0,
        )
        .with_services(["  BAKERY", "Pharmacy "])
        .with_store_types(["Outlet"]);

        let mut request = coordinate_request(28.5813, -81.3862);
        request.services = Some(vec!["bakery".to_string(), "pharmacy".to_string()]);
        request.store_types = Some(vec!["outlet".to_string()]);
        let parsed = SearchQuery::from_request(&request).expect("query");

        assert_eq!(built.cache_key(), parsed.cache_key());
        assert_eq!(built, parsed);
    }
}
