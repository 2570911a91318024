use serde::{Serialize, Serializer};
use storeloc_core::{GeocodeMatch, LocationSpec, StoreRecord};

use crate::cache::CacheStats;
use crate::query::SearchQuery;

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultEntry {
    #[serde(flatten)]
    pub store: StoreRecord,
    /// Exact distance; serialized rounded to 2 decimal places.
    #[serde(serialize_with = "serialize_rounded_miles")]
    pub distance_miles: f64,
    pub is_open_now: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_rounded_miles<S: Serializer>(miles: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((miles * 100.0).round() / 100.0)
}

/// Where a search was anchored, echoed back to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchLocation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

impl SearchLocation {
    #[must_use]
    pub fn new(spec: &LocationSpec, origin: &GeocodeMatch) -> Self {
        let (kind, address, postal_code) = match spec {
            LocationSpec::Coordinates(_) => ("coordinates", None, None),
            LocationSpec::Address(address) => ("address", Some(address.clone()), None),
            LocationSpec::PostalCode(postal) => ("postal_code", None, Some(postal.clone())),
        };
        Self {
            kind,
            latitude: origin.coordinate.latitude,
            longitude: origin.coordinate.longitude,
            address,
            postal_code,
            formatted_address: origin.formatted_address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiltersApplied {
    pub radius_miles: f64,
    pub services: Vec<String>,
    pub store_types: Vec<String>,
    pub open_now: bool,
}

impl From<&SearchQuery> for FiltersApplied {
    fn from(query: &SearchQuery) -> Self {
        Self {
            radius_miles: query.radius_miles,
            services: query.services().iter().cloned().collect(),
            store_types: query.store_types().iter().cloned().collect(),
            open_now: query.open_now,
        }
    }
}

/// A complete, sorted search answer. This is what the result cache holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResultEntry>,
    pub search_location: SearchLocation,
    pub filters_applied: FiltersApplied,
    pub total_results: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineCacheStats {
    pub geocode_cache: CacheStats,
    pub search_cache: CacheStats,
}
