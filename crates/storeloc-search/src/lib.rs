//! Geospatial store search engine.
//!
//! A search resolves its origin through [`GeocodeResolver`] (backed by a
//! long-lived geocode cache), narrows candidates with a [`bounding_box`]
//! query against a [`StoreRepository`], then keeps stores whose exact
//! [`distance_miles`] is within the radius and that pass the service (AND),
//! store type (OR) and open-now filters. Complete answers are kept in a
//! short-lived result cache keyed by [`SearchQuery::cache_key`].

pub mod bbox;
pub mod cache;
pub mod config;
pub mod distance;
pub mod hours;
pub mod orchestrator;
pub mod provider;
pub mod query;
pub mod repository;
pub mod resolver;
pub mod types;

pub use bbox::bounding_box;
pub use cache::{CacheStats, TtlCache};
pub use config::EngineConfig;
pub use distance::{distance_miles, EARTH_RADIUS_MILES};
pub use hours::{HoursEvaluator, WeeklyHoursEvaluator};
pub use orchestrator::SearchOrchestrator;
pub use provider::{GeocodingProvider, ProviderError};
pub use query::{SearchQuery, SearchRequest};
pub use repository::{InMemoryStoreRepository, RepositoryError, StoreRepository};
pub use resolver::GeocodeResolver;
pub use types::{
    EngineCacheStats, FiltersApplied, SearchLocation, SearchResponse, SearchResultEntry,
};
