//! Store lookup boundary.

use async_trait::async_trait;
use storeloc_core::{BoundingBox, StoreRecord, StoreStatus};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("store lookup failed: {0}")]
pub struct RepositoryError(pub String);

/// External store persistence, queried by bounding box.
///
/// Implementations may over-approximate the box; the engine re-checks status
/// and exact distance on everything returned.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn query_by_bounding_box(
        &self,
        bbox: &BoundingBox,
        status: StoreStatus,
    ) -> Result<Vec<StoreRecord>, RepositoryError>;
}

/// Repository over a fixed set of stores held in memory, e.g. a YAML catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoreRepository {
    stores: Vec<StoreRecord>,
}

impl InMemoryStoreRepository {
    #[must_use]
    pub fn new(stores: Vec<StoreRecord>) -> Self {
        Self { stores }
    }

    #[must_use]
    pub fn stores(&self) -> &[StoreRecord] {
        &self.stores
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn query_by_bounding_box(
        &self,
        bbox: &BoundingBox,
        status: StoreStatus,
    ) -> Result<Vec<StoreRecord>, RepositoryError> {
        Ok(self
            .stores
            .iter()
            .filter(|store| store.status == status && bbox.contains(&store.coordinate))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use storeloc_core::{Coordinate, StoreAddress, WeeklyHours};

    use super::*;

    fn store(id: &str, latitude: f64, longitude: f64, status: StoreStatus) -> StoreRecord {
        StoreRecord {
            id: id.to_string(),
            name: format!("Store {id}"),
            store_type: "regular".to_string(),
            status,
            coordinate: Coordinate {
                latitude,
                longitude,
            },
            address: StoreAddress {
                street: "1 Main St".to_string(),
                city: "Orlando".to_string(),
                state: "FL".to_string(),
                postal_code: "32801".to_string(),
                country: "USA".to_string(),
            },
            phone: None,
            services: Default::default(),
            hours: WeeklyHours::default(),
        }
    }

    #[tokio::test]
    async fn in_memory_repository_filters_by_box_and_status() {
        let repo = InMemoryStoreRepository::new(vec![
            store("inside", 28.5, -81.4, StoreStatus::Active),
            store("outside", 35.0, -81.4, StoreStatus::Active),
            store("inactive", 28.5, -81.4, StoreStatus::Inactive),
        ]);
        let bbox = BoundingBox {
            min_lat: 28.0,
            max_lat: 29.0,
            min_lon: -82.0,
            max_lon: -81.0,
        };

        let found = repo
            .query_by_bounding_box(&bbox, StoreStatus::Active)
            .await
            .expect("query");
        let ids: Vec<&str> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["inside"]);
    }
}
