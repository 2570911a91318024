use async_trait::async_trait;
use sqlx::PgPool;
use storeloc_core::{BoundingBox, StoreRecord, StoreStatus};
use storeloc_search::{RepositoryError, StoreRepository};

use super::read::list_stores_in_bounding_box;
use super::types::StoreRow;

/// [`StoreRepository`] backed by the Postgres `stores` table.
#[derive(Debug, Clone)]
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn query_by_bounding_box(
        &self,
        bbox: &BoundingBox,
        status: StoreStatus,
    ) -> Result<Vec<StoreRecord>, RepositoryError> {
        let rows = list_stores_in_bounding_box(&self.pool, bbox, status)
            .await
            .map_err(|e| RepositoryError(e.to_string()))?;
        rows_to_stores(rows)
    }
}

/// Map every row or fail the whole query, so a partial candidate list is
/// never returned as a complete answer.
fn rows_to_stores(rows: Vec<StoreRow>) -> Result<Vec<StoreRecord>, RepositoryError> {
    rows.into_iter()
        .map(|row| StoreRecord::try_from(row).map_err(|e| RepositoryError(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(store_id: &str, status: &str) -> StoreRow {
        StoreRow {
            store_id: store_id.to_string(),
            name: format!("Store {store_id}"),
            store_type: "regular".to_string(),
            status: status.to_string(),
            latitude: 28.5,
            longitude: -81.4,
            address_street: "1 Main St".to_string(),
            address_city: "Orlando".to_string(),
            address_state: "FL".to_string(),
            address_postal_code: "32801".to_string(),
            address_country: "USA".to_string(),
            phone: None,
            hours_mon: "closed".to_string(),
            hours_tue: "closed".to_string(),
            hours_wed: "closed".to_string(),
            hours_thu: "closed".to_string(),
            hours_fri: "closed".to_string(),
            hours_sat: "closed".to_string(),
            hours_sun: "closed".to_string(),
            services: vec![],
        }
    }

    #[test]
    fn valid_rows_map_in_order() {
        let stores = rows_to_stores(vec![row("A", "active"), row("B", "active")]).expect("stores");
        let ids: Vec<&str> = stores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn one_invalid_row_fails_the_whole_query() {
        let err = rows_to_stores(vec![row("A", "active"), row("B", "demolished")]).unwrap_err();
        assert!(err.0.contains("'B'"), "error should name the row: {}", err.0);
    }
}
