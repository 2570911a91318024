//! Read operations for the `stores` table.

use sqlx::PgPool;
use storeloc_core::{BoundingBox, StoreStatus};

use super::types::StoreRow;

/// List stores with `status` whose coordinates fall inside `bbox` (inclusive).
///
/// Services are aggregated from `store_services` into a sorted array; stores
/// without services get an empty array. Ordered by `store_id`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_stores_in_bounding_box(
    pool: &PgPool,
    bbox: &BoundingBox,
    status: StoreStatus,
) -> Result<Vec<StoreRow>, sqlx::Error> {
    sqlx::query_as::<_, StoreRow>(
        "SELECT s.store_id, s.name, s.store_type, s.status, \
                s.latitude, s.longitude, \
                s.address_street, s.address_city, s.address_state, \
                s.address_postal_code, s.address_country, s.phone, \
                s.hours_mon, s.hours_tue, s.hours_wed, s.hours_thu, \
                s.hours_fri, s.hours_sat, s.hours_sun, \
                COALESCE(\
                    array_agg(ss.service ORDER BY ss.service) \
                        FILTER (WHERE ss.service IS NOT NULL), \
                    '{}'::text[]\
                ) AS services \
         FROM stores s \
         LEFT JOIN store_services ss ON ss.store_id = s.id \
         WHERE s.status = $1 \
           AND s.latitude BETWEEN $2 AND $3 \
           AND s.longitude BETWEEN $4 AND $5 \
         GROUP BY s.id \
         ORDER BY s.store_id",
    )
    .bind(status.as_str())
    .bind(bbox.min_lat)
    .bind(bbox.max_lat)
    .bind(bbox.min_lon)
    .bind(bbox.max_lon)
    .fetch_all(pool)
    .await
}

/// Total number of stores, regardless of status.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_stores(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stores")
        .fetch_one(pool)
        .await
}
