//! Write operations for the `stores` table.

use sqlx::PgPool;
use storeloc_core::StoreRecord;

/// Insert or update a store by `store_id` and replace its service set.
///
/// Runs in one transaction. Returns `true` when the row was newly inserted.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if any statement fails; the transaction is rolled
/// back in that case.
pub async fn upsert_store(pool: &PgPool, store: &StoreRecord) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (id, is_new): (i64, bool) = sqlx::query_as(
        "INSERT INTO stores \
             (store_id, name, store_type, status, latitude, longitude, \
              address_street, address_city, address_state, address_postal_code, \
              address_country, phone, \
              hours_mon, hours_tue, hours_wed, hours_thu, hours_fri, hours_sat, hours_sun) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
                 $13, $14, $15, $16, $17, $18, $19) \
         ON CONFLICT (store_id) DO UPDATE SET \
             name                = EXCLUDED.name, \
             store_type          = EXCLUDED.store_type, \
             status              = EXCLUDED.status, \
             latitude            = EXCLUDED.latitude, \
             longitude           = EXCLUDED.longitude, \
             address_street      = EXCLUDED.address_street, \
             address_city        = EXCLUDED.address_city, \
             address_state       = EXCLUDED.address_state, \
             address_postal_code = EXCLUDED.address_postal_code, \
             address_country     = EXCLUDED.address_country, \
             phone               = EXCLUDED.phone, \
             hours_mon           = EXCLUDED.hours_mon, \
             hours_tue           = EXCLUDED.hours_tue, \
             hours_wed           = EXCLUDED.hours_wed, \
             hours_thu           = EXCLUDED.hours_thu, \
             hours_fri           = EXCLUDED.hours_fri, \
             hours_sat           = EXCLUDED.hours_sat, \
             hours_sun           = EXCLUDED.hours_sun, \
             updated_at          = NOW() \
         RETURNING id, (xmax = 0) AS is_new",
    )
    .bind(&store.id)
    .bind(&store.name)
    .bind(&store.store_type)
    .bind(store.status.as_str())
    .bind(store.coordinate.latitude)
    .bind(store.coordinate.longitude)
    .bind(&store.address.street)
    .bind(&store.address.city)
    .bind(&store.address.state)
    .bind(&store.address.postal_code)
    .bind(&store.address.country)
    .bind(&store.phone)
    .bind(&store.hours.mon)
    .bind(&store.hours.tue)
    .bind(&store.hours.wed)
    .bind(&store.hours.thu)
    .bind(&store.hours.fri)
    .bind(&store.hours.sat)
    .bind(&store.hours.sun)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM store_services WHERE store_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if !store.services.is_empty() {
        let services: Vec<String> = store.services.iter().cloned().collect();
        sqlx::query(
            "INSERT INTO store_services (store_id, service) \
             SELECT $1, * FROM UNNEST($2::text[])",
        )
        .bind(id)
        .bind(&services)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(is_new)
}
