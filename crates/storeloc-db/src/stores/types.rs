//! Row types for the `stores` table.

use storeloc_core::{Coordinate, StoreAddress, StoreRecord, StoreStatus, WeeklyHours};

use crate::DbError;

/// A `stores` row joined with its aggregated `store_services`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreRow {
    pub store_id: String,
    pub name: String,
    pub store_type: String,
    pub status: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address_street: String,
    pub address_city: String,
    pub address_state: String,
    pub address_postal_code: String,
    pub address_country: String,
    pub phone: Option<String>,
    pub hours_mon: String,
    pub hours_tue: String,
    pub hours_wed: String,
    pub hours_thu: String,
    pub hours_fri: String,
    pub hours_sat: String,
    pub hours_sun: String,
    pub services: Vec<String>,
}

impl TryFrom<StoreRow> for StoreRecord {
    type Error = DbError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let status: StoreStatus = row.status.parse().map_err(|e| DbError::InvalidRow {
            store_id: row.store_id.clone(),
            reason: format!("{e}"),
        })?;

        Ok(StoreRecord {
            id: row.store_id,
            name: row.name,
            store_type: row.store_type,
            status,
            coordinate: Coordinate {
                latitude: row.latitude,
                longitude: row.longitude,
            },
            address: StoreAddress {
                street: row.address_street,
                city: row.address_city,
                state: row.address_state,
                postal_code: row.address_postal_code,
                country: row.address_country,
            },
            phone: row.phone,
            services: row.services.into_iter().collect(),
            hours: WeeklyHours {
                mon: row.hours_mon,
                tue: row.hours_tue,
                wed: row.hours_wed,
                thu: row.hours_thu,
                fri: row.hours_fri,
                sat: row.hours_sat,
                sun: row.hours_sun,
            },
        })
    }
}
