//! Database operations for the `stores` and `store_services` tables.

mod read;
mod repository;
mod types;
mod write;

pub use read::{count_stores, list_stores_in_bounding_box};
pub use repository::PgStoreRepository;
pub use types::StoreRow;
pub use write::upsert_store;
