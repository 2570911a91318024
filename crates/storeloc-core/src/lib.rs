pub mod app_config;
pub mod config;
pub mod error;
pub mod geo;
pub mod stores;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, SearchError};
pub use geo::{BoundingBox, Coordinate, GeocodeMatch, LocationSpec};
pub use stores::{
    load_store_catalog, StoreAddress, StoreCatalog, StoreRecord, StoreStatus, WeeklyHours,
};
