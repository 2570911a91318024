use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Coordinate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    #[default]
    Active,
    Inactive,
    TemporarilyClosed,
}

impl StoreStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoreStatus::Active => "active",
            StoreStatus::Inactive => "inactive",
            StoreStatus::TemporarilyClosed => "temporarily_closed",
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreStatus {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StoreStatus::Active),
            "inactive" => Ok(StoreStatus::Inactive),
            "temporarily_closed" => Ok(StoreStatus::TemporarilyClosed),
            other => Err(ConfigError::Validation(format!(
                "unknown store status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreAddress {
    #[serde(rename = "address_street")]
    pub street: String,
    #[serde(rename = "address_city")]
    pub city: String,
    #[serde(rename = "address_state")]
    pub state: String,
    #[serde(rename = "address_postal_code")]
    pub postal_code: String,
    #[serde(rename = "address_country", default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "USA".to_string()
}

fn closed() -> String {
    "closed".to_string()
}

/// Opening hours per weekday, each either `"closed"` or `"HH:MM-HH:MM"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(rename = "hours_mon", default = "closed")]
    pub mon: String,
    #[serde(rename = "hours_tue", default = "closed")]
    pub tue: String,
    #[serde(rename = "hours_wed", default = "closed")]
    pub wed: String,
    #[serde(rename = "hours_thu", default = "closed")]
    pub thu: String,
    #[serde(rename = "hours_fri", default = "closed")]
    pub fri: String,
    #[serde(rename = "hours_sat", default = "closed")]
    pub sat: String,
    #[serde(rename = "hours_sun", default = "closed")]
    pub sun: String,
}

impl Default for WeeklyHours {
    fn default() -> Self {
        Self {
            mon: closed(),
            tue: closed(),
            wed: closed(),
            thu: closed(),
            fri: closed(),
            sat: closed(),
            sun: closed(),
        }
    }
}

impl WeeklyHours {
    /// Same hours string for all seven days.
    #[must_use]
    pub fn every_day(hours: &str) -> Self {
        Self {
            mon: hours.to_string(),
            tue: hours.to_string(),
            wed: hours.to_string(),
            thu: hours.to_string(),
            fri: hours.to_string(),
            sat: hours.to_string(),
            sun: hours.to_string(),
        }
    }

    #[must_use]
    pub fn for_weekday(&self, day: Weekday) -> &str {
        match day {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }
}

/// A retail store as owned by the store repository. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    #[serde(rename = "store_id")]
    pub id: String,
    pub name: String,
    pub store_type: String,
    #[serde(default)]
    pub status: StoreStatus,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(flatten)]
    pub address: StoreAddress,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub services: BTreeSet<String>,
    #[serde(flatten)]
    pub hours: WeeklyHours,
}

#[derive(Debug, Deserialize)]
pub struct StoreCatalog {
    pub stores: Vec<StoreRecord>,
}

/// Load and validate a store catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_store_catalog(path: &Path) -> Result<StoreCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_store_catalog(&content)
}

/// Parse and validate a store catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_store_catalog(content: &str) -> Result<StoreCatalog, ConfigError> {
    let catalog: StoreCatalog = serde_yaml::from_str(content)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &StoreCatalog) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in &catalog.stores {
        if store.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store_id must be non-empty".to_string(),
            ));
        }

        if store.store_type.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty store_type",
                store.id
            )));
        }

        if store.coordinate.validate().is_err() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has out-of-range coordinates ({}, {})",
                store.id, store.coordinate.latitude, store.coordinate.longitude
            )));
        }

        if !seen_ids.insert(store.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store_id: '{}'",
                store.id
            )));
        }
    }

    Ok(())
}
