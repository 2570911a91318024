use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read store catalog {path}: {source}")]
    CatalogIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse store catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}

/// Failure categories surfaced by the store search engine.
///
/// `MissingLocation`, `InvalidRadius` and `InvalidCoordinate` are client
/// faults, detected before any geocoding or cache interaction. The other two
/// are upstream-dependency failures and are never retried by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("must provide either address, postal_code, or coordinates (latitude & longitude)")]
    MissingLocation,

    #[error("radius_miles must be greater than 0 and at most {max_radius_miles}, got {radius_miles}")]
    InvalidRadius {
        radius_miles: f64,
        max_radius_miles: f64,
    },

    #[error("coordinate ({latitude}, {longitude}) is out of range")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("could not geocode '{query}': {reason}")]
    GeocodingFailure { query: String, reason: String },

    #[error("store repository unavailable: {0}")]
    RepositoryUnavailable(String),
}

impl SearchError {
    /// `true` when the caller supplied a bad query, `false` for upstream failures.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingLocation | Self::InvalidRadius { .. } | Self::InvalidCoordinate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        assert!(SearchError::MissingLocation.is_client_error());
        assert!(SearchError::InvalidRadius {
            radius_miles: 0.0,
            max_radius_miles: 100.0,
        }
        .is_client_error());
        assert!(SearchError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        }
        .is_client_error());
    }

    #[test]
    fn upstream_errors_are_not_client_errors() {
        let geo = SearchError::GeocodingFailure {
            query: "nowhere".to_string(),
            reason: "no match".to_string(),
        };
        assert!(!geo.is_client_error());
        assert!(!SearchError::RepositoryUnavailable("down".to_string()).is_client_error());
    }

    #[test]
    fn invalid_radius_message_names_both_bounds() {
        let err = SearchError::InvalidRadius {
            radius_miles: 250.0,
            max_radius_miles: 100.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("250"), "message: {msg}");
        assert!(msg.contains("100"), "message: {msg}");
    }
}
