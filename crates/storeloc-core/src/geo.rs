//! Geographic value types shared by the search engine, the repositories, and
//! the geocoding provider.

use serde::{Deserialize, Serialize};

use crate::SearchError;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidCoordinate`] when latitude is outside
    /// `[-90, 90]` or longitude is outside `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SearchError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// # Errors
    ///
    /// Returns [`SearchError::InvalidCoordinate`] when either component is out of range.
    pub fn validate(&self) -> Result<(), SearchError> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(SearchError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Axis-aligned latitude/longitude rectangle. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }

    /// `true` when the box extends past the ±180° meridian.
    ///
    /// Boxes are never split, so candidates on the far side of the
    /// antimeridian are not returned by a box query.
    #[must_use]
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon < -180.0 || self.max_lon > 180.0
    }
}

/// The single location form a search is anchored on.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSpec {
    Coordinates(Coordinate),
    Address(String),
    PostalCode(String),
}

impl LocationSpec {
    /// Pick the location form from optional request fields.
    ///
    /// Precedence is coordinates, then address, then postal code; the first
    /// present form wins and the others are ignored. A latitude without a
    /// longitude (or the reverse) does not count as a coordinate, and blank
    /// text fields count as absent.
    ///
    /// # Errors
    ///
    /// - [`SearchError::MissingLocation`] when no form is present.
    /// - [`SearchError::InvalidCoordinate`] when the coordinate is out of range.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
        address: Option<&str>,
        postal_code: Option<&str>,
    ) -> Result<Self, SearchError> {
        if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
            return Coordinate::new(latitude, longitude).map(Self::Coordinates);
        }

        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
        };

        if let Some(address) = present(address) {
            return Ok(Self::Address(address));
        }
        if let Some(postal_code) = present(postal_code) {
            return Ok(Self::PostalCode(postal_code));
        }
        Err(SearchError::MissingLocation)
    }
}

/// A resolved search origin plus the provider's description of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeMatch {
    pub coordinate: Coordinate,
    pub formatted_address: Option<String>,
}

impl From<Coordinate> for GeocodeMatch {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            formatted_address: None,
        }
    }
}
