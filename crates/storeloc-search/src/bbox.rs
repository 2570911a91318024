//! Bounding-box prefilter.
//!
//! Turns a center and radius into a lat/lng rectangle that contains every
//! point within the radius, so the repository can narrow candidates before
//! exact distances are computed.

use storeloc_core::{BoundingBox, Coordinate};

use crate::distance::EARTH_RADIUS_MILES;

const MILES_PER_LAT_DEGREE: f64 = 69.0;

/// Floor for `cos(latitude)` so the longitude spread stays finite near the poles.
const MIN_COS_LATITUDE: f64 = 0.01;

/// Relative slack added to the spherical-cap width to absorb rounding.
const CAP_WIDTH_SLACK: f64 = 1e-9;

/// Compute a box that is a superset of the circle of `radius_miles` around `center`.
///
/// - Latitude half-height is `radius / 69`.
/// - Longitude half-width is `radius / (69 * cos(lat))`, with the cosine
///   floored at 0.01. At high latitudes that flat-earth width can be narrower
///   than the true spherical cap, so the exact cap half-width
///   `asin(sin(d) / cos(lat))` is used whenever it is larger.
/// - When the circle may reach a pole, every meridian is inside it and the
///   box spans the full longitude range.
///
/// The box is not wrapped across ±180°; see [`BoundingBox::crosses_antimeridian`].
#[must_use]
pub fn bounding_box(center: &Coordinate, radius_miles: f64) -> BoundingBox {
    let lat_delta = radius_miles / MILES_PER_LAT_DEGREE;
    let min_lat = center.latitude - lat_delta;
    let max_lat = center.latitude + lat_delta;

    if max_lat >= 90.0 || min_lat <= -90.0 {
        return BoundingBox {
            min_lat,
            max_lat,
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    let cos_lat = center.latitude.to_radians().cos();
    let flat_width = radius_miles / (MILES_PER_LAT_DEGREE * cos_lat.max(MIN_COS_LATITUDE));
    let lon_delta = flat_width.max(spherical_cap_half_width(radius_miles, cos_lat));

    BoundingBox {
        min_lat,
        max_lat,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    }
}

/// Widest longitude offset (degrees) reached by a cap of `radius_miles`
/// centered at a latitude whose cosine is `cos_lat`.
fn spherical_cap_half_width(radius_miles: f64, cos_lat: f64) -> f64 {
    let angular = radius_miles / EARTH_RADIUS_MILES;
    let ratio = angular.sin() / cos_lat;
    if ratio >= 1.0 {
        return 180.0;
    }
    ratio.asin().to_degrees() * (1.0 + CAP_WIDTH_SLACK)
}
