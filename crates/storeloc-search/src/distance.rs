//! Great-circle distance on a spherical Earth.

use storeloc_core::Coordinate;

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance in miles between two coordinates.
///
/// Deltas are taken as absolute differences so the result is bit-for-bit
/// identical regardless of argument order.
#[must_use]
pub fn distance_miles(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (a.latitude - b.latitude).abs().to_radians();
    let d_lon = (a.longitude - b.longitude).abs().to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}
