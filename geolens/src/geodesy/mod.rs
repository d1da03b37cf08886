//! Geodesic math module
//!
//! Pure functions over geographic coordinates: initial great-circle bearing,
//! haversine distance, and the degree-wrapping helpers the projection engine
//! is built on. No state, no I/O.

mod types;

pub use types::{GeoPoint, GeodesyError, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Computes the initial compass bearing along the great-circle path from
/// `from` to `to`.
///
/// Uses the standard forward-azimuth formula (atan2 over sine/cosine terms
/// of the longitude delta and the two latitudes).
///
/// # Returns
///
/// Bearing in degrees, normalized to [0, 360), where 0 = north and
/// 90 = east. The bearing of a point to itself is mathematically undefined;
/// this implementation returns 0.0 for identical points.
#[inline]
pub fn bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Computes the great-circle (haversine) distance between two points.
///
/// # Returns
///
/// Distance in meters (≥ 0). Symmetric: `distance(a, b) == distance(b, a)`
/// under the evaluation order used here.
#[inline]
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Normalizes an angle in degrees into [0, 360).
///
/// Correct for all real inputs, including negative angles and angles far
/// outside one revolution.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Wraps an angle difference in degrees into the signed range (-180, 180].
///
/// 0 means dead-ahead, negative means to the left. Unlike the common
/// `((x + 540) % 360) - 180` fragment, this maps +180 to +180 (not -180)
/// and handles negative inputs.
#[inline]
pub fn wrap_signed_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
