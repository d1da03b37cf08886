//! Geographic value types and validation errors.

use serde::{Deserialize, Serialize};

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors from geographic coordinate validation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeodesyError {
    /// Latitude outside [-90, 90] degrees.
    #[error("Invalid latitude: {0} (must be between -90.0 and 90.0)")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] degrees.
    #[error("Invalid longitude: {0} (must be between -180.0 and 180.0)")]
    InvalidLongitude(f64),
}

/// A geographic position in WGS84 degrees.
///
/// Immutable value type. Construct with [`GeoPoint::new`] to get range
/// validation; the fields are public so that deserialized or literal values
/// can be built directly, in which case the caller guarantees
/// latitude ∈ [-90, 90] and longitude ∈ [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a validated geographic point.
    ///
    /// # Errors
    ///
    /// Returns [`GeodesyError::InvalidLatitude`] or
    /// [`GeodesyError::InvalidLongitude`] when the value is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeodesyError> {
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(GeodesyError::InvalidLatitude(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(GeodesyError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
