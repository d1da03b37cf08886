//! Projection configuration.
//!
//! All knobs are plain numeric parameters with documented defaults - there
//! is no configuration file; callers construct the struct (usually from
//! platform values such as the device screen size) and hand it to the
//! engine.

use serde::{Deserialize, Serialize};

/// Default camera horizontal field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f64 = 60.0;

/// Default viewport width in pixels (portrait phone).
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1080.0;

/// Default viewport height in pixels (portrait phone).
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 1920.0;

/// Default marker sprite width in pixels.
pub const DEFAULT_MARKER_WIDTH: f64 = 40.0;

/// Default vertical anchor as a fraction of viewport height.
pub const DEFAULT_VERTICAL_ANCHOR: f64 = 0.5;

/// Default coarse location-match tolerance in degrees of lat/lon.
pub const DEFAULT_MATCH_TOLERANCE_DEGREES: f64 = 0.05;

/// Default near/far distance threshold in meters.
pub const DEFAULT_NEAR_DISTANCE_METERS: f64 = 25.0;

/// Default upper bound on the marker scale factor.
pub const DEFAULT_SCALE_CAP: f64 = 1.2;

/// Default numerator for the inverse-distance scale cue.
pub const DEFAULT_SCALE_NUMERATOR: f64 = 40.0;

/// Configuration for the projection engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Camera horizontal field of view in degrees.
    /// Default: 60.0
    pub fov_degrees: f64,

    /// Viewport width in pixels.
    /// Default: 1080.0
    pub viewport_width: f64,

    /// Viewport height in pixels.
    /// Default: 1920.0
    pub viewport_height: f64,

    /// Marker sprite width in pixels; markers are centered by subtracting
    /// half of this from the computed horizontal position.
    /// Default: 40.0
    pub marker_width: f64,

    /// Fixed vertical marker anchor, as a fraction of viewport height.
    /// The horizontal axis carries all angular information; vertical
    /// position is constant (1-D angular projection, device pitch is not
    /// modeled).
    /// Default: 0.5 (vertical center)
    pub vertical_anchor: f64,

    /// Coarse box pre-filter: candidates whose latitude or longitude
    /// differs from the current position by at least this many degrees are
    /// not considered relevant at all. This gate is independent of, and
    /// far looser than, the near/far distance split.
    /// Default: 0.05 (~5 km)
    pub match_tolerance_degrees: f64,

    /// Near/far split in meters: strictly closer is "near" (browsable
    /// strip), at or beyond is "far" (AR overlay candidate).
    /// Default: 25.0
    pub near_distance_meters: f64,

    /// Upper bound on the distance-based marker scale.
    /// Default: 1.2
    pub scale_cap: f64,

    /// Numerator of the inverse-distance scale cue:
    /// `scale = min(cap, numerator / max(distance, 1))`.
    /// Default: 40.0
    pub scale_numerator: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            marker_width: DEFAULT_MARKER_WIDTH,
            vertical_anchor: DEFAULT_VERTICAL_ANCHOR,
            match_tolerance_degrees: DEFAULT_MATCH_TOLERANCE_DEGREES,
            near_distance_meters: DEFAULT_NEAR_DISTANCE_METERS,
            scale_cap: DEFAULT_SCALE_CAP,
            scale_numerator: DEFAULT_SCALE_NUMERATOR,
        }
    }
}

impl ProjectionConfig {
    /// Create a configuration for a given viewport, other fields default.
    pub fn for_viewport(width: f64, height: f64) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..Default::default()
        }
    }

    /// Half the horizontal field of view, in degrees.
    #[inline]
    pub fn half_fov(&self) -> f64 {
        self.fov_degrees / 2.0
    }

    /// The fixed vertical screen position for overlay markers.
    #[inline]
    pub fn anchor_y(&self) -> f64 {
        self.vertical_anchor * self.viewport_height
    }
}
