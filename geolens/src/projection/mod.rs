//! Projection engine
//!
//! Maps geotagged media candidates onto the camera viewport from the current
//! position and heading: great-circle distance, bearing, signed angular
//! offset from the heading, field-of-view culling, horizontal screen
//! position, and a distance-based scale cue.
//!
//! The engine is a pure function of its inputs. The full projected list is
//! recomputed from scratch on every position or heading update - the
//! candidate set is small (tens of markers), full recomputation is cheap,
//! and it eliminates a whole class of staleness bugs that incremental
//! updates would invite.

mod config;

pub use config::{
    ProjectionConfig, DEFAULT_FOV_DEGREES, DEFAULT_MARKER_WIDTH, DEFAULT_MATCH_TOLERANCE_DEGREES,
    DEFAULT_NEAR_DISTANCE_METERS, DEFAULT_SCALE_CAP, DEFAULT_SCALE_NUMERATOR,
    DEFAULT_VERTICAL_ANCHOR, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
};

use serde::{Deserialize, Serialize};

use crate::geodesy::{self, GeoPoint};
use crate::media::MediaMarker;

/// How a projected marker should be treated by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Within the near-distance threshold: shown in the browsable strip,
    /// not overlaid on the camera view.
    Near,
    /// Beyond the near threshold and within the field of view: shown as a
    /// positioned AR overlay.
    FarVisible,
    /// Beyond the near threshold but outside the field of view: computed
    /// for completeness, not drawn.
    FarHidden,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Near => write!(f, "near"),
            Self::FarVisible => write!(f, "visible"),
            Self::FarHidden => write!(f, "hidden"),
        }
    }
}

/// A media marker projected into viewport space.
///
/// Derived fresh from the current position, heading, and marker set on
/// every update; never mutated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedMarker {
    /// The underlying media candidate.
    pub marker: MediaMarker,
    /// Great-circle distance from the current position, in meters.
    pub distance_meters: f64,
    /// Compass bearing from the current position, in degrees [0, 360).
    pub bearing_degrees: f64,
    /// Signed offset from the device heading, in degrees (-180, 180].
    /// 0 = dead ahead, negative = to the left.
    pub angular_offset_degrees: f64,
    /// Horizontal screen position of the marker's left edge, in pixels.
    pub screen_x: f64,
    /// Vertical screen position, in pixels (fixed anchor).
    pub screen_y: f64,
    /// Distance-based size factor, capped.
    pub scale: f64,
    /// Renderer treatment.
    pub classification: Classification,
}

/// Projects media candidates into viewport space.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project all candidates from the given position and heading.
    ///
    /// Candidates rejected by the coarse box pre-filter are excluded from
    /// the output entirely. Output order is input order (stable); use
    /// [`crate::classify::paint_order`] when the renderer needs
    /// back-to-front ordering.
    ///
    /// Idempotent: identical inputs produce identical output lists.
    pub fn project(
        &self,
        position: &GeoPoint,
        heading_degrees: f64,
        candidates: &[MediaMarker],
    ) -> Vec<ProjectedMarker> {
        candidates
            .iter()
            .filter_map(|marker| self.project_one(position, heading_degrees, marker))
            .collect()
    }

    /// Project a single candidate, or `None` when the coarse pre-filter
    /// rejects it.
    fn project_one(
        &self,
        position: &GeoPoint,
        heading_degrees: f64,
        marker: &MediaMarker,
    ) -> Option<ProjectedMarker> {
        // Coarse box gate: a degree-scale relevance check, independent of
        // (and far looser than) the near/far distance split below.
        let delta_lat = (marker.location.latitude - position.latitude).abs();
        let delta_lon = (marker.location.longitude - position.longitude).abs();
        if delta_lat >= self.config.match_tolerance_degrees
            || delta_lon >= self.config.match_tolerance_degrees
        {
            return None;
        }

        let distance_meters = geodesy::distance(position, &marker.location);
        let bearing_degrees = geodesy::bearing(position, &marker.location);
        let angular_offset_degrees =
            geodesy::wrap_signed_degrees(bearing_degrees - heading_degrees);

        // Strict `<`: a candidate exactly at the threshold is far.
        let classification = if distance_meters < self.config.near_distance_meters {
            Classification::Near
        } else if angular_offset_degrees.abs() > self.config.half_fov() {
            // Strict `>`: a candidate exactly at the FOV edge is visible.
            Classification::FarHidden
        } else {
            Classification::FarVisible
        };

        let screen_x = ((angular_offset_degrees + self.config.half_fov())
            / self.config.fov_degrees)
            * self.config.viewport_width
            - self.config.marker_width / 2.0;

        // Inverse-distance size cue; the 1 m floor avoids division blow-up.
        let scale = (self.config.scale_numerator / distance_meters.max(1.0))
            .min(self.config.scale_cap);

        Some(ProjectedMarker {
            marker: marker.clone(),
            distance_meters,
            bearing_degrees,
            angular_offset_degrees,
            screen_x,
            screen_y: self.config.anchor_y(),
            scale,
            classification,
        })
    }
}
