//! Overlay engine - the single-threaded recomputation core.
//!
//! Holds the most recent position, heading state, and marker snapshot, and
//! recomputes the full projected frame synchronously whenever any of them
//! changes. There is no queueing and no incremental delta tracking: the
//! most recent sample wins, and every frame is derived fresh.

use serde::{Deserialize, Serialize};

use crate::geodesy::GeoPoint;
use crate::heading::{HeadingReading, HeadingTracker, PositionHistory};
use crate::media::MediaMarker;
use crate::projection::{ProjectedMarker, ProjectionConfig, ProjectionEngine};

/// A fully recomputed overlay frame.
///
/// Carries the position and heading it was derived from, so consumers can
/// judge freshness and renderers can annotate debug output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayFrame {
    /// The position the frame was computed from.
    pub position: GeoPoint,
    /// The heading the frame was computed from, in degrees [0, 360).
    pub heading_degrees: f64,
    /// All projected markers, in candidate order.
    pub markers: Vec<ProjectedMarker>,
}

/// Single-threaded overlay recomputation state.
///
/// All inputs are push-based: [`on_position`](Self::on_position),
/// [`on_heading`](Self::on_heading), and
/// [`set_markers`](Self::set_markers) each trigger a synchronous full
/// recomputation and return the new frame when one could be computed.
///
/// # Heading fallback
///
/// The compass is authoritative. Until the first compass reading arrives,
/// the engine falls back to a movement-derived heading from the position
/// history; with neither available no frame is produced (and any previous
/// frame remains the last known good output - stale but valid).
#[derive(Debug)]
pub struct OverlayEngine {
    projection: ProjectionEngine,
    tracker: HeadingTracker,
    history: PositionHistory,
    position: Option<GeoPoint>,
    markers: Vec<MediaMarker>,
    frame: Option<OverlayFrame>,
}

impl OverlayEngine {
    /// Create an engine with default heading tracking.
    pub fn new(config: ProjectionConfig) -> Self {
        Self::with_parts(config, HeadingTracker::new(), PositionHistory::new())
    }

    /// Create an engine with explicit tracker and history (custom
    /// smoothing, custom history cadence).
    pub fn with_parts(
        config: ProjectionConfig,
        tracker: HeadingTracker,
        history: PositionHistory,
    ) -> Self {
        Self {
            projection: ProjectionEngine::new(config),
            tracker,
            history,
            position: None,
            markers: Vec::new(),
            frame: None,
        }
    }

    /// Handle a position update. Returns the new frame if one was computed.
    pub fn on_position(&mut self, position: GeoPoint) -> Option<&OverlayFrame> {
        self.history.record(position);
        self.position = Some(position);
        self.recompute()
    }

    /// Handle a heading sensor reading. Returns the new frame if one was
    /// computed.
    pub fn on_heading(&mut self, reading: HeadingReading) -> Option<&OverlayFrame> {
        self.tracker.ingest(reading);
        self.recompute()
    }

    /// Replace the candidate set wholesale (media source refresh).
    /// Returns the new frame if one was computed.
    pub fn set_markers(&mut self, markers: Vec<MediaMarker>) -> Option<&OverlayFrame> {
        self.markers = markers;
        self.recompute()
    }

    /// The last computed frame, if any.
    pub fn frame(&self) -> Option<&OverlayFrame> {
        self.frame.as_ref()
    }

    /// The last received position, if any.
    pub fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    /// Current candidate count.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// The heading the next frame would use: the compass sample when one
    /// has arrived, otherwise a movement-derived heading.
    pub fn effective_heading(&self) -> Option<f64> {
        self.tracker
            .current()
            .map(|sample| sample.degrees)
            .or_else(|| self.history.derive_heading())
    }

    /// Recompute the frame from the latest inputs.
    ///
    /// Requires a position and an (effective) heading; otherwise the
    /// previous frame is left untouched and `None` is returned.
    fn recompute(&mut self) -> Option<&OverlayFrame> {
        let position = self.position?;
        let heading_degrees = self.effective_heading()?;

        let markers = self
            .projection
            .project(&position, heading_degrees, &self.markers);

        tracing::trace!(
            candidates = self.markers.len(),
            projected = markers.len(),
            heading = format!("{:.1}", heading_degrees),
            "Recomputed overlay frame"
        );

        self.frame = Some(OverlayFrame {
            position,
            heading_degrees,
            markers,
        });
        self.frame.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaRef;
    use crate::projection::Classification;

    const SF_LAT: f64 = 37.7749;
    const SF_LON: f64 = -122.4194;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn marker(id: &str, lat: f64, lon: f64) -> MediaMarker {
        MediaMarker::new(id, point(lat, lon), MediaRef::new(format!("asset://{}", id)))
    }

    fn engine() -> OverlayEngine {
        OverlayEngine::new(ProjectionConfig::for_viewport(1000.0, 2000.0))
    }

    #[test]
    fn test_no_frame_without_position() {
        let mut engine = engine();
        engine.set_markers(vec![marker("a", SF_LAT + 0.001, SF_LON)]);

        assert!(engine.on_heading(HeadingReading::Degrees { degrees: 0.0 }).is_none());
        assert!(engine.frame().is_none());
    }

    #[test]
    fn test_no_frame_without_heading() {
        let mut engine = engine();
        engine.set_markers(vec![marker("a", SF_LAT + 0.001, SF_LON)]);

        // A single position yields no heading (compass silent, no movement)
        assert!(engine.on_position(point(SF_LAT, SF_LON)).is_none());
        assert!(engine.frame().is_none());
    }

    #[test]
    fn test_frame_after_position_and_heading() {
        let mut engine = engine();
        engine.set_markers(vec![marker("north", SF_LAT + 0.001, SF_LON)]);
        engine.on_position(point(SF_LAT, SF_LON));

        let frame = engine
            .on_heading(HeadingReading::Degrees { degrees: 0.0 })
            .expect("frame should be computed");

        assert_eq!(frame.markers.len(), 1);
        assert_eq!(frame.markers[0].classification, Classification::FarVisible);
        assert_eq!(frame.heading_degrees, 0.0);
    }

    #[test]
    fn test_compass_overrides_derived_heading() {
        let mut engine = engine();
        engine.on_position(point(SF_LAT, SF_LON));
        engine.on_heading(HeadingReading::Degrees { degrees: 123.0 });

        assert_eq!(engine.effective_heading(), Some(123.0));
    }

    #[test]
    fn test_marker_refresh_recomputes_frame() {
        let mut engine = engine();
        engine.on_position(point(SF_LAT, SF_LON));
        engine.on_heading(HeadingReading::Degrees { degrees: 0.0 });

        let frame = engine
            .set_markers(vec![marker("a", SF_LAT + 0.001, SF_LON)])
            .expect("frame should be recomputed");
        assert_eq!(frame.markers.len(), 1);

        // Wholesale replacement: previous candidates are gone
        let frame = engine
            .set_markers(vec![marker("b", SF_LAT + 0.002, SF_LON)])
            .expect("frame should be recomputed");
        assert_eq!(frame.markers.len(), 1);
        assert_eq!(frame.markers[0].marker.id, "b");
    }

    #[test]
    fn test_stale_frame_survives_missing_inputs() {
        let mut engine = engine();
        engine.set_markers(vec![marker("a", SF_LAT + 0.001, SF_LON)]);
        engine.on_position(point(SF_LAT, SF_LON));
        engine.on_heading(HeadingReading::Degrees { degrees: 0.0 });
        assert!(engine.frame().is_some());

        let before = engine.frame().cloned();

        // A marker refresh alone cannot invalidate the position/heading;
        // the frame is recomputed from the same inputs
        engine.set_markers(Vec::new());
        let after = engine.frame().cloned().unwrap();
        assert_eq!(after.position, before.unwrap().position);
        assert!(after.markers.is_empty());
    }

    #[test]
    fn test_recomputation_idempotent() {
        let mut engine = engine();
        engine.set_markers(vec![
            marker("a", SF_LAT + 0.001, SF_LON),
            marker("b", SF_LAT, SF_LON + 0.0001),
        ]);
        engine.on_position(point(SF_LAT, SF_LON));

        let first = engine
            .on_heading(HeadingReading::Degrees { degrees: 42.0 })
            .cloned()
            .unwrap();
        let second = engine
            .on_heading(HeadingReading::Degrees { degrees: 42.0 })
            .cloned()
            .unwrap();

        assert_eq!(first, second);
    }
}
