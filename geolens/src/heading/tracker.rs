//! Compass heading tracker.
//!
//! Consumes raw 2-axis magnetic-field vectors or platform-resolved headings
//! and produces a normalized heading in [0, 360). Sampling is push-based:
//! the sensor subscription calls [`HeadingTracker::ingest`] and the new
//! sample immediately becomes the current heading. The tracker never polls.

use crate::geodesy::normalize_degrees;

/// A single heading-capable sensor reading, as delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingReading {
    /// Raw 2-axis magnetic field vector.
    Vector { x: f64, y: f64 },
    /// Heading already resolved to degrees by the platform sensor stack.
    Degrees { degrees: f64 },
}

/// A normalized heading sample in [0, 360) degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingSample {
    /// Heading in degrees, 0 = magnetic north, clockwise.
    pub degrees: f64,
}

/// Smoothing applied to incoming heading samples.
///
/// The default is no smoothing: every sample overwrites the current
/// heading. The exponential filter blends on the unit circle (sin/cos
/// components) so the 0/360 seam does not bias the result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HeadingSmoothing {
    /// Every sample overwrites the current heading.
    #[default]
    None,
    /// Exponential blend: `alpha` is the weight of the new sample, in
    /// (0, 1]. `alpha = 1.0` behaves like `None`.
    Exponential { alpha: f64 },
}

/// Converts a stream of heading readings into the current device heading.
///
/// # Axis convention
///
/// Raw vector input maps to a heading via `atan2(x, y)` — the argument
/// order (x before y) is intentional and aligns magnetic "up" on the
/// sensor's y axis with 0°. A zero vector yields 0° deterministically.
#[derive(Debug)]
pub struct HeadingTracker {
    smoothing: HeadingSmoothing,
    current: Option<f64>,
}

impl Default for HeadingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingTracker {
    /// Create a tracker with no smoothing (each sample overwrites).
    pub fn new() -> Self {
        Self::with_smoothing(HeadingSmoothing::None)
    }

    /// Create a tracker with the given smoothing behavior.
    pub fn with_smoothing(smoothing: HeadingSmoothing) -> Self {
        Self {
            smoothing,
            current: None,
        }
    }

    /// Ingest a sensor reading and return the resulting heading sample.
    pub fn ingest(&mut self, reading: HeadingReading) -> HeadingSample {
        let raw = match reading {
            HeadingReading::Vector { x, y } => normalize_degrees(x.atan2(y).to_degrees()),
            HeadingReading::Degrees { degrees } => normalize_degrees(degrees),
        };

        let degrees = match (self.smoothing, self.current) {
            (HeadingSmoothing::Exponential { alpha }, Some(previous)) => {
                blend_on_circle(previous, raw, alpha)
            }
            // First sample, or no smoothing configured
            _ => raw,
        };

        self.current = Some(degrees);
        HeadingSample { degrees }
    }

    /// The current heading, or `None` before the first sample.
    pub fn current(&self) -> Option<HeadingSample> {
        self.current.map(|degrees| HeadingSample { degrees })
    }

    /// Discard the current heading (e.g. on sensor re-subscription).
    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Blend two headings on the unit circle.
///
/// Interpolating raw degree values breaks at the 0/360 seam (359° and 1°
/// would average to 180°); blending the sin/cos components does not.
fn blend_on_circle(previous: f64, new: f64, alpha: f64) -> f64 {
    let prev_rad = previous.to_radians();
    let new_rad = new.to_radians();

    let sin = alpha * new_rad.sin() + (1.0 - alpha) * prev_rad.sin();
    let cos = alpha * new_rad.cos() + (1.0 - alpha) * prev_rad.cos();

    normalize_degrees(sin.atan2(cos).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_heading_before_first_sample() {
        let tracker = HeadingTracker::new();
        assert!(tracker.current().is_none());
    }

    #[test]
    fn test_resolved_reading_is_normalized() {
        let mut tracker = HeadingTracker::new();

        let sample = tracker.ingest(HeadingReading::Degrees { degrees: -10.0 });
        assert_eq!(sample.degrees, 350.0);

        let sample = tracker.ingest(HeadingReading::Degrees { degrees: 370.0 });
        assert_eq!(sample.degrees, 10.0);
    }

    #[test]
    fn test_vector_reading_cardinal_directions() {
        let mut tracker = HeadingTracker::new();

        // Field along +y: magnetic north ahead
        let north = tracker.ingest(HeadingReading::Vector { x: 0.0, y: 1.0 });
        assert!((north.degrees - 0.0).abs() < 0.1);

        // Field along +x: facing east
        let east = tracker.ingest(HeadingReading::Vector { x: 1.0, y: 0.0 });
        assert!((east.degrees - 90.0).abs() < 0.1);

        // Field along -y: facing south
        let south = tracker.ingest(HeadingReading::Vector { x: 0.0, y: -1.0 });
        assert!((south.degrees - 180.0).abs() < 0.1);

        // Field along -x: facing west
        let west = tracker.ingest(HeadingReading::Vector { x: -1.0, y: 0.0 });
        assert!((west.degrees - 270.0).abs() < 0.1);
    }

    #[test]
    fn test_zero_vector_is_deterministic() {
        let mut tracker = HeadingTracker::new();
        let sample = tracker.ingest(HeadingReading::Vector { x: 0.0, y: 0.0 });
        assert_eq!(sample.degrees, 0.0);
    }

    #[test]
    fn test_each_sample_overwrites_without_smoothing() {
        let mut tracker = HeadingTracker::new();

        tracker.ingest(HeadingReading::Degrees { degrees: 10.0 });
        tracker.ingest(HeadingReading::Degrees { degrees: 200.0 });

        assert_eq!(tracker.current().unwrap().degrees, 200.0);
    }

    #[test]
    fn test_exponential_smoothing_blends() {
        let mut tracker =
            HeadingTracker::with_smoothing(HeadingSmoothing::Exponential { alpha: 0.5 });

        tracker.ingest(HeadingReading::Degrees { degrees: 0.0 });
        let sample = tracker.ingest(HeadingReading::Degrees { degrees: 90.0 });

        assert!(
            (sample.degrees - 45.0).abs() < 0.1,
            "Expected ~45°, got {}°",
            sample.degrees
        );
    }

    #[test]
    fn test_exponential_smoothing_across_north_seam() {
        let mut tracker =
            HeadingTracker::with_smoothing(HeadingSmoothing::Exponential { alpha: 0.5 });

        tracker.ingest(HeadingReading::Degrees { degrees: 350.0 });
        let sample = tracker.ingest(HeadingReading::Degrees { degrees: 10.0 });

        // Midpoint of 350° and 10° is 0°, not 180°
        let distance_from_north = sample.degrees.min(360.0 - sample.degrees);
        assert!(
            distance_from_north < 0.1,
            "Expected ~0°, got {}°",
            sample.degrees
        );
    }

    #[test]
    fn test_smoothing_first_sample_unfiltered() {
        let mut tracker =
            HeadingTracker::with_smoothing(HeadingSmoothing::Exponential { alpha: 0.2 });

        let sample = tracker.ingest(HeadingReading::Degrees { degrees: 123.0 });
        assert_eq!(sample.degrees, 123.0);
    }

    #[test]
    fn test_reset_clears_heading() {
        let mut tracker = HeadingTracker::new();
        tracker.ingest(HeadingReading::Degrees { degrees: 45.0 });

        tracker.reset();
        assert!(tracker.current().is_none());
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_ingest_always_in_range(degrees in -10_000.0..10_000.0_f64) {
                let mut tracker = HeadingTracker::new();
                let sample = tracker.ingest(HeadingReading::Degrees { degrees });

                prop_assert!(
                    (0.0..360.0).contains(&sample.degrees),
                    "heading {} out of [0, 360)",
                    sample.degrees
                );
            }

            #[test]
            fn test_vector_ingest_always_in_range(
                x in -100.0..100.0_f64,
                y in -100.0..100.0_f64
            ) {
                let mut tracker = HeadingTracker::new();
                let sample = tracker.ingest(HeadingReading::Vector { x, y });

                prop_assert!(
                    (0.0..360.0).contains(&sample.degrees),
                    "heading {} out of [0, 360)",
                    sample.degrees
                );
            }

            #[test]
            fn test_smoothed_ingest_always_in_range(
                first in 0.0..360.0_f64,
                second in 0.0..360.0_f64,
                alpha in 0.01..1.0_f64
            ) {
                let mut tracker =
                    HeadingTracker::with_smoothing(HeadingSmoothing::Exponential { alpha });
                tracker.ingest(HeadingReading::Degrees { degrees: first });
                let sample = tracker.ingest(HeadingReading::Degrees { degrees: second });

                prop_assert!(
                    (0.0..360.0).contains(&sample.degrees),
                    "heading {} out of [0, 360)",
                    sample.degrees
                );
            }
        }
    }
}
