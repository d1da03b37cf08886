//! Position history and movement-derived heading.
//!
//! Maintains a short history of recent position samples so a heading can be
//! derived from movement when no compass reading is available (e.g. compass
//! permission denied, or before the first sensor callback fires).
//!
//! # Design
//!
//! - Stores the last few samples at a rate-limited cadence
//! - Derived heading is the great-circle bearing from oldest to newest
//! - Returns nothing when the device has not moved far enough for the
//!   bearing to be meaningful

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::geodesy::{self, GeoPoint};

/// Default maximum samples to retain (10 seconds at 1Hz).
const DEFAULT_MAX_SAMPLES: usize = 10;

/// Default minimum interval between samples.
const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Minimum displacement (meters) to derive a reliable heading.
/// Below walking-pace displacement the bearing is dominated by GPS noise.
const DEFAULT_MIN_DISPLACEMENT_M: f64 = 2.0;

/// A single position sample in the history.
#[derive(Debug, Clone, Copy)]
pub struct PositionSample {
    /// Where the device was.
    pub position: GeoPoint,
    /// When this sample was recorded.
    pub timestamp: Instant,
}

impl PositionSample {
    /// Create a new position sample stamped now.
    pub fn new(position: GeoPoint) -> Self {
        Self {
            position,
            timestamp: Instant::now(),
        }
    }

    /// Create a position sample with explicit timestamp (for testing).
    pub fn with_timestamp(position: GeoPoint, timestamp: Instant) -> Self {
        Self {
            position,
            timestamp,
        }
    }
}

/// Configuration for position history.
#[derive(Debug, Clone)]
pub struct PositionHistoryConfig {
    /// Maximum samples to retain.
    pub max_samples: usize,
    /// Minimum interval between samples.
    pub sample_interval: Duration,
    /// Minimum displacement for heading derivation, in meters.
    pub min_displacement_meters: f64,
}

impl Default for PositionHistoryConfig {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            min_displacement_meters: DEFAULT_MIN_DISPLACEMENT_M,
        }
    }
}

/// Bounded history of recent positions for heading derivation.
#[derive(Debug)]
pub struct PositionHistory {
    /// Recent samples (oldest first).
    samples: VecDeque<PositionSample>,
    /// Configuration.
    config: PositionHistoryConfig,
    /// Last sample time (for rate limiting).
    last_sample_time: Option<Instant>,
}

impl Default for PositionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionHistory {
    /// Create a new history with default configuration.
    pub fn new() -> Self {
        Self::with_config(PositionHistoryConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: PositionHistoryConfig) -> Self {
        Self {
            samples: VecDeque::with_capacity(config.max_samples),
            config,
            last_sample_time: None,
        }
    }

    /// Record a new position sample.
    ///
    /// Respects the sample interval - samples arriving too quickly are
    /// ignored. Returns true if the sample was recorded.
    pub fn record(&mut self, position: GeoPoint) -> bool {
        let now = Instant::now();

        if let Some(last) = self.last_sample_time {
            if now.duration_since(last) < self.config.sample_interval {
                return false;
            }
        }

        self.samples.push_back(PositionSample::new(position));
        self.last_sample_time = Some(now);

        while self.samples.len() > self.config.max_samples {
            self.samples.pop_front();
        }

        true
    }

    /// Record a position sample with explicit timestamp (for testing).
    #[cfg(test)]
    pub fn record_at(&mut self, position: GeoPoint, timestamp: Instant) {
        self.samples
            .push_back(PositionSample::with_timestamp(position, timestamp));

        while self.samples.len() > self.config.max_samples {
            self.samples.pop_front();
        }
    }

    /// Derive a heading from the movement between the oldest and newest
    /// sample.
    ///
    /// Returns `None` when:
    /// - fewer than 2 samples are recorded
    /// - the displacement is below the configured minimum
    ///
    /// The heading is in degrees [0, 360), 0 = north, 90 = east.
    pub fn derive_heading(&self) -> Option<f64> {
        if self.samples.len() < 2 {
            return None;
        }

        let oldest = self.samples.front()?;
        let newest = self.samples.back()?;

        let displacement = geodesy::distance(&oldest.position, &newest.position);
        if displacement < self.config.min_displacement_meters {
            return None; // Too close, bearing would be noise
        }

        Some(geodesy::bearing(&oldest.position, &newest.position))
    }

    /// Number of samples in history.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// The most recent position, if any.
    pub fn latest(&self) -> Option<GeoPoint> {
        self.samples.back().map(|s| s.position)
    }

    /// Clear all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.last_sample_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_empty_history() {
        let history = PositionHistory::new();
        assert_eq!(history.sample_count(), 0);
        assert!(history.latest().is_none());
        assert!(history.derive_heading().is_none());
    }

    #[test]
    fn test_record_and_latest() {
        let mut history = PositionHistory::with_config(PositionHistoryConfig {
            sample_interval: Duration::from_millis(1),
            ..Default::default()
        });

        assert!(history.record(point(53.5, 10.0)));
        assert_eq!(history.sample_count(), 1);

        let latest = history.latest().unwrap();
        assert_eq!(latest.latitude, 53.5);
    }

    #[test]
    fn test_rate_limiting() {
        let mut history = PositionHistory::with_config(PositionHistoryConfig {
            sample_interval: Duration::from_millis(100),
            ..Default::default()
        });

        assert!(history.record(point(53.5, 10.0)));

        // Immediate second sample rejected (rate limited)
        assert!(!history.record(point(53.6, 10.1)));
        assert_eq!(history.sample_count(), 1);

        std::thread::sleep(Duration::from_millis(110));
        assert!(history.record(point(53.6, 10.1)));
        assert_eq!(history.sample_count(), 2);
    }

    #[test]
    fn test_max_samples_trim() {
        let mut history = PositionHistory::with_config(PositionHistoryConfig {
            max_samples: 3,
            sample_interval: Duration::from_millis(1),
            ..Default::default()
        });

        let base = Instant::now();
        for i in 0..6 {
            history.record_at(
                point(53.0 + i as f64 * 0.01, 10.0),
                base + Duration::from_secs(i),
            );
        }

        assert_eq!(history.sample_count(), 3);
        // Oldest remaining should be sample 3
        assert!((history.samples.front().unwrap().position.latitude - 53.03).abs() < 1e-9);
    }

    #[test]
    fn test_derive_heading_north() {
        let mut history = PositionHistory::new();

        let base = Instant::now();
        history.record_at(point(53.0, 10.0), base);
        history.record_at(point(53.001, 10.0), base + Duration::from_secs(5));

        let heading = history.derive_heading().unwrap();
        assert!((heading - 0.0).abs() < 1.0, "Expected ~0°, got {}°", heading);
    }

    #[test]
    fn test_derive_heading_east() {
        let mut history = PositionHistory::new();

        let base = Instant::now();
        history.record_at(point(0.0, 10.0), base);
        history.record_at(point(0.0, 10.001), base + Duration::from_secs(5));

        let heading = history.derive_heading().unwrap();
        assert!(
            (heading - 90.0).abs() < 1.0,
            "Expected ~90°, got {}°",
            heading
        );
    }

    #[test]
    fn test_derive_heading_stationary() {
        let mut history = PositionHistory::new();

        let base = Instant::now();
        history.record_at(point(53.0, 10.0), base);
        history.record_at(point(53.0, 10.0), base + Duration::from_secs(5));

        // No movement - no derivable heading
        assert!(history.derive_heading().is_none());
    }

    #[test]
    fn test_derive_heading_below_minimum_displacement() {
        let mut history = PositionHistory::with_config(PositionHistoryConfig {
            min_displacement_meters: 50.0,
            ..Default::default()
        });

        let base = Instant::now();
        // ~11 m of northward movement, below the 50 m minimum
        history.record_at(point(53.0, 10.0), base);
        history.record_at(point(53.0001, 10.0), base + Duration::from_secs(5));

        assert!(history.derive_heading().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = PositionHistory::new();

        let base = Instant::now();
        history.record_at(point(53.0, 10.0), base);
        history.record_at(point(53.1, 10.0), base + Duration::from_secs(1));
        assert_eq!(history.sample_count(), 2);

        history.clear();
        assert_eq!(history.sample_count(), 0);
        assert!(history.last_sample_time.is_none());
    }
}
