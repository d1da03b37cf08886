//! Device heading tracking.
//!
//! Two cooperating pieces:
//!
//! - [`HeadingTracker`] — converts push-based compass/magnetometer readings
//!   into a normalized heading in [0, 360). Each sample overwrites the
//!   current heading; an optional exponential filter is available.
//! - [`PositionHistory`] — bounded history of recent position samples used
//!   to derive a movement-based heading when no compass reading has arrived.
//!
//! Both are driven entirely by their callers; neither polls a sensor.

mod history;
mod tracker;

pub use history::{PositionHistory, PositionHistoryConfig, PositionSample};
pub use tracker::{HeadingReading, HeadingSample, HeadingSmoothing, HeadingTracker};
