//! Scenario and marker files.
//!
//! Both commands read their inputs from JSON files: `project` takes a bare
//! array of media items, `simulate` takes a full scenario with timed sensor
//! steps.

use std::fmt;
use std::fs;

use serde::Deserialize;

use geolens::media::MediaItem;

/// A playback scenario: a marker set plus timed sensor samples.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Media items available to the session (untagged items are filtered
    /// out before projection).
    pub markers: Vec<MediaItem>,

    /// Sensor steps, applied in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A single timed sensor step.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// A location-provider update.
    Position {
        latitude: f64,
        longitude: f64,
        /// Delay before this step, in milliseconds.
        #[serde(default)]
        wait_ms: u64,
    },
    /// A resolved compass heading update.
    Heading {
        degrees: f64,
        #[serde(default)]
        wait_ms: u64,
    },
    /// A raw 2-axis magnetometer reading.
    Magnetic {
        x: f64,
        y: f64,
        #[serde(default)]
        wait_ms: u64,
    },
}

impl Step {
    /// Delay before this step.
    pub fn wait_ms(&self) -> u64 {
        match self {
            Step::Position { wait_ms, .. }
            | Step::Heading { wait_ms, .. }
            | Step::Magnetic { wait_ms, .. } => *wait_ms,
        }
    }
}

/// Errors from loading scenario or marker files.
#[derive(Debug)]
pub enum ScenarioError {
    /// The file could not be read.
    Read {
        path: String,
        error: std::io::Error,
    },
    /// The file is not valid JSON of the expected shape.
    Parse {
        path: String,
        error: serde_json::Error,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Read { path, error } => {
                write!(f, "Failed to read '{}': {}", path, error)
            }
            ScenarioError::Parse { path, error } => {
                write!(f, "Failed to parse '{}': {}", path, error)
            }
        }
    }
}

/// Load a full scenario file.
pub fn load_scenario(path: &str) -> Result<Scenario, ScenarioError> {
    let text = fs::read_to_string(path).map_err(|error| ScenarioError::Read {
        path: path.to_string(),
        error,
    })?;
    serde_json::from_str(&text).map_err(|error| ScenarioError::Parse {
        path: path.to_string(),
        error,
    })
}

/// Load a bare marker file (a JSON array of media items).
pub fn load_markers(path: &str) -> Result<Vec<MediaItem>, ScenarioError> {
    let text = fs::read_to_string(path).map_err(|error| ScenarioError::Read {
        path: path.to_string(),
        error,
    })?;
    serde_json::from_str(&text).map_err(|error| ScenarioError::Parse {
        path: path.to_string(),
        error,
    })
}
