//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geolens::geodesy::GeodesyError;

use crate::scenario::ScenarioError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to load a scenario or marker file
    Scenario(ScenarioError),
    /// Invalid coordinate argument
    InvalidCoordinate(GeodesyError),
    /// Failed to serialize frame output
    Serialize(serde_json::Error),
    /// Failed to build the async runtime or install the signal handler
    Runtime(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Scenario(ScenarioError::Parse { .. }) => {
                eprintln!();
                eprintln!("Scenario files are JSON. Expected shape:");
                eprintln!("  {{");
                eprintln!("    \"markers\": [{{\"id\": \"...\", \"media\": \"asset://...\",");
                eprintln!("                 \"location\": {{\"latitude\": 0.0, \"longitude\": 0.0}}}}],");
                eprintln!("    \"steps\":   [{{\"kind\": \"position\", \"latitude\": 0.0,");
                eprintln!("                 \"longitude\": 0.0, \"wait_ms\": 500}}]");
                eprintln!("  }}");
            }
            CliError::InvalidCoordinate(_) => {
                eprintln!();
                eprintln!("Latitude must be in [-90, 90], longitude in [-180, 180].");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Scenario(e) => write!(f, "{}", e),
            CliError::InvalidCoordinate(e) => write!(f, "{}", e),
            CliError::Serialize(e) => write!(f, "Failed to serialize output: {}", e),
            CliError::Runtime(msg) => write!(f, "{}", msg),
        }
    }
}
