//! GeoLens - AR projection of geotagged media onto a live camera view.
//!
//! This library computes where markers for nearby captured memories belong
//! on a 2D camera viewport, given the device's position and heading: it is
//! the projection and marker-selection engine of an AR photo overlay.
//!
//! # Pipeline
//!
//! ```text
//! media source → geodesy → projection engine → marker classifier → renderer
//!                  ↑               ↑
//!          position updates   heading updates
//! ```
//!
//! # High-Level API
//!
//! For most use cases the [`session`] module provides the event-driven
//! entry point:
//!
//! ```ignore
//! use geolens::projection::ProjectionConfig;
//! use geolens::session::{OverlayEngine, OverlaySession};
//!
//! let engine = OverlayEngine::new(ProjectionConfig::for_viewport(1080.0, 1920.0));
//! let session = OverlaySession::new(engine);
//! let shared = session.shared();
//!
//! let handle = session.spawn(position_rx, heading_rx, marker_rx, cancel.clone());
//! ```
//!
//! For one-shot use, [`projection::ProjectionEngine::project`] is a pure
//! function of position, heading, and the candidate set.

pub mod classify;
pub mod geodesy;
pub mod heading;
pub mod logging;
pub mod media;
pub mod projection;
pub mod session;

/// Version of the GeoLens library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_geodesy_module_exists() {
        // Verify geodesy module is accessible
        use crate::geodesy::GeoPoint;
        let result = GeoPoint::new(40.7128, -74.0060);
        assert!(result.is_ok());
    }
}
