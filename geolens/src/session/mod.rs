//! Overlay session - event-driven recomputation over sensor streams.
//!
//! Two independent push streams drive the overlay: position updates from
//! the platform location service and heading updates from the orientation
//! sensor. A third channel carries wholesale candidate-set refreshes from
//! the media source. The session consumes all three in a single task,
//! recomputes the full projected frame on every input, and exposes the
//! result to consumers both by pull and by subscription.
//!
//! # Components
//!
//! - [`engine`] - `OverlayEngine`, the synchronous recomputation core
//! - [`task`] - `OverlaySession`, the cancellable event-loop task
//! - [`provider`] - `OverlayProvider`/`OverlayBroadcaster` traits and the
//!   `SharedOverlay` handle
//!
//! # Example
//!
//! ```ignore
//! use geolens::projection::ProjectionConfig;
//! use geolens::session::{OverlayEngine, OverlaySession};
//!
//! let engine = OverlayEngine::new(ProjectionConfig::default());
//! let session = OverlaySession::new(engine);
//! let shared = session.shared();
//!
//! let handle = session.spawn(position_rx, heading_rx, marker_rx, cancel.clone());
//!
//! let mut frames = shared.subscribe();
//! while let Ok(frame) = frames.recv().await {
//!     // hand frame.markers to the renderer
//! }
//! ```

mod engine;
mod provider;
mod task;

pub use engine::{OverlayEngine, OverlayFrame};
pub use provider::{OverlayBroadcaster, OverlayProvider, SharedOverlay};
pub use task::{OverlaySession, OverlaySessionConfig};
