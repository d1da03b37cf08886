//! Overlay session task.
//!
//! Bridges the external subscription streams (position, heading, marker
//! refresh) to the single-threaded [`OverlayEngine`]. Each incoming sample
//! is handled to completion before the next is processed - there is no
//! overlapping recomputation - and every new frame is made available
//! through a [`SharedOverlay`] handle.
//!
//! Cancellation uses a [`CancellationToken`]: when the AR view goes away
//! the caller cancels the token and the task stops consuming sensor
//! updates. The session also stops on its own once all input channels are
//! closed.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::geodesy::GeoPoint;
use crate::heading::HeadingReading;
use crate::media::MediaMarker;

use super::engine::{OverlayEngine, OverlayFrame};
use super::provider::SharedOverlay;

/// Configuration for the overlay session.
#[derive(Debug, Clone)]
pub struct OverlaySessionConfig {
    /// Minimum interval between frame broadcasts.
    ///
    /// Pull access through [`SharedOverlay`] always sees the newest frame;
    /// the rate limit only protects push subscribers from being flooded at
    /// raw sensor cadence.
    pub min_broadcast_interval: Duration,
}

impl Default for OverlaySessionConfig {
    fn default() -> Self {
        Self {
            min_broadcast_interval: Duration::from_millis(100),
        }
    }
}

/// Event-driven overlay session.
///
/// # Example
///
/// ```ignore
/// let engine = OverlayEngine::new(ProjectionConfig::default());
/// let session = OverlaySession::new(engine);
/// let shared = session.shared();
/// let cancel = CancellationToken::new();
///
/// let handle = session.spawn(position_rx, heading_rx, marker_rx, cancel.clone());
///
/// // ... later, when the AR view disappears:
/// cancel.cancel();
/// handle.await?;
/// ```
pub struct OverlaySession {
    engine: OverlayEngine,
    shared: SharedOverlay,
    config: OverlaySessionConfig,
}

impl OverlaySession {
    /// Create a session with default configuration.
    pub fn new(engine: OverlayEngine) -> Self {
        Self::with_config(engine, OverlaySessionConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(engine: OverlayEngine, config: OverlaySessionConfig) -> Self {
        Self {
            engine,
            shared: SharedOverlay::new(),
            config,
        }
    }

    /// A cloneable handle to the session's output.
    pub fn shared(&self) -> SharedOverlay {
        self.shared.clone()
    }

    /// Start the session task.
    ///
    /// Consumes the session; the returned handle completes when the token
    /// is cancelled or all three input channels are closed.
    pub fn spawn(
        self,
        position_rx: mpsc::Receiver<GeoPoint>,
        heading_rx: mpsc::Receiver<HeadingReading>,
        marker_rx: mpsc::Receiver<Vec<MediaMarker>>,
        cancel: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(position_rx, heading_rx, marker_rx, cancel))
    }

    /// Run the session event loop.
    async fn run(
        mut self,
        mut position_rx: mpsc::Receiver<GeoPoint>,
        mut heading_rx: mpsc::Receiver<HeadingReading>,
        mut marker_rx: mpsc::Receiver<Vec<MediaMarker>>,
        cancel: CancellationToken,
    ) {
        info!("Overlay session started");

        let mut last_broadcast: Option<Instant> = None;
        let mut positions_received: u64 = 0;
        let mut headings_received: u64 = 0;
        let mut frames_computed: u64 = 0;

        let mut position_open = true;
        let mut heading_open = true;
        let mut markers_open = true;

        loop {
            if !position_open && !heading_open && !markers_open {
                debug!("All input channels closed, stopping session");
                break;
            }

            // Most-recent-sample-wins: each arm handles exactly one sample
            // synchronously; no internal queueing beyond the channels.
            let frame = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Overlay session cancelled");
                    break;
                }
                maybe = position_rx.recv(), if position_open => match maybe {
                    Some(position) => {
                        positions_received += 1;
                        self.engine.on_position(position).cloned()
                    }
                    None => {
                        position_open = false;
                        None
                    }
                },
                maybe = heading_rx.recv(), if heading_open => match maybe {
                    Some(reading) => {
                        headings_received += 1;
                        self.engine.on_heading(reading).cloned()
                    }
                    None => {
                        heading_open = false;
                        None
                    }
                },
                maybe = marker_rx.recv(), if markers_open => match maybe {
                    Some(markers) => {
                        debug!(count = markers.len(), "Candidate set refreshed");
                        self.engine.set_markers(markers).cloned()
                    }
                    None => {
                        markers_open = false;
                        None
                    }
                },
            };

            if let Some(frame) = frame {
                frames_computed += 1;
                self.emit(frame, &mut last_broadcast);
            }
        }

        info!(
            positions_received,
            headings_received, frames_computed, "Overlay session stopped"
        );
    }

    /// Make a new frame available, broadcasting when the rate limit allows.
    fn emit(&self, frame: OverlayFrame, last_broadcast: &mut Option<Instant>) {
        let now = Instant::now();
        let due = last_broadcast
            .map(|t| now.duration_since(t) >= self.config.min_broadcast_interval)
            .unwrap_or(true);

        if due {
            self.shared.publish(frame);
            *last_broadcast = Some(now);
        } else {
            // Pull side stays fresh even when the broadcast is suppressed
            self.shared.store(frame);
        }
    }
}
