//! Provider traits and shared wrapper for overlay output.
//!
//! The public interface for consumers of projected frames:
//!
//! - [`OverlayProvider`] - Query API (pull)
//! - [`OverlayBroadcaster`] - Subscription API (push)
//! - [`SharedOverlay`] - Thread-safe wrapper combining both

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::classify::MarkerPartition;
use crate::projection::ProjectedMarker;

use super::engine::OverlayFrame;

/// Default capacity of the frame broadcast channel.
const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// Trait for querying the current overlay frame (pull API).
///
/// Pull access always sees the most recently computed frame, regardless of
/// broadcast rate limiting.
pub trait OverlayProvider: Send + Sync {
    /// The last computed frame, if any.
    fn frame(&self) -> Option<OverlayFrame>;

    /// The near-strip view of the current frame (sorted by distance).
    fn near_markers(&self) -> Vec<ProjectedMarker>;

    /// The AR overlay view of the current frame.
    fn visible_markers(&self) -> Vec<ProjectedMarker>;

    /// True once at least one frame has been computed.
    fn has_frame(&self) -> bool;
}

/// Trait for subscribing to frame updates (push API).
pub trait OverlayBroadcaster: Send + Sync {
    /// Subscribe to frame updates.
    fn subscribe(&self) -> broadcast::Receiver<OverlayFrame>;
}

struct SharedOverlayState {
    /// Last computed frame (pull side).
    frame: RwLock<Option<OverlayFrame>>,
    /// Broadcast channel for frame updates (push side).
    frame_tx: broadcast::Sender<OverlayFrame>,
}

/// Shared overlay output - thread-safe handle for renderers and other
/// consumers.
///
/// Combines [`OverlayProvider`] and [`OverlayBroadcaster`] into a single
/// cloneable handle. The session task publishes into it; any number of
/// consumers read from it.
#[derive(Clone)]
pub struct SharedOverlay {
    inner: Arc<SharedOverlayState>,
}

impl Default for SharedOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedOverlay {
    /// Create a shared overlay with default broadcast capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create a shared overlay with a custom broadcast capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (frame_tx, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(SharedOverlayState {
                frame: RwLock::new(None),
                frame_tx,
            }),
        }
    }

    /// Store a frame for pull access without broadcasting it.
    pub(crate) fn store(&self, frame: OverlayFrame) {
        *self.inner.frame.write().unwrap() = Some(frame);
    }

    /// Store and broadcast a frame.
    pub(crate) fn publish(&self, frame: OverlayFrame) {
        self.store(frame.clone());
        // A send error only means no subscriber is currently listening
        let _ = self.inner.frame_tx.send(frame);
    }
}

impl OverlayProvider for SharedOverlay {
    fn frame(&self) -> Option<OverlayFrame> {
        self.inner.frame.read().unwrap().clone()
    }

    fn near_markers(&self) -> Vec<ProjectedMarker> {
        match self.frame() {
            Some(frame) => MarkerPartition::partition(&frame.markers).near,
            None => Vec::new(),
        }
    }

    fn visible_markers(&self) -> Vec<ProjectedMarker> {
        match self.frame() {
            Some(frame) => MarkerPartition::partition(&frame.markers).visible,
            None => Vec::new(),
        }
    }

    fn has_frame(&self) -> bool {
        self.inner.frame.read().unwrap().is_some()
    }
}

impl OverlayBroadcaster for SharedOverlay {
    fn subscribe(&self) -> broadcast::Receiver<OverlayFrame> {
        self.inner.frame_tx.subscribe()
    }
}

// Allow Arc<SharedOverlay> to be used directly as provider/broadcaster
impl OverlayProvider for Arc<SharedOverlay> {
    fn frame(&self) -> Option<OverlayFrame> {
        (**self).frame()
    }

    fn near_markers(&self) -> Vec<ProjectedMarker> {
        (**self).near_markers()
    }

    fn visible_markers(&self) -> Vec<ProjectedMarker> {
        (**self).visible_markers()
    }

    fn has_frame(&self) -> bool {
        (**self).has_frame()
    }
}

impl OverlayBroadcaster for Arc<SharedOverlay> {
    fn subscribe(&self) -> broadcast::Receiver<OverlayFrame> {
        (**self).subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::GeoPoint;
    use crate::media::{MediaMarker, MediaRef};
    use crate::projection::Classification;

    fn test_frame() -> OverlayFrame {
        let position = GeoPoint::new(37.7749, -122.4194).unwrap();
        let marker = MediaMarker::new("a", position, MediaRef::new("asset://a"));
        OverlayFrame {
            position,
            heading_degrees: 0.0,
            markers: vec![
                crate::projection::ProjectedMarker {
                    marker: marker.clone(),
                    distance_meters: 10.0,
                    bearing_degrees: 0.0,
                    angular_offset_degrees: 0.0,
                    screen_x: 0.0,
                    screen_y: 0.0,
                    scale: 1.0,
                    classification: Classification::Near,
                },
                crate::projection::ProjectedMarker {
                    marker,
                    distance_meters: 100.0,
                    bearing_degrees: 0.0,
                    angular_offset_degrees: 0.0,
                    screen_x: 480.0,
                    screen_y: 960.0,
                    scale: 0.4,
                    classification: Classification::FarVisible,
                },
            ],
        }
    }

    #[test]
    fn test_empty_shared_overlay() {
        let shared = SharedOverlay::new();

        assert!(!shared.has_frame());
        assert!(shared.frame().is_none());
        assert!(shared.near_markers().is_empty());
        assert!(shared.visible_markers().is_empty());
    }

    #[test]
    fn test_publish_updates_pull_side() {
        let shared = SharedOverlay::new();
        shared.publish(test_frame());

        assert!(shared.has_frame());
        assert_eq!(shared.near_markers().len(), 1);
        assert_eq!(shared.visible_markers().len(), 1);
    }

    #[test]
    fn test_publish_reaches_subscribers() {
        let shared = SharedOverlay::new();
        let mut rx = shared.subscribe();

        shared.publish(test_frame());

        let received = rx.try_recv().expect("Should receive broadcast");
        assert_eq!(received.markers.len(), 2);
    }

    #[test]
    fn test_store_skips_broadcast() {
        let shared = SharedOverlay::new();
        let mut rx = shared.subscribe();

        shared.store(test_frame());

        assert!(shared.has_frame());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let shared = SharedOverlay::new();
        shared.publish(test_frame());
        assert!(shared.has_frame());
    }

    #[test]
    fn test_arc_wrapped() {
        let shared = Arc::new(SharedOverlay::new());
        shared.publish(test_frame());

        assert!(OverlayProvider::has_frame(&shared));
        assert_eq!(OverlayProvider::visible_markers(&shared).len(), 1);
    }
}
