//! Media boundary types.
//!
//! The engine never fetches, decodes, or caches media itself - it consumes a
//! read-only snapshot of geotagged candidates supplied by an external media
//! source (photo library, asset store) on that source's own cadence.
//!
//! This module defines the contract: [`MediaItem`] is what the source
//! yields, [`MediaMarker`] is a projectable candidate (items without
//! location metadata never become markers), [`MediaSource`] is the snapshot
//! trait, and [`MarkerCatalog`] is the lazy id→marker lookup cache that
//! lives on the media-source side of the boundary.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::geodesy::GeoPoint;

/// Opaque handle to image or thumbnail data (a URI or platform asset id).
///
/// The projection core passes this through untouched; only the overlay
/// renderer ever dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaRef(String);

impl MediaRef {
    /// Create a new media handle.
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// The underlying URI or asset id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A media item as delivered by the external media source.
///
/// Location metadata is optional at this stage: many library items carry no
/// geotag, and those are simply never candidates for projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Unique media identifier.
    pub id: String,
    /// Handle to the image/thumbnail data.
    pub media: MediaRef,
    /// Capture location, if the item is geotagged.
    pub location: Option<GeoPoint>,
}

impl MediaItem {
    /// Convert into a projectable marker.
    ///
    /// Returns `None` when the item has no location metadata - this is the
    /// "not geotagged" case, not an error.
    pub fn into_marker(self) -> Option<MediaMarker> {
        let location = self.location?;
        Some(MediaMarker {
            id: self.id,
            location,
            media: self.media,
        })
    }
}

/// A geotagged media candidate for projection.
///
/// Immutable once constructed; the candidate set is replaced wholesale when
/// the media source refreshes, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMarker {
    /// Unique media identifier.
    pub id: String,
    /// Where the media was captured.
    pub location: GeoPoint,
    /// Handle to the image/thumbnail data.
    pub media: MediaRef,
}

impl MediaMarker {
    /// Create a new marker.
    pub fn new(id: impl Into<String>, location: GeoPoint, media: MediaRef) -> Self {
        Self {
            id: id.into(),
            location,
            media,
        }
    }
}

/// Read-only snapshot contract for the external media source.
///
/// The caller refreshes the snapshot on its own cadence (pagination,
/// library-change notifications); the projection core only ever reads.
pub trait MediaSource: Send + Sync {
    /// All media items currently known to the source.
    fn snapshot(&self) -> Vec<MediaItem>;

    /// Geotagged candidates only; items without location metadata are
    /// excluded.
    fn markers(&self) -> Vec<MediaMarker> {
        self.snapshot()
            .into_iter()
            .filter_map(MediaItem::into_marker)
            .collect()
    }
}

/// In-memory media source for tests and scenario playback.
#[derive(Debug, Clone, Default)]
pub struct StaticMediaSource {
    items: Vec<MediaItem>,
}

impl StaticMediaSource {
    /// Create a source over a fixed set of items.
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items }
    }
}

impl MediaSource for StaticMediaSource {
    fn snapshot(&self) -> Vec<MediaItem> {
        self.items.clone()
    }
}

/// Lazy id→marker lookup cache.
///
/// Avoids repeat expensive metadata resolution for the same asset. Entries
/// are populated on first lookup and never evicted - the map is bounded by
/// the total media count, which is small.
#[derive(Debug, Default)]
pub struct MarkerCatalog {
    entries: DashMap<String, MediaMarker>,
}

impl MarkerCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a marker, resolving and caching it on first access.
    ///
    /// `resolve` is only invoked when the id is not yet cached; a `None`
    /// result (unknown id, or item lost its metadata) is not cached, so a
    /// later refresh can still populate the entry.
    pub fn get_or_resolve(
        &self,
        id: &str,
        resolve: impl FnOnce() -> Option<MediaMarker>,
    ) -> Option<MediaMarker> {
        if let Some(entry) = self.entries.get(id) {
            return Some(entry.value().clone());
        }

        let marker = resolve()?;
        self.entries.insert(id.to_string(), marker.clone());
        Some(marker)
    }

    /// Look up a cached marker without resolving.
    pub fn get(&self, id: &str) -> Option<MediaMarker> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Number of cached markers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no markers are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cached markers (e.g. when the media library is refreshed).
    pub fn clear(&self) {
        self.entries.clear();
    }
}
