//! Marker classification views.
//!
//! Thin, stateless transforms over a projected frame: the "close by" strip
//! (near markers, sorted) and the AR overlay list (visible far markers).
//! Hidden markers are computed by the projection engine for completeness
//! but exposed to neither view.
//!
//! There is no state machine here - both views are recomputed on demand
//! from the current projected list.

use crate::projection::{Classification, ProjectedMarker};

/// The two renderer-facing views of a projected frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerPartition {
    /// Markers within the near threshold, sorted by ascending distance
    /// (ties broken by ascending marker id for determinism). Shown in the
    /// horizontal "close by" strip, not overlaid.
    pub near: Vec<ProjectedMarker>,
    /// Far markers within the field of view, in projection (input) order.
    /// Shown as positioned AR overlays.
    pub visible: Vec<ProjectedMarker>,
}

impl MarkerPartition {
    /// Partition a projected frame into the near strip and overlay views.
    pub fn partition(projected: &[ProjectedMarker]) -> Self {
        let mut near: Vec<ProjectedMarker> = projected
            .iter()
            .filter(|p| p.classification == Classification::Near)
            .cloned()
            .collect();
        near.sort_by(|a, b| {
            a.distance_meters
                .total_cmp(&b.distance_meters)
                .then_with(|| a.marker.id.cmp(&b.marker.id))
        });

        let visible = projected
            .iter()
            .filter(|p| p.classification == Classification::FarVisible)
            .cloned()
            .collect();

        Self { near, visible }
    }

    /// True when neither view has any markers.
    pub fn is_empty(&self) -> bool {
        self.near.is_empty() && self.visible.is_empty()
    }
}

/// Visible overlay markers in back-to-front paint order.
///
/// Farthest first, so closer markers are painted last and correctly occlude
/// overlapping ones; ties broken by ascending marker id.
pub fn paint_order(projected: &[ProjectedMarker]) -> Vec<&ProjectedMarker> {
    let mut visible: Vec<&ProjectedMarker> = projected
        .iter()
        .filter(|p| p.classification == Classification::FarVisible)
        .collect();
    visible.sort_by(|a, b| {
        b.distance_meters
            .total_cmp(&a.distance_meters)
            .then_with(|| a.marker.id.cmp(&b.marker.id))
    });
    visible
}
