//! Clusters - groups of items drawn as a single marker.
//!
//! A cluster carries:
//! - a representative centroid (where its marker sits)
//! - a containment area, asked "would a point here belong to you?" when
//!   looking for the parent of a merging or splitting cluster
//! - its member items (order is irrelevant)
//!
//! Clustering pipelines usually rebuild cluster objects on every camera
//! change, so identity across passes is structural, never by address alone.

use crate::types::{LatLng, LatLngBounds};

use super::item::ClusterItem;

// =============================================================================
// Cluster
// =============================================================================

/// A group of one or more [`ClusterItem`]s sharing a centroid.
#[derive(Debug, Clone)]
pub struct Cluster<T> {
    centroid: LatLng,
    bounds: LatLngBounds,
    items: Vec<T>,
}

impl<T: ClusterItem> Cluster<T> {
    /// Create a cluster with an explicit centroid and containment area.
    pub fn new(centroid: LatLng, bounds: LatLngBounds, items: Vec<T>) -> Self {
        Self {
            centroid,
            bounds,
            items,
        }
    }

    /// Create a cluster around the mean position of `items`.
    ///
    /// The containment area is the items' enclosing rectangle grown by
    /// `padding` degrees. An empty `items` produces a cluster at (0, 0)
    /// that a render pass will reject.
    pub fn from_items(items: Vec<T>, padding: f64) -> Self {
        let count = items.len().max(1) as f64;
        let (lat_sum, lon_sum) = items.iter().fold((0.0, 0.0), |(lat, lon), item| {
            let p = item.position();
            (lat + p.latitude, lon + p.longitude)
        });
        let centroid = LatLng::new(lat_sum / count, lon_sum / count);
        let bounds = LatLngBounds::enclosing(items.iter().map(|i| i.position()))
            .unwrap_or_else(|| LatLngBounds::point(centroid))
            .padded(padding);
        Self::new(centroid, bounds, items)
    }

    /// A cluster holding exactly one item, centered on it.
    pub fn single(item: T) -> Self {
        let position = item.position();
        Self::new(position, LatLngBounds::point(position), vec![item])
    }

    pub fn centroid(&self) -> LatLng {
        self.centroid
    }

    pub fn bounds(&self) -> LatLngBounds {
        self.bounds
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of member items.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// The only member, if this cluster has exactly one.
    pub fn single_item(&self) -> Option<&T> {
        match self.items.as_slice() {
            [item] => Some(item),
            _ => None,
        }
    }

    /// True if a point at this coordinate would be assigned to this cluster.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.bounds.contains(latitude, longitude)
    }

    /// True if the member sets are equal, ignoring order.
    ///
    /// Duplicates count: `[a, a, b]` and `[a, b, b]` differ.
    pub fn same_members(&self, other: &Cluster<T>) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.items.len() != other.items.len() {
            return false;
        }
        let mut matched = vec![false; other.items.len()];
        self.items.iter().all(|item| {
            let hit = other
                .items
                .iter()
                .enumerate()
                .position(|(i, candidate)| !matched[i] && candidate == item);
            match hit {
                Some(i) => {
                    matched[i] = true;
                    true
                }
                None => false,
            }
        })
    }

    /// True if both clusters sit at the same centroid (bit-exact).
    ///
    /// Same slot but different members means the cluster was replaced.
    pub fn same_slot(&self, other: &Cluster<T>) -> bool {
        std::ptr::eq(self, other) || self.centroid.same_bits(&other.centroid)
    }
}

impl<T: ClusterItem> PartialEq for Cluster<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_slot(other) && self.same_members(other)
    }
}
