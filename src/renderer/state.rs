//! Render State - what is on the map right now.
//!
//! Holds the rendered cluster list and the cluster → marker bindings.
//! Bindings are bucketed by centroid bits so lookups stay cheap without
//! requiring items to be hashable; within a bucket clusters are compared
//! structurally (`Cluster: PartialEq`).
//!
//! Invariant, checked by [`RenderState::check_invariants`]: every cluster in
//! the list has exactly one binding and every binding's cluster is in the list.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ClusterError, Result};
use crate::marker::SharedMarker;
use crate::model::{Cluster, ClusterItem};

/// Hashable slot of a cluster: the bit pattern of its centroid.
pub(crate) type SlotKey = (u64, u64);

pub(crate) fn slot_key<T: ClusterItem>(cluster: &Cluster<T>) -> SlotKey {
    cluster.centroid().bits()
}

/// A rendered cluster and its marker.
struct Binding<T, M> {
    cluster: Rc<Cluster<T>>,
    marker: SharedMarker<M>,
}

/// Clusters currently rendered and their markers.
pub struct RenderState<T, M> {
    clusters: Vec<Rc<Cluster<T>>>,
    bindings: HashMap<SlotKey, Vec<Binding<T, M>>>,
}

impl<T: ClusterItem, M> RenderState<T, M> {
    pub fn new() -> Self {
        Self {
            clusters: Vec::new(),
            bindings: HashMap::new(),
        }
    }

    /// Rendered clusters, in the order they were first rendered.
    pub fn clusters(&self) -> &[Rc<Cluster<T>>] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    fn binding(&self, cluster: &Cluster<T>) -> Option<&Binding<T, M>> {
        self.bindings
            .get(&slot_key(cluster))?
            .iter()
            .find(|b| *b.cluster == *cluster)
    }

    /// True if a structurally equal cluster has a marker.
    pub fn is_bound(&self, cluster: &Cluster<T>) -> bool {
        self.binding(cluster).is_some()
    }

    /// Marker of the structurally equal rendered cluster.
    pub fn marker_for(&self, cluster: &Cluster<T>) -> Option<SharedMarker<M>> {
        self.binding(cluster).map(|b| b.marker.clone())
    }

    /// Update the rendered list: append `added`, drop `removed`.
    ///
    /// Removal matches by reference; `removed` always comes from this list.
    pub fn apply_membership(&mut self, added: &[Rc<Cluster<T>>], removed: &[Rc<Cluster<T>>]) {
        self.clusters.extend(added.iter().cloned());
        self.clusters
            .retain(|c| !removed.iter().any(|r| Rc::ptr_eq(c, r)));
    }

    /// Bind a marker to a cluster.
    pub fn bind(&mut self, cluster: Rc<Cluster<T>>, marker: SharedMarker<M>) {
        self.bindings
            .entry(slot_key(&cluster))
            .or_default()
            .push(Binding { cluster, marker });
    }

    /// Drop the binding of a cluster, returning its marker.
    pub fn unbind(&mut self, cluster: &Cluster<T>) -> Option<SharedMarker<M>> {
        let key = slot_key(cluster);
        let bucket = self.bindings.get_mut(&key)?;
        let index = bucket.iter().position(|b| *b.cluster == *cluster)?;
        let binding = bucket.swap_remove(index);
        if bucket.is_empty() {
            self.bindings.remove(&key);
        }
        Some(binding.marker)
    }

    /// Verify list and bindings agree.
    pub fn check_invariants(&self) -> Result<()> {
        let bound: usize = self.bindings.values().map(Vec::len).sum();
        if bound != self.clusters.len() {
            return Err(ClusterError::InconsistentState(format!(
                "{} rendered cluster(s) but {} marker binding(s)",
                self.clusters.len(),
                bound
            )));
        }
        for cluster in &self.clusters {
            let matches = self
                .bindings
                .get(&slot_key(cluster))
                .map(|bucket| bucket.iter().filter(|b| Rc::ptr_eq(&b.cluster, cluster)).count())
                .unwrap_or(0);
            if matches != 1 {
                return Err(ClusterError::InconsistentState(format!(
                    "cluster at {} has {} marker binding(s)",
                    cluster.centroid(),
                    matches
                )));
            }
        }
        Ok(())
    }
}

impl<T: ClusterItem, M> Default for RenderState<T, M> {
    fn default() -> Self {
        Self::new()
    }
}
