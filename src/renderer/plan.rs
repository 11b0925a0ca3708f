//! Render plan - classify a new cluster set against what is rendered.
//!
//! # Algorithm
//!
//! 1. Validate the new set (non-empty clusters, finite centroids, no two
//!    structurally equal clusters).
//! 2. Every new cluster without a bound equal is an *add*.
//! 3. Every rendered cluster without an equal in the new set is a *remove*.
//!    If a new cluster being added occupies its slot with different members
//!    it counts as *replaced*: the old marker leaves and the new cluster is
//!    added fresh.
//! 4. Everything else is *kept* and not touched.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{ClusterError, Result};
use crate::model::{Cluster, ClusterItem};

use super::state::{slot_key, RenderState, SlotKey};

/// What a render pass has to do.
pub struct RenderPlan<T> {
    /// New clusters that need a marker, in input order.
    pub to_add: Vec<Rc<Cluster<T>>>,
    /// Rendered clusters whose marker must go, in render order.
    pub to_remove: Vec<Rc<Cluster<T>>>,
    /// Rendered clusters left untouched.
    pub kept: usize,
    /// Removals whose slot is taken over by a cluster with new members.
    pub replaced: usize,
}

impl<T: ClusterItem> RenderPlan<T> {
    /// Diff `incoming` against `state`.
    pub fn classify<M>(state: &RenderState<T, M>, incoming: &[Rc<Cluster<T>>]) -> Result<Self> {
        let slots = index_by_slot(incoming)?;

        let to_add: Vec<_> = incoming
            .iter()
            .filter(|cluster| !state.is_bound(cluster))
            .cloned()
            .collect();

        let mut to_remove = Vec::new();
        let mut kept = 0;
        let mut replaced = 0;
        for rendered in state.clusters() {
            let same_slot = slots
                .get(&slot_key(rendered))
                .map(Vec::as_slice)
                .unwrap_or_default();
            if same_slot.iter().any(|&i| *incoming[i] == **rendered) {
                kept += 1;
                continue;
            }
            // Replaced only if its slot is taken by a cluster being added
            if same_slot.iter().any(|&i| !state.is_bound(&incoming[i])) {
                replaced += 1;
            }
            to_remove.push(rendered.clone());
        }

        Ok(Self {
            to_add,
            to_remove,
            kept,
            replaced,
        })
    }

    /// True if the pass has nothing to do.
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Validate `incoming` and bucket its indices by slot.
fn index_by_slot<T: ClusterItem>(incoming: &[Rc<Cluster<T>>]) -> Result<HashMap<SlotKey, Vec<usize>>> {
    let mut slots: HashMap<SlotKey, Vec<usize>> = HashMap::with_capacity(incoming.len());
    for (index, cluster) in incoming.iter().enumerate() {
        if cluster.size() == 0 {
            return Err(ClusterError::InvalidArgument(format!(
                "cluster #{index} at {} has no items",
                cluster.centroid()
            )));
        }
        if !cluster.centroid().is_finite() {
            return Err(ClusterError::InvalidArgument(format!(
                "cluster #{index} has a non-finite centroid {}",
                cluster.centroid()
            )));
        }
        let bucket = slots.entry(slot_key(cluster)).or_default();
        if let Some(&first) = bucket.iter().find(|&&other| *incoming[other] == **cluster) {
            return Err(ClusterError::InvalidArgument(format!(
                "clusters #{first} and #{index} are the same cluster"
            )));
        }
        bucket.push(index);
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::VisualMarker;
    use crate::model::MapItem;
    use crate::test_support::FakeMarker;
    use crate::types::{LatLng, LatLngBounds};

    fn single(lat: f64, lon: f64) -> Rc<Cluster<MapItem>> {
        Rc::new(Cluster::single(MapItem::new(lat, lon)))
    }

    fn rendered(clusters: &[Rc<Cluster<MapItem>>]) -> RenderState<MapItem, FakeMarker> {
        let mut state = RenderState::new();
        state.apply_membership(clusters, &[]);
        for c in clusters {
            state.bind(c.clone(), VisualMarker::shared(FakeMarker::at(c.centroid())));
        }
        state
    }

    #[test]
    fn test_empty_to_some() {
        let state = rendered(&[]);
        let plan = RenderPlan::classify(&state, &[single(1.0, 1.0), single(2.0, 2.0)]).unwrap();
        assert_eq!(plan.to_add.len(), 2);
        assert!(plan.to_remove.is_empty());
        assert_eq!(plan.kept, 0);
    }

    #[test]
    fn test_identical_set_is_noop() {
        let state = rendered(&[single(1.0, 1.0), single(2.0, 2.0)]);
        // Rebuilt objects, equal by structure
        let plan = RenderPlan::classify(&state, &[single(2.0, 2.0), single(1.0, 1.0)]).unwrap();
        assert!(plan.is_noop());
        assert_eq!(plan.kept, 2);
    }

    #[test]
    fn test_removed_cluster() {
        let state = rendered(&[single(1.0, 1.0), single(2.0, 2.0)]);
        let plan = RenderPlan::classify(&state, &[single(1.0, 1.0)]).unwrap();
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.to_remove.len(), 1);
        assert_eq!(plan.to_remove[0].centroid(), LatLng::new(2.0, 2.0));
        assert_eq!(plan.replaced, 0);
    }

    #[test]
    fn test_changed_members_is_replace() {
        let centroid = LatLng::new(5.0, 5.0);
        let bounds = LatLngBounds::point(centroid).padded(1.0);
        let before = Rc::new(Cluster::new(centroid, bounds, vec![MapItem::new(5.0, 5.0), MapItem::new(5.1, 5.0)]));
        let after = Rc::new(Cluster::new(centroid, bounds, vec![MapItem::new(5.0, 5.0), MapItem::new(4.9, 5.0)]));

        let state = rendered(&[before.clone()]);
        let plan = RenderPlan::classify(&state, &[after.clone()]).unwrap();
        assert_eq!(plan.to_add.len(), 1);
        assert!(Rc::ptr_eq(&plan.to_add[0], &after));
        assert_eq!(plan.to_remove.len(), 1);
        assert!(Rc::ptr_eq(&plan.to_remove[0], &before));
        assert_eq!(plan.replaced, 1);
    }

    #[test]
    fn test_removal_next_to_kept_cluster_is_not_replace() {
        let centroid = LatLng::new(5.0, 5.0);
        let bounds = LatLngBounds::point(centroid).padded(1.0);
        let kept = Rc::new(Cluster::new(centroid, bounds, vec![MapItem::new(5.0, 5.0), MapItem::new(5.1, 5.0)]));
        let dropped = Rc::new(Cluster::new(centroid, bounds, vec![MapItem::new(5.0, 5.0), MapItem::new(4.9, 5.0)]));

        let state = rendered(&[kept.clone(), dropped.clone()]);
        let rebuilt = Rc::new(Cluster::new(centroid, bounds, vec![MapItem::new(5.1, 5.0), MapItem::new(5.0, 5.0)]));
        let plan = RenderPlan::classify(&state, &[rebuilt]).unwrap();
        assert!(plan.to_add.is_empty());
        assert_eq!(plan.kept, 1);
        assert_eq!(plan.to_remove.len(), 1);
        assert!(Rc::ptr_eq(&plan.to_remove[0], &dropped));
        assert_eq!(plan.replaced, 0);
    }

    #[test]
    fn test_rejects_empty_cluster() {
        let state = rendered(&[]);
        let empty = Rc::new(Cluster::new(
            LatLng::new(0.0, 0.0),
            LatLngBounds::point(LatLng::new(0.0, 0.0)),
            Vec::<MapItem>::new(),
        ));
        assert!(matches!(
            RenderPlan::classify(&state, &[empty]),
            Err(ClusterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_nan_centroid() {
        let state = rendered(&[]);
        let bad = Rc::new(Cluster::single(MapItem::new(f64::NAN, 0.0)));
        assert!(RenderPlan::classify(&state, &[bad]).is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let state = rendered(&[]);
        let err = RenderPlan::classify(&state, &[single(1.0, 1.0), single(1.0, 1.0)]);
        assert!(matches!(err, Err(ClusterError::InvalidArgument(_))));
    }
}
