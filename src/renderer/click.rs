//! Click Router - turns host marker clicks into cluster/item callbacks.
//!
//! The host reports "this marker was clicked". The router reads the cluster
//! tag the renderer attached to the marker and dispatches:
//!
//! - more than one member → `on_cluster_click(cluster)`
//! - exactly one member → `on_cluster_item_click(item)`
//!
//! A click is left unconsumed (`false`) when the marker has no tag, the tag
//! is not a cluster of this item type, or no callbacks are registered.
//!
//! # Example
//!
//! ```ignore
//! renderer.set_callbacks(ClusterClickHandlers {
//!     on_cluster_click: Some(Box::new(|cluster| {
//!         println!("{} items", cluster.size());
//!         true // Consume event
//!     })),
//!     ..Default::default()
//! });
//! ```

use std::rc::Rc;

use tracing::trace;

use crate::marker::MarkerHandle;
use crate::model::{Cluster, ClusterItem};

// =============================================================================
// CALLBACKS
// =============================================================================

/// Application callbacks for clicks. Return true to consume the event.
pub trait ClusterCallbacks<T> {
    fn on_cluster_click(&self, cluster: &Cluster<T>) -> bool;
    fn on_cluster_item_click(&self, item: &T) -> bool;
}

/// Handler for a cluster click. Return true to consume the event.
pub type ClusterClickHandler<T> = Box<dyn Fn(&Cluster<T>) -> bool>;

/// Handler for a single-item click. Return true to consume the event.
pub type ItemClickHandler<T> = Box<dyn Fn(&T) -> bool>;

/// Closure-based [`ClusterCallbacks`]. A missing handler leaves the click
/// unconsumed.
pub struct ClusterClickHandlers<T> {
    pub on_cluster_click: Option<ClusterClickHandler<T>>,
    pub on_cluster_item_click: Option<ItemClickHandler<T>>,
}

impl<T> Default for ClusterClickHandlers<T> {
    fn default() -> Self {
        Self {
            on_cluster_click: None,
            on_cluster_item_click: None,
        }
    }
}

impl<T> ClusterCallbacks<T> for ClusterClickHandlers<T> {
    fn on_cluster_click(&self, cluster: &Cluster<T>) -> bool {
        self.on_cluster_click.as_ref().is_some_and(|f| f(cluster))
    }

    fn on_cluster_item_click(&self, item: &T) -> bool {
        self.on_cluster_item_click.as_ref().is_some_and(|f| f(item))
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Dispatches marker clicks to the single registered [`ClusterCallbacks`].
pub struct ClickRouter<T> {
    callbacks: Option<Rc<dyn ClusterCallbacks<T>>>,
}

impl<T: ClusterItem + 'static> ClickRouter<T> {
    pub fn new() -> Self {
        Self { callbacks: None }
    }

    /// Register callbacks, replacing any previous ones.
    pub fn set_callbacks<C>(&mut self, callbacks: C)
    where
        C: ClusterCallbacks<T> + 'static,
    {
        self.callbacks = Some(Rc::new(callbacks));
    }

    /// Unregister callbacks. Clicks go unconsumed afterwards.
    pub fn clear_callbacks(&mut self) {
        self.callbacks = None;
    }

    pub fn has_callbacks(&self) -> bool {
        self.callbacks.is_some()
    }

    /// Handle a host marker click. Returns true if the event was consumed.
    pub fn on_marker_click<M: MarkerHandle>(&self, marker: &M) -> bool {
        let Some(tag) = marker.tag() else {
            return false;
        };
        let Ok(cluster) = tag.downcast::<Cluster<T>>() else {
            trace!("clicked marker tag is not a cluster");
            return false;
        };
        // Clone out so a callback may re-register callbacks
        let Some(callbacks) = self.callbacks.clone() else {
            return false;
        };

        if cluster.size() > 1 {
            callbacks.on_cluster_click(&cluster)
        } else if let Some(item) = cluster.single_item() {
            callbacks.on_cluster_item_click(item)
        } else {
            false
        }
    }
}

impl<T: ClusterItem + 'static> Default for ClickRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{MarkerHandle, MarkerTag};
    use crate::model::MapItem;
    use crate::test_support::FakeMarker;
    use crate::types::LatLng;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        clusters: RefCell<Vec<usize>>,
        items: RefCell<Vec<MapItem>>,
        consume: bool,
    }

    impl ClusterCallbacks<MapItem> for Rc<Recorder> {
        fn on_cluster_click(&self, cluster: &Cluster<MapItem>) -> bool {
            self.clusters.borrow_mut().push(cluster.size());
            self.consume
        }

        fn on_cluster_item_click(&self, item: &MapItem) -> bool {
            self.items.borrow_mut().push(item.clone());
            self.consume
        }
    }

    fn tagged(cluster: Cluster<MapItem>) -> FakeMarker {
        let mut marker = FakeMarker::at(cluster.centroid());
        let tag: MarkerTag = Rc::new(cluster);
        marker.set_tag(Some(tag));
        marker
    }

    fn three_items() -> Cluster<MapItem> {
        Cluster::from_items(
            vec![MapItem::new(0.0, 0.0), MapItem::new(0.1, 0.0), MapItem::new(0.0, 0.1)],
            0.0,
        )
    }

    fn setup(consume: bool) -> (ClickRouter<MapItem>, Rc<Recorder>) {
        let recorder = Rc::new(Recorder {
            consume,
            ..Default::default()
        });
        let mut router = ClickRouter::new();
        router.set_callbacks(recorder.clone());
        (router, recorder)
    }

    #[test]
    fn test_multi_item_routes_to_cluster_click() {
        let (router, recorder) = setup(true);
        assert!(router.on_marker_click(&tagged(three_items())));
        assert_eq!(*recorder.clusters.borrow(), vec![3]);
        assert!(recorder.items.borrow().is_empty());
    }

    #[test]
    fn test_single_item_routes_to_item_click() {
        let (router, recorder) = setup(true);
        let item = MapItem::new(4.0, 2.0).with_title("only");
        assert!(router.on_marker_click(&tagged(Cluster::single(item.clone()))));
        assert_eq!(*recorder.items.borrow(), vec![item]);
        assert!(recorder.clusters.borrow().is_empty());
    }

    #[test]
    fn test_callback_result_is_returned() {
        let (router, recorder) = setup(false);
        assert!(!router.on_marker_click(&tagged(three_items())));
        assert_eq!(recorder.clusters.borrow().len(), 1);
    }

    #[test]
    fn test_untagged_not_consumed() {
        let (router, recorder) = setup(true);
        assert!(!router.on_marker_click(&FakeMarker::at(LatLng::new(0.0, 0.0))));
        assert!(recorder.clusters.borrow().is_empty());
    }

    #[test]
    fn test_foreign_tag_not_consumed() {
        let (router, _recorder) = setup(true);
        let mut marker = FakeMarker::at(LatLng::new(0.0, 0.0));
        let tag: MarkerTag = Rc::new("not a cluster");
        marker.set_tag(Some(tag));
        assert!(!router.on_marker_click(&marker));
    }

    #[test]
    fn test_no_callbacks_not_consumed() {
        let router: ClickRouter<MapItem> = ClickRouter::new();
        assert!(!router.on_marker_click(&tagged(three_items())));
    }

    #[test]
    fn test_set_callbacks_replaces() {
        let (mut router, first) = setup(true);
        let (_, second) = setup(true);
        router.set_callbacks(second.clone());
        router.on_marker_click(&tagged(three_items()));
        assert!(first.clusters.borrow().is_empty());
        assert_eq!(second.clusters.borrow().len(), 1);

        router.clear_callbacks();
        assert!(!router.has_callbacks());
        assert!(!router.on_marker_click(&tagged(three_items())));
    }

    #[test]
    fn test_closure_handlers() {
        let mut router = ClickRouter::new();
        router.set_callbacks(ClusterClickHandlers::<MapItem> {
            on_cluster_click: Some(Box::new(|cluster: &Cluster<MapItem>| cluster.size() == 3)),
            ..Default::default()
        });
        assert!(router.on_marker_click(&tagged(three_items())));
        // No item handler registered
        assert!(!router.on_marker_click(&tagged(Cluster::single(MapItem::new(1.0, 1.0)))));
    }
}
