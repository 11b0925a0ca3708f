//! Memoizing icon generator.
//!
//! Cluster icons are keyed by size bucket, so a cluster of 57 and one of 93
//! share the "50+" icon. Item icons are keyed by [`ClusterItem::icon_key`].
//! Each key is built exactly once by the factory and cloned afterwards.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::model::{Cluster, ClusterItem};

use super::generator::IconGenerator;

// =============================================================================
// SIZE BUCKETS
// =============================================================================

/// Thresholds used to group cluster sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBuckets {
    thresholds: Vec<usize>,
}

impl SizeBuckets {
    /// Thresholds must be ascending. Unsorted input is sorted and deduped.
    pub fn new(mut thresholds: Vec<usize>) -> Self {
        thresholds.sort_unstable();
        thresholds.dedup();
        Self { thresholds }
    }

    /// Bucket for a cluster size.
    ///
    /// Sizes below the first threshold are their own bucket; otherwise the
    /// largest threshold not above `size`.
    pub fn bucket(&self, size: usize) -> usize {
        match self.thresholds.iter().rposition(|&t| t <= size) {
            Some(i) => self.thresholds[i],
            None => size,
        }
    }

    /// Text for a bucket: "7" below the first threshold, "50+" otherwise.
    pub fn label(&self, bucket: usize) -> String {
        match self.thresholds.first() {
            Some(&first) if bucket >= first => format!("{bucket}+"),
            _ => bucket.to_string(),
        }
    }
}

impl Default for SizeBuckets {
    fn default() -> Self {
        Self::new(vec![10, 20, 50, 100, 200, 500, 1000])
    }
}

// =============================================================================
// ICON KEY
// =============================================================================

/// Cache key handed to the icon factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconKey {
    /// A multi-item cluster in the given size bucket.
    Cluster { bucket: usize, label: String },
    /// A single item with the given category (`None` = default item icon).
    Item(Option<String>),
}

// =============================================================================
// CACHED ICON GENERATOR
// =============================================================================

/// Factory building an icon for a key. `None` means "cannot build".
pub type IconFactory<I> = Box<dyn Fn(&IconKey) -> Option<I>>;

/// [`IconGenerator`] that builds each distinct [`IconKey`] once.
pub struct CachedIconGenerator<I> {
    factory: IconFactory<I>,
    buckets: SizeBuckets,
    cache: RefCell<HashMap<IconKey, I>>,
    builds: Cell<usize>,
}

impl<I: Clone> CachedIconGenerator<I> {
    /// Create a generator with the default size buckets.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&IconKey) -> Option<I> + 'static,
    {
        Self::with_buckets(SizeBuckets::default(), factory)
    }

    pub fn with_buckets<F>(buckets: SizeBuckets, factory: F) -> Self
    where
        F: Fn(&IconKey) -> Option<I> + 'static,
    {
        Self {
            factory: Box::new(factory),
            buckets,
            cache: RefCell::new(HashMap::new()),
            builds: Cell::new(0),
        }
    }

    pub fn buckets(&self) -> &SizeBuckets {
        &self.buckets
    }

    /// Number of icons currently cached.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Number of times the factory has produced an icon.
    pub fn build_count(&self) -> usize {
        self.builds.get()
    }

    /// Drop every cached icon.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    fn get_or_build(&self, key: IconKey) -> Option<I> {
        if let Some(icon) = self.cache.borrow().get(&key) {
            return Some(icon.clone());
        }
        let icon = (self.factory)(&key)?;
        trace!(?key, "built icon");
        self.builds.set(self.builds.get() + 1);
        self.cache.borrow_mut().insert(key, icon.clone());
        Some(icon)
    }
}

impl<T: ClusterItem, I: Clone> IconGenerator<T> for CachedIconGenerator<I> {
    type Icon = I;

    fn cluster_icon(&self, cluster: &Cluster<T>) -> Option<I> {
        let bucket = self.buckets.bucket(cluster.size());
        let label = self.buckets.label(bucket);
        self.get_or_build(IconKey::Cluster { bucket, label })
    }

    fn item_icon(&self, item: &T) -> Option<I> {
        self.get_or_build(IconKey::Item(item.icon_key().map(str::to_owned)))
    }
}

impl<I> fmt::Debug for CachedIconGenerator<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedIconGenerator")
            .field("buckets", &self.buckets)
            .field("cached", &self.cache.borrow().len())
            .field("builds", &self.builds.get())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
