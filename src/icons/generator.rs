//! Icon generator contract.

use crate::model::Cluster;

/// Supplies marker icons for clusters and single items.
///
/// Render passes run on every camera change, so implementations should
/// memoize by a stable key (see [`CachedIconGenerator`](super::CachedIconGenerator)).
///
/// Returning `None` for a well-formed input breaks the contract; the render
/// pass fails with [`ClusterError::MissingIcon`](crate::ClusterError::MissingIcon)
/// instead of drawing a blank marker.
pub trait IconGenerator<T> {
    /// Host-specific icon descriptor.
    type Icon;

    /// Icon for a cluster of two or more items.
    fn cluster_icon(&self, cluster: &Cluster<T>) -> Option<Self::Icon>;

    /// Icon for an item rendered on its own.
    fn item_icon(&self, item: &T) -> Option<Self::Icon>;
}
