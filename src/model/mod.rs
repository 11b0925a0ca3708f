//! Model Module - Immutable cluster and item data
//!
//! - [`ClusterItem`] - trait for anything that can be clustered
//! - [`MapItem`] - ready-made item with title/snippet/category
//! - [`Cluster`] - centroid, containment area and member items

mod cluster;
mod item;

pub use cluster::*;
pub use item::*;
