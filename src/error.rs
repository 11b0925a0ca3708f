//! Error types for render passes.

use thiserror::Error;

/// Errors raised by the cluster renderer.
///
/// Every variant signals a caller or implementation bug rather than a
/// runtime condition; none of them is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Malformed input to a render pass.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The icon generator returned no icon for a cluster.
    #[error("Icon generator returned no icon for a cluster of {items} item(s)")]
    MissingIcon { items: usize },

    /// Render state no longer satisfies its invariants.
    #[error("Inconsistent render state: {0}")]
    InconsistentState(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;
