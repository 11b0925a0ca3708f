//! # spark-clusters
//!
//! Animated marker-cluster rendering for map widgets.
//!
//! A clustering algorithm hands the renderer the full set of clusters for the
//! current zoom level. The renderer diffs that set against what is on the map
//! and issues marker operations so markers never pop: clusters that merge
//! slide into their parent and disappear, clusters that split slide out of the
//! cluster they came from, and everything else fades in.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! reactive bits hosts observe (rendered count, animation activity).
//!
//! ## Pass
//!
//! ```text
//! incoming clusters → RenderPlan (add / remove / keep)
//!                   → removals: background, move into parent or remove
//!                   → additions: split from parent or fade in, tag marker
//!                   → TransitionDriver (immediate or per-frame)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Coordinates, bounds, z-index, interpolation
//! - [`model`] - Cluster items and clusters
//! - [`icons`] - Icon generation and caching
//! - [`marker`] - Host map contract and per-marker phase tracking
//! - [`animate`] - Easing, transitions and drivers
//! - [`renderer`] - The render pass and click routing
//! - [`config`] - Renderer configuration
//! - [`error`] - Error types

pub mod animate;
pub mod config;
pub mod error;
pub mod icons;
pub mod marker;
pub mod model;
pub mod renderer;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used items
pub use types::*;

pub use animate::{FrameDriver, ImmediateDriver, Interpolator, Transition, TransitionDriver};
pub use config::RendererConfig;
pub use error::{ClusterError, Result};
pub use icons::{CachedIconGenerator, IconGenerator, IconKey, SizeBuckets};
pub use marker::{
    MapSurface, MarkerHandle, MarkerOptions, MarkerPhase, MarkerTag, SharedMarker, VisualMarker,
};
pub use model::{Cluster, ClusterItem, MapItem};
pub use renderer::{
    ClickRouter, ClusterCallbacks, ClusterClickHandlers, ClusterRenderer, PassEffects,
    RenderSummary,
};
