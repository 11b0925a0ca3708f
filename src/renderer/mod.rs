//! Renderer Module - Cluster reconciliation and click routing
//!
//! - [`ClusterRenderer`] - the render pass: diff, then animate markers
//! - [`RenderPlan`] - add / remove / keep classification
//! - [`RenderState`] - rendered clusters and their markers
//! - [`ClickRouter`] - marker clicks → cluster or item callbacks
//! - [`RenderSummary`] / [`PassEffects`] - what a pass did

mod click;
mod cluster_renderer;
mod plan;
mod state;
mod summary;

pub use click::*;
pub use cluster_renderer::*;
pub use plan::*;
pub use state::RenderState;
pub use summary::*;
