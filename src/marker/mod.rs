//! Marker Module - Host marker abstraction and lifecycle
//!
//! - [`MapSurface`] / [`MarkerHandle`] - what the host map widget provides
//! - [`MarkerOptions`] - creation parameters
//! - [`VisualMarker`] - handle + `Appearing → Visible → Removing → Gone`

mod handle;
mod visual;

pub use handle::*;
pub use visual::*;
