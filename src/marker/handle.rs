//! Host map widget contract.
//!
//! The renderer never draws anything itself. It asks a [`MapSurface`] to
//! create markers and then drives each returned [`MarkerHandle`] through
//! position, opacity, stacking and removal changes.

use std::any::Any;
use std::rc::Rc;

use crate::types::{LatLng, ZIndex};

/// Opaque data attached to a marker.
///
/// The renderer attaches the marker's owning cluster here; the click router
/// reads it back when the host reports a click.
pub type MarkerTag = Rc<dyn Any>;

// =============================================================================
// MarkerHandle
// =============================================================================

/// A single marker living on the host map.
pub trait MarkerHandle {
    fn position(&self) -> LatLng;
    fn set_position(&mut self, position: LatLng);

    /// Opacity in `0.0..=1.0`.
    fn opacity(&self) -> f32;
    fn set_opacity(&mut self, opacity: f32);

    fn set_z_index(&mut self, z_index: ZIndex);

    fn tag(&self) -> Option<MarkerTag>;
    fn set_tag(&mut self, tag: Option<MarkerTag>);

    /// Take the marker off the map. Further calls on the handle are ignored
    /// by the renderer.
    fn remove(&mut self);
}

// =============================================================================
// MarkerOptions
// =============================================================================

/// Everything the host needs to create a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions<I> {
    pub position: LatLng,
    pub icon: I,
    pub title: Option<String>,
    pub snippet: Option<String>,
    /// Initial opacity in `0.0..=1.0`.
    pub opacity: f32,
    pub z_index: ZIndex,
}

impl<I> MarkerOptions<I> {
    /// Fully opaque, foreground marker.
    pub fn new(position: LatLng, icon: I) -> Self {
        Self {
            position,
            icon,
            title: None,
            snippet: None,
            opacity: 1.0,
            z_index: ZIndex::FOREGROUND,
        }
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn snippet(mut self, snippet: Option<String>) -> Self {
        self.snippet = snippet;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn z_index(mut self, z_index: ZIndex) -> Self {
        self.z_index = z_index;
        self
    }
}

// =============================================================================
// MapSurface
// =============================================================================

/// The host map widget.
pub trait MapSurface {
    /// Icon descriptor accepted by the host.
    type Icon;
    /// Handle type for markers created on this surface.
    type Marker: MarkerHandle;

    /// Create a marker and put it on the map.
    fn add_marker(&mut self, options: MarkerOptions<Self::Icon>) -> Self::Marker;
}
