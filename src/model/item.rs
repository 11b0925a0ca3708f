//! Cluster items - the points of interest that get grouped into clusters.

use crate::types::LatLng;

// =============================================================================
// ClusterItem
// =============================================================================

/// Anything with a position that can be clustered and rendered as a marker.
///
/// Identity is whatever `PartialEq` says it is; the renderer never assigns
/// IDs of its own.
pub trait ClusterItem: PartialEq {
    /// Position of the item.
    fn position(&self) -> LatLng;

    /// Title shown when the item is rendered on its own.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Snippet shown when the item is rendered on its own.
    fn snippet(&self) -> Option<&str> {
        None
    }

    /// Cache key for the item's icon. Items sharing a key share an icon.
    fn icon_key(&self) -> Option<&str> {
        None
    }
}

// =============================================================================
// MapItem
// =============================================================================

/// A ready-made [`ClusterItem`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapItem {
    pub position: LatLng,
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub category: Option<String>,
}

impl MapItem {
    /// Create an item at the given coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: LatLng::new(latitude, longitude),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl ClusterItem for MapItem {
    fn position(&self) -> LatLng {
        self.position
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref()
    }

    fn icon_key(&self) -> Option<&str> {
        self.category.as_deref()
    }
}
