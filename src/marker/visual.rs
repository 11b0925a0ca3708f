//! Visual markers - a host handle plus its lifecycle phase.
//!
//! ```text
//! Appearing ──finish_appearing──► Visible
//!     │                              │
//!     └────────begin_removal─────────┤
//!                                    ▼
//!                                Removing ──finish_removal──► Gone
//!
//! remove_now: any live phase ──► Gone
//! ```
//!
//! A `Gone` marker never comes back; every mutation on it is ignored.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::types::{LatLng, ZIndex};

use super::handle::{MarkerHandle, MarkerTag};

/// Lifecycle phase of a rendered marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPhase {
    /// Created and transitioning in (fade or move from parent).
    Appearing,
    /// At rest, bound to a rendered cluster.
    Visible,
    /// Detached from its cluster, transitioning towards removal.
    Removing,
    /// Removed from the host map.
    Gone,
}

/// A marker shared between render state and in-flight transitions.
pub type SharedMarker<M> = Rc<RefCell<VisualMarker<M>>>;

/// A host marker handle with an enforced lifecycle.
#[derive(Debug)]
pub struct VisualMarker<M> {
    handle: M,
    phase: MarkerPhase,
}

impl<M: MarkerHandle> VisualMarker<M> {
    /// Wrap a freshly created handle. Starts `Appearing`.
    pub fn new(handle: M) -> Self {
        Self {
            handle,
            phase: MarkerPhase::Appearing,
        }
    }

    /// Wrap into the shared form used by the renderer.
    pub fn shared(handle: M) -> SharedMarker<M> {
        Rc::new(RefCell::new(Self::new(handle)))
    }

    pub fn phase(&self) -> MarkerPhase {
        self.phase
    }

    /// True unless the marker is `Gone`.
    pub fn is_live(&self) -> bool {
        self.phase != MarkerPhase::Gone
    }

    pub fn handle(&self) -> &M {
        &self.handle
    }

    pub fn position(&self) -> LatLng {
        self.handle.position()
    }

    pub fn opacity(&self) -> f32 {
        self.handle.opacity()
    }

    pub fn set_position(&mut self, position: LatLng) {
        if self.is_live() {
            self.handle.set_position(position);
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        if self.is_live() {
            self.handle.set_opacity(opacity.clamp(0.0, 1.0));
        }
    }

    pub fn set_z_index(&mut self, z_index: ZIndex) {
        if self.is_live() {
            self.handle.set_z_index(z_index);
        }
    }

    pub fn set_tag(&mut self, tag: Option<MarkerTag>) {
        if self.is_live() {
            self.handle.set_tag(tag);
        }
    }

    /// `Appearing → Visible`. A no-op in any other phase.
    ///
    /// A marker can start removal before its appearance finishes, so a late
    /// completion landing on `Removing` or `Gone` is expected.
    pub fn finish_appearing(&mut self) {
        if self.phase == MarkerPhase::Appearing {
            self.phase = MarkerPhase::Visible;
        }
    }

    /// `Appearing | Visible → Removing`.
    pub fn begin_removal(&mut self) -> bool {
        match self.phase {
            MarkerPhase::Appearing | MarkerPhase::Visible => {
                self.phase = MarkerPhase::Removing;
                true
            }
            phase => {
                warn!(?phase, "begin_removal on a marker that is not live");
                false
            }
        }
    }

    /// `Removing → Gone`, taking the marker off the map.
    pub fn finish_removal(&mut self) -> bool {
        match self.phase {
            MarkerPhase::Removing => {
                self.handle.remove();
                self.phase = MarkerPhase::Gone;
                true
            }
            MarkerPhase::Gone => false,
            phase => {
                warn!(?phase, "finish_removal without begin_removal");
                false
            }
        }
    }

    /// Any live phase → `Gone` immediately.
    pub fn remove_now(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.handle.remove();
        self.phase = MarkerPhase::Gone;
        true
    }
}
