//! In-memory host map used by unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::marker::{MapSurface, MarkerHandle, MarkerOptions, MarkerTag};
use crate::types::{LatLng, ZIndex};

/// A marker operation seen by the fake host.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add(usize),
    SetPosition(usize, LatLng),
    SetOpacity(usize, f32),
    SetZIndex(usize, ZIndex),
    SetTag(usize),
    Remove(usize),
}

/// Latest state of a marker as the host sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub id: usize,
    pub position: LatLng,
    pub opacity: f32,
    pub z_index: ZIndex,
    pub removed: bool,
}

#[derive(Default)]
struct Log {
    ops: Vec<Op>,
    created: Vec<MarkerOptions<String>>,
    markers: Vec<Snapshot>,
}

// =============================================================================
// FakeMarker
// =============================================================================

pub struct FakeMarker {
    pub id: usize,
    pub position: LatLng,
    pub opacity: f32,
    pub z_index: ZIndex,
    pub tag: Option<MarkerTag>,
    pub removed: bool,
    log: Option<Rc<RefCell<Log>>>,
}

impl FakeMarker {
    /// A standalone, fully opaque marker not attached to any surface.
    pub fn at(position: LatLng) -> Self {
        Self {
            id: 0,
            position,
            opacity: 1.0,
            z_index: ZIndex::FOREGROUND,
            tag: None,
            removed: false,
            log: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    fn record(&self, op: Op) {
        if let Some(log) = &self.log {
            let mut log = log.borrow_mut();
            log.ops.push(op);
            if let Some(snapshot) = log.markers.get_mut(self.id) {
                snapshot.position = self.position;
                snapshot.opacity = self.opacity;
                snapshot.z_index = self.z_index;
                snapshot.removed = self.removed;
            }
        }
    }
}

impl MarkerHandle for FakeMarker {
    fn position(&self) -> LatLng {
        self.position
    }

    fn set_position(&mut self, position: LatLng) {
        self.position = position;
        self.record(Op::SetPosition(self.id, position));
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.record(Op::SetOpacity(self.id, opacity));
    }

    fn set_z_index(&mut self, z_index: ZIndex) {
        self.z_index = z_index;
        self.record(Op::SetZIndex(self.id, z_index));
    }

    fn tag(&self) -> Option<MarkerTag> {
        self.tag.clone()
    }

    fn set_tag(&mut self, tag: Option<MarkerTag>) {
        self.tag = tag;
        self.record(Op::SetTag(self.id));
    }

    fn remove(&mut self) {
        self.removed = true;
        self.record(Op::Remove(self.id));
    }
}

// =============================================================================
// FakeSurface
// =============================================================================

#[derive(Default)]
pub struct FakeSurface {
    log: Rc<RefCell<Log>>,
}

impl FakeSurface {
    pub fn ops(&self) -> Vec<Op> {
        self.log.borrow().ops.clone()
    }

    pub fn clear_ops(&mut self) {
        self.log.borrow_mut().ops.clear();
    }

    /// Creation options of every marker, in creation order.
    pub fn created(&self) -> Vec<MarkerOptions<String>> {
        self.log.borrow().created.clone()
    }

    /// Markers not removed yet.
    pub fn live_markers(&self) -> Vec<Snapshot> {
        self.log
            .borrow()
            .markers
            .iter()
            .filter(|m| !m.removed)
            .cloned()
            .collect()
    }
}

impl MapSurface for FakeSurface {
    type Icon = String;
    type Marker = FakeMarker;

    fn add_marker(&mut self, options: MarkerOptions<String>) -> FakeMarker {
        let mut log = self.log.borrow_mut();
        let id = log.created.len();
        log.ops.push(Op::Add(id));
        log.markers.push(Snapshot {
            id,
            position: options.position,
            opacity: options.opacity,
            z_index: options.z_index,
            removed: false,
        });
        let marker = FakeMarker {
            id,
            position: options.position,
            opacity: options.opacity,
            z_index: options.z_index,
            tag: None,
            removed: false,
            log: Some(self.log.clone()),
        };
        log.created.push(options);
        marker
    }
}
