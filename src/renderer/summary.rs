//! What a render pass did.

bitflags::bitflags! {
    /// Kinds of marker operations issued during a pass.
    ///
    /// Hosts can use this to decide whether to start their frame loop.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PassEffects: u8 {
        const NONE = 0;
        /// At least one marker was created.
        const ADDED = 1 << 0;
        /// At least one marker was removed or scheduled for removal.
        const REMOVED = 1 << 1;
        /// At least one move transition was started.
        const MOVED = 1 << 2;
        /// At least one fade transition was started.
        const FADED = 1 << 3;
    }
}

impl PassEffects {
    /// True if the pass started any transition.
    pub fn animates(&self) -> bool {
        self.intersects(PassEffects::MOVED | PassEffects::FADED)
    }
}

/// Counts and effects of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub added: usize,
    pub removed: usize,
    pub kept: usize,
    /// Removals whose slot was taken over by a cluster with new members.
    pub replaced: usize,
    pub effects: PassEffects,
}

impl RenderSummary {
    /// True if the pass issued no marker operation at all.
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}
