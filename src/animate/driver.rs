//! Transition drivers - who actually runs a scheduled transition.
//!
//! The render pass only *schedules* transitions and returns. A driver decides
//! when the property values change and when the completion action fires:
//!
//! - [`ImmediateDriver`] - completes every transition as soon as it starts.
//!   Useful for tests and for hosts that do not animate.
//! - [`FrameDriver`] - keeps transitions in flight and advances them from the
//!   host's frame loop via [`FrameDriver::advance`].
//!
//! Both run on the UI thread; completions never overlap a render pass as long
//! as the host does not call `advance` from inside `render`.

use std::rc::Rc;
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::trace;

use crate::marker::{MarkerHandle, SharedMarker};

use super::transition::{Transition, TransitionEnd};

// =============================================================================
// TRAIT
// =============================================================================

/// Runs transitions scheduled by the renderer.
pub trait TransitionDriver<M: MarkerHandle> {
    /// Schedule `transition` on `marker`. Must not block on completion.
    fn start(&mut self, marker: SharedMarker<M>, transition: Transition);

    /// Advance in-flight transitions by `elapsed`.
    ///
    /// Returns the number of transitions still running.
    fn advance(&mut self, _elapsed: Duration) -> usize {
        0
    }

    /// Number of transitions still running.
    fn in_flight(&self) -> usize {
        0
    }
}

// =============================================================================
// IMMEDIATE DRIVER
// =============================================================================

/// Completes every transition synchronously inside `start`.
#[derive(Debug, Default)]
pub struct ImmediateDriver {
    completed: usize,
}

impl ImmediateDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transitions completed so far.
    pub fn completed(&self) -> usize {
        self.completed
    }
}

impl<M: MarkerHandle> TransitionDriver<M> for ImmediateDriver {
    fn start(&mut self, marker: SharedMarker<M>, transition: Transition) {
        transition.complete(&mut *marker.borrow_mut());
        self.completed += 1;
    }
}

// =============================================================================
// FRAME DRIVER
// =============================================================================

struct Running<M> {
    marker: SharedMarker<M>,
    transition: Transition,
    elapsed: Duration,
}

/// Keeps transitions in flight until the host advances time.
///
/// Starting a transition on a marker that already has one running for the
/// same property retargets it: the new one starts from wherever the marker
/// is now. A pending removal is carried over so a marker told to leave the
/// map still leaves it.
pub struct FrameDriver<M> {
    running: Vec<Running<M>>,
    active: Signal<bool>,
}

impl<M: MarkerHandle> FrameDriver<M> {
    pub fn new() -> Self {
        Self {
            running: Vec::new(),
            active: signal(false),
        }
    }

    /// Reactive flag, true while any transition is in flight.
    ///
    /// Hosts can drive their frame loop from an `effect` on this signal so it
    /// only ticks while something is animating.
    pub fn active_signal(&self) -> Signal<bool> {
        self.active.clone()
    }

    pub fn is_active(&self) -> bool {
        !self.running.is_empty()
    }

    /// Complete every in-flight transition right now.
    pub fn finish_all(&mut self) {
        for run in self.running.drain(..) {
            run.transition.complete(&mut *run.marker.borrow_mut());
        }
        self.sync_active();
    }

    fn sync_active(&self) {
        let active = !self.running.is_empty();
        if self.active.get() != active {
            self.active.set(active);
        }
    }
}

impl<M: MarkerHandle> Default for FrameDriver<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MarkerHandle> TransitionDriver<M> for FrameDriver<M> {
    fn start(&mut self, marker: SharedMarker<M>, mut transition: Transition) {
        let superseded = self.running.iter().position(|run| {
            Rc::ptr_eq(&run.marker, &marker) && run.transition.same_property(&transition)
        });
        if let Some(index) = superseded {
            let previous = self.running.swap_remove(index);
            if previous.transition.end == TransitionEnd::Remove {
                transition.end = TransitionEnd::Remove;
            }
            trace!("retargeting in-flight transition");
        }

        if transition.duration.is_zero() {
            transition.complete(&mut *marker.borrow_mut());
        } else {
            transition.apply(&mut *marker.borrow_mut(), 0.0);
            self.running.push(Running {
                marker,
                transition,
                elapsed: Duration::ZERO,
            });
        }
        self.sync_active();
    }

    fn advance(&mut self, elapsed: Duration) -> usize {
        self.running.retain_mut(|run| {
            if !run.marker.borrow().is_live() {
                return false;
            }
            run.elapsed += elapsed;
            let progress = run.transition.progress(run.elapsed);
            let mut marker = run.marker.borrow_mut();
            if progress >= 1.0 {
                run.transition.complete(&mut *marker);
                false
            } else {
                run.transition.apply(&mut *marker, progress);
                true
            }
        });
        self.sync_active();
        self.running.len()
    }

    fn in_flight(&self) -> usize {
        self.running.len()
    }
}
