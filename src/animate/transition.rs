//! Transitions - one animated property change on one marker.

use std::time::Duration;

use crate::marker::{MarkerHandle, VisualMarker};
use crate::types::{LatLng, Lerp};

use super::easing::Interpolator;

/// The property a transition animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionKind {
    /// Position from one coordinate to another.
    Move { from: LatLng, to: LatLng },
    /// Opacity from one value to another.
    Fade { from: f32, to: f32 },
}

/// What happens to the marker once the transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEnd {
    /// The marker is settled: `Appearing → Visible`.
    Settle,
    /// The marker is taken off the map: `Removing → Gone`.
    Remove,
}

/// A scheduled property change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration: Duration,
    pub interpolator: Interpolator,
    pub end: TransitionEnd,
}

impl Transition {
    pub fn move_to(from: LatLng, to: LatLng, duration: Duration, interpolator: Interpolator) -> Self {
        Self {
            kind: TransitionKind::Move { from, to },
            duration,
            interpolator,
            end: TransitionEnd::Settle,
        }
    }

    pub fn fade(from: f32, to: f32, duration: Duration, interpolator: Interpolator) -> Self {
        Self {
            kind: TransitionKind::Fade { from, to },
            duration,
            interpolator,
            end: TransitionEnd::Settle,
        }
    }

    /// Remove the marker when this transition completes.
    pub fn then_remove(mut self) -> Self {
        self.end = TransitionEnd::Remove;
        self
    }

    /// True if both transitions drive the same marker property.
    pub fn same_property(&self, other: &Transition) -> bool {
        matches!(
            (self.kind, other.kind),
            (TransitionKind::Move { .. }, TransitionKind::Move { .. })
                | (TransitionKind::Fade { .. }, TransitionKind::Fade { .. })
        )
    }

    /// Linear progress after `elapsed`. A zero duration is immediately done.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Write the property value at linear progress `progress`.
    pub fn apply<M: MarkerHandle>(&self, marker: &mut VisualMarker<M>, progress: f64) {
        let eased = self.interpolator.apply(progress);
        match self.kind {
            TransitionKind::Move { from, to } => marker.set_position(from.lerp(&to, eased)),
            TransitionKind::Fade { from, to } => marker.set_opacity(from.lerp(&to, eased)),
        }
    }

    /// Write the final value and run the end action.
    pub fn complete<M: MarkerHandle>(&self, marker: &mut VisualMarker<M>) {
        self.apply(marker, 1.0);
        match self.end {
            TransitionEnd::Settle => marker.finish_appearing(),
            TransitionEnd::Remove => {
                marker.finish_removal();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerPhase;
    use crate::test_support::FakeMarker;

    const MS_300: Duration = Duration::from_millis(300);

    #[test]
    fn test_progress() {
        let t = Transition::fade(0.0, 1.0, MS_300, Interpolator::Linear);
        assert_eq!(t.progress(Duration::ZERO), 0.0);
        assert!((t.progress(Duration::from_millis(150)) - 0.5).abs() < 1e-9);
        assert_eq!(t.progress(Duration::from_secs(5)), 1.0);

        let instant = Transition::fade(0.0, 1.0, Duration::ZERO, Interpolator::Linear);
        assert_eq!(instant.progress(Duration::ZERO), 1.0);
    }

    #[test]
    fn test_apply_move_linear() {
        let mut m = VisualMarker::new(FakeMarker::at(LatLng::new(0.0, 0.0)));
        let t = Transition::move_to(
            LatLng::new(0.0, 0.0),
            LatLng::new(10.0, -10.0),
            MS_300,
            Interpolator::Linear,
        );
        t.apply(&mut m, 0.5);
        assert_eq!(m.position(), LatLng::new(5.0, -5.0));
    }

    #[test]
    fn test_complete_fade_settles() {
        let mut m = VisualMarker::new(FakeMarker::at(LatLng::new(0.0, 0.0)).with_opacity(0.0));
        Transition::fade(0.0, 1.0, MS_300, Interpolator::FastOutSlowIn).complete(&mut m);
        assert_eq!(m.opacity(), 1.0);
        assert_eq!(m.phase(), MarkerPhase::Visible);
    }

    #[test]
    fn test_complete_then_remove() {
        let mut m = VisualMarker::new(FakeMarker::at(LatLng::new(0.0, 0.0)));
        m.begin_removal();
        let target = LatLng::new(1.0, 2.0);
        Transition::move_to(m.position(), target, MS_300, Interpolator::FastOutSlowIn)
            .then_remove()
            .complete(&mut m);
        assert_eq!(m.phase(), MarkerPhase::Gone);
        assert_eq!(m.handle().position, target);
        assert!(m.handle().removed);
    }

    #[test]
    fn test_same_property() {
        let a = Transition::fade(0.0, 1.0, MS_300, Interpolator::Linear);
        let b = Transition::fade(1.0, 0.0, MS_300, Interpolator::Linear);
        let c = Transition::move_to(LatLng::default(), LatLng::default(), MS_300, Interpolator::Linear);
        assert!(a.same_property(&b));
        assert!(!a.same_property(&c));
    }
}
