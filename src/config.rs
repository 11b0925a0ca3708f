//! Renderer configuration.

use std::time::Duration;

use crate::animate::Interpolator;
use crate::types::ZIndex;

/// Tunables for [`ClusterRenderer`](crate::ClusterRenderer).
///
/// Changes apply from the next render pass; markers already on the map keep
/// whatever they were created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    /// Duration of every move and fade.
    pub transition_duration: Duration,
    /// Easing curve for every move and fade.
    pub interpolator: Interpolator,
    /// Stacking order given to markers on their way out.
    pub background_z: ZIndex,
    /// Stacking order given to new markers.
    pub foreground_z: ZIndex,
}

impl RendererConfig {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            transition_duration: Self::DEFAULT_DURATION,
            interpolator: Interpolator::FastOutSlowIn,
            background_z: ZIndex::BACKGROUND,
            foreground_z: ZIndex::FOREGROUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RendererConfig::default();
        assert_eq!(config.transition_duration, Duration::from_millis(300));
        assert_eq!(config.interpolator, Interpolator::FastOutSlowIn);
        assert!(config.background_z < config.foreground_z);
    }

    #[test]
    fn test_builders() {
        let config = RendererConfig::default()
            .with_duration(Duration::from_millis(120))
            .with_interpolator(Interpolator::Linear);
        assert_eq!(config.transition_duration, Duration::from_millis(120));
        assert_eq!(config.interpolator, Interpolator::Linear);
    }
}
