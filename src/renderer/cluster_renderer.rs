//! Cluster renderer - reconciles cluster sets with markers on the map.
//!
//! Each call to [`ClusterRenderer::render`] receives the full cluster set for
//! the frame (not a delta) and issues the minimal marker operations to get
//! there, animating so nothing pops in or out.
//!
//! # Algorithm
//!
//! 1. Classify adds / removes / keeps ([`RenderPlan`])
//! 2. Resolve icons, titles and snippets for every add (fails before any
//!    state or marker is touched)
//! 3. Update the rendered cluster list
//! 4. Removals first:
//!    - push the marker to the background and clear its cluster tag
//!    - parent = first rendered cluster containing the removed centroid
//!    - parent found: move there, remove when the move completes
//!    - otherwise: remove now
//! 5. Then additions:
//!    - parent = first *removed* cluster containing the added centroid
//!    - parent found: create opaque at the parent's centroid, move home
//!    - otherwise: create transparent at home, fade in
//!    - tag the marker with its cluster, bind it
//!
//! Removals go first so a removed marker never picks a parent that is about
//! to disappear, and so a marker moving out and one moving in never draw at
//! the same spot with the same stacking order.
//!
//! Parent search takes the first containment match in iteration order; there
//! is no distance tie-break.

use std::rc::Rc;
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::{debug, trace, warn};

use crate::animate::{Transition, TransitionDriver};
use crate::config::RendererConfig;
use crate::error::{ClusterError, Result};
use crate::icons::IconGenerator;
use crate::marker::{MapSurface, MarkerOptions, MarkerTag, SharedMarker, VisualMarker};
use crate::model::{Cluster, ClusterItem};
use crate::types::LatLng;

use super::click::{ClickRouter, ClusterCallbacks};
use super::plan::RenderPlan;
use super::state::RenderState;
use super::summary::{PassEffects, RenderSummary};

// =============================================================================
// RENDERER
// =============================================================================

/// Renders cluster sets onto a [`MapSurface`] with animated transitions.
///
/// Single-threaded: `render` must run to completion before the next one, and
/// the host must not advance the driver from inside `render`. Both hold by
/// construction since every entry point takes `&mut self`.
pub struct ClusterRenderer<T, S, D>
where
    S: MapSurface,
{
    surface: S,
    driver: D,
    icons: Box<dyn IconGenerator<T, Icon = S::Icon>>,
    router: ClickRouter<T>,
    config: RendererConfig,
    state: RenderState<T, S::Marker>,
    rendered_count: Signal<usize>,
}

impl<T, S, D> ClusterRenderer<T, S, D>
where
    T: ClusterItem + 'static,
    S: MapSurface,
    D: TransitionDriver<S::Marker>,
{
    /// Create a renderer with the default configuration.
    pub fn new<G>(surface: S, driver: D, icons: G) -> Self
    where
        G: IconGenerator<T, Icon = S::Icon> + 'static,
    {
        Self::with_config(surface, driver, icons, RendererConfig::default())
    }

    pub fn with_config<G>(surface: S, driver: D, icons: G, config: RendererConfig) -> Self
    where
        G: IconGenerator<T, Icon = S::Icon> + 'static,
    {
        Self {
            surface,
            driver,
            icons: Box::new(icons),
            router: ClickRouter::new(),
            config,
            state: RenderState::new(),
            rendered_count: signal(0),
        }
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Replace the icon generator. Used from the next pass on.
    pub fn set_icon_generator<G>(&mut self, icons: G)
    where
        G: IconGenerator<T, Icon = S::Icon> + 'static,
    {
        self.icons = Box::new(icons);
    }

    /// Register click callbacks, replacing any previous ones.
    pub fn set_callbacks<C>(&mut self, callbacks: C)
    where
        C: ClusterCallbacks<T> + 'static,
    {
        self.router.set_callbacks(callbacks);
    }

    pub fn clear_callbacks(&mut self) {
        self.router.clear_callbacks();
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Replace the configuration. Used from the next pass on.
    pub fn set_config(&mut self, config: RendererConfig) {
        self.config = config;
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn state(&self) -> &RenderState<T, S::Marker> {
        &self.state
    }

    /// Clusters currently rendered.
    pub fn rendered_clusters(&self) -> &[Rc<Cluster<T>>] {
        self.state.clusters()
    }

    /// True if a structurally equal cluster is rendered.
    pub fn is_rendered(&self, cluster: &Cluster<T>) -> bool {
        self.state.is_bound(cluster)
    }

    /// Marker bound to the structurally equal rendered cluster.
    pub fn marker_for(&self, cluster: &Cluster<T>) -> Option<SharedMarker<S::Marker>> {
        self.state.marker_for(cluster)
    }

    /// Reactive count of rendered clusters, updated after every pass.
    pub fn rendered_count_signal(&self) -> Signal<usize> {
        self.rendered_count.clone()
    }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Render the full cluster set for this frame.
    ///
    /// Rendering the same set twice is a no-op. On error nothing has been
    /// changed, except for [`ClusterError::InconsistentState`] which signals
    /// a bug in the renderer itself.
    pub fn render<I, C>(&mut self, clusters: I) -> Result<RenderSummary>
    where
        I: IntoIterator<Item = C>,
        C: Into<Rc<Cluster<T>>>,
    {
        let incoming: Vec<Rc<Cluster<T>>> = clusters.into_iter().map(Into::into).collect();
        let plan = RenderPlan::classify(&self.state, &incoming)?;

        if plan.is_noop() {
            trace!(kept = plan.kept, "render pass has nothing to do");
            return Ok(RenderSummary {
                kept: plan.kept,
                ..Default::default()
            });
        }

        let mut additions = Vec::with_capacity(plan.to_add.len());
        for cluster in &plan.to_add {
            additions.push((cluster.clone(), self.marker_options(cluster)?));
        }

        self.state.apply_membership(&plan.to_add, &plan.to_remove);

        let mut effects = PassEffects::NONE;
        for cluster in &plan.to_remove {
            effects |= self.remove_cluster(cluster)?;
        }
        for (cluster, options) in additions {
            effects |= self.add_cluster(cluster, options, &plan.to_remove);
        }

        if let Err(err) = self.state.check_invariants() {
            warn!(%err, "render state invariant broken after pass");
            return Err(err);
        }
        self.rendered_count.set(self.state.len());

        let summary = RenderSummary {
            added: plan.to_add.len(),
            removed: plan.to_remove.len(),
            kept: plan.kept,
            replaced: plan.replaced,
            effects,
        };
        debug!(
            added = summary.added,
            removed = summary.removed,
            kept = summary.kept,
            replaced = summary.replaced,
            "render pass"
        );
        Ok(summary)
    }

    /// Remove every marker (renders the empty set).
    pub fn clear(&mut self) -> Result<RenderSummary> {
        self.render(Vec::<Rc<Cluster<T>>>::new())
    }

    /// Advance in-flight transitions. Returns how many are still running.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        self.driver.advance(elapsed)
    }

    /// Handle a host marker click. Returns true if the event was consumed.
    pub fn on_marker_click(&self, marker: &S::Marker) -> bool {
        self.router.on_marker_click(marker)
    }

    // -------------------------------------------------------------------------
    // Pass internals
    // -------------------------------------------------------------------------

    /// Icon, title and snippet for a cluster's marker, at its own centroid.
    fn marker_options(&self, cluster: &Cluster<T>) -> Result<MarkerOptions<S::Icon>> {
        let item = cluster.single_item();
        let icon = match item {
            Some(item) => self.icons.item_icon(item),
            None => self.icons.cluster_icon(cluster),
        }
        .ok_or(ClusterError::MissingIcon {
            items: cluster.size(),
        })?;

        Ok(MarkerOptions::new(cluster.centroid(), icon)
            .title(item.and_then(|i| i.title()).map(str::to_owned))
            .snippet(item.and_then(|i| i.snippet()).map(str::to_owned))
            .z_index(self.config.foreground_z))
    }

    fn move_transition(&self, from: LatLng, to: LatLng) -> Transition {
        Transition::move_to(from, to, self.config.transition_duration, self.config.interpolator)
    }

    fn fade_in_transition(&self) -> Transition {
        Transition::fade(0.0, 1.0, self.config.transition_duration, self.config.interpolator)
    }

    fn remove_cluster(&mut self, cluster: &Cluster<T>) -> Result<PassEffects> {
        let marker = self.state.unbind(cluster).ok_or_else(|| {
            ClusterError::InconsistentState(format!(
                "rendered cluster at {} has no marker",
                cluster.centroid()
            ))
        })?;
        {
            // A leaving marker no longer answers clicks for its cluster
            let mut visual = marker.borrow_mut();
            visual.set_z_index(self.config.background_z);
            visual.set_tag(None);
        }

        let at = cluster.centroid();
        let parent = find_parent(self.state.clusters(), at).map(|p| p.centroid());
        let Some(target) = parent else {
            trace!(%at, "removing marker");
            marker.borrow_mut().remove_now();
            return Ok(PassEffects::REMOVED);
        };

        let from = {
            let mut visual = marker.borrow_mut();
            if !visual.begin_removal() {
                return Ok(PassEffects::REMOVED);
            }
            visual.position()
        };
        trace!(%from, to = %target, "merging marker into parent");
        let transition = self.move_transition(from, target).then_remove();
        self.driver.start(marker, transition);
        Ok(PassEffects::REMOVED | PassEffects::MOVED)
    }

    fn add_cluster(
        &mut self,
        cluster: Rc<Cluster<T>>,
        mut options: MarkerOptions<S::Icon>,
        removed: &[Rc<Cluster<T>>],
    ) -> PassEffects {
        let home = cluster.centroid();
        let parent = find_parent(removed, home).map(|p| p.centroid());

        let (transition, effect) = match parent {
            Some(origin) => {
                trace!(from = %origin, to = %home, "splitting marker out of parent");
                options.position = origin;
                options.opacity = 1.0;
                (self.move_transition(origin, home), PassEffects::MOVED)
            }
            None => {
                trace!(at = %home, "fading in marker");
                options.opacity = 0.0;
                (self.fade_in_transition(), PassEffects::FADED)
            }
        };

        let marker = VisualMarker::shared(self.surface.add_marker(options));
        let tag: MarkerTag = cluster.clone();
        marker.borrow_mut().set_tag(Some(tag));
        self.state.bind(cluster, marker.clone());
        self.driver.start(marker, transition);

        PassEffects::ADDED | effect
    }
}

/// First candidate whose containment area holds `position`.
fn find_parent<T: ClusterItem>(
    candidates: &[Rc<Cluster<T>>],
    position: LatLng,
) -> Option<&Rc<Cluster<T>>> {
    candidates
        .iter()
        .find(|c| c.contains(position.latitude, position.longitude))
}
