use std::sync::Arc;
use std::time::Instant;

use riskplot_eventstream::manager::{EventStreamHandler, EventStreamManager};
use riskplot_eventstream::stream::{EventStreamConfig, UpdateStatus};
use riskplot_eventstream::window::WindowEvent;
use riskplot_geometry::rtree::SceneGraphRTree;
use riskplot_scenegraph::scene_graph::SceneGraph;

use crate::error::RiskplotAppError;

/// State driven by an app
pub trait AppState: Clone + Send + Sync + 'static {
    /// Whether the state still animates at `instant`, so that frames must
    /// keep being built without any input
    fn is_animating(&self, _instant: Instant) -> bool {
        false
    }
}

pub trait SceneGraphBuilder<State: AppState>: Send + Sync {
    fn build(&self, state: &State, instant: Instant) -> Result<SceneGraph, RiskplotAppError>;
}

impl<State, F> SceneGraphBuilder<State> for F
where
    State: AppState,
    F: Fn(&State, Instant) -> Result<SceneGraph, RiskplotAppError> + Send + Sync + 'static,
{
    fn build(&self, state: &State, instant: Instant) -> Result<SceneGraph, RiskplotAppError> {
        self(state, instant)
    }
}

pub struct RiskplotApp<State: AppState> {
    scene_graph_builder: Arc<dyn SceneGraphBuilder<State>>,
    event_stream_manager: EventStreamManager<State>,
    rtree: SceneGraphRTree,
    scene_graph: Arc<SceneGraph>,
    animating: bool,
}

impl<State: AppState> RiskplotApp<State> {
    pub fn new(
        initial_state: State,
        scene_graph_builder: Arc<dyn SceneGraphBuilder<State>>,
        stream_callbacks: Vec<(EventStreamConfig, Arc<dyn EventStreamHandler<State>>)>,
        instant: Instant,
    ) -> Result<Self, RiskplotAppError> {
        let mut event_stream_manager = EventStreamManager::new(initial_state);
        for (config, handler) in stream_callbacks {
            event_stream_manager.register_handler(config, handler);
        }

        // Build initial scene graph and rtree
        let scene_graph = Arc::new(scene_graph_builder.build(event_stream_manager.state(), instant)?);
        let rtree = SceneGraphRTree::from_scene_graph(&scene_graph);
        let animating = event_stream_manager.state().is_animating(instant);

        Ok(Self {
            scene_graph_builder,
            event_stream_manager,
            rtree,
            scene_graph,
            animating,
        })
    }

    /// Update the state of the app without rebuilding the scene graph
    pub fn update_state(&mut self, event: &WindowEvent, instant: Instant) -> UpdateStatus {
        self.event_stream_manager
            .dispatch_event(event, &self.rtree, instant)
    }

    /// Update the state of the app and rebuild the scene graph if needed.
    ///
    /// Returns the new scene graph when it needs to be redrawn.
    pub fn update(
        &mut self,
        event: &WindowEvent,
        instant: Instant,
    ) -> Result<Option<Arc<SceneGraph>>, RiskplotAppError> {
        let update_status = self.update_state(event, instant);
        self.apply(update_status, instant)
    }

    /// Advance running animations.
    ///
    /// Rebuilds the scene graph while the state animates, plus once more on
    /// the first tick after the animation ends so the final frame is drawn.
    pub fn tick(&mut self, instant: Instant) -> Result<Option<Arc<SceneGraph>>, RiskplotAppError> {
        if !self.animating {
            return Ok(None);
        }
        self.apply(UpdateStatus::rebuild(), instant)
    }

    fn apply(
        &mut self,
        update_status: UpdateStatus,
        instant: Instant,
    ) -> Result<Option<Arc<SceneGraph>>, RiskplotAppError> {
        // Reconstruct the scene graph if the need to rerender or rebuild geometry
        if update_status.rerender || update_status.rebuild_geometry {
            self.scene_graph = Arc::new(
                self.scene_graph_builder
                    .build(self.event_stream_manager.state(), instant)?,
            );
        }

        // Rebuild the rtree if the need to rebuild geometry
        if update_status.rebuild_geometry {
            self.rtree = SceneGraphRTree::from_scene_graph(&self.scene_graph);
        }

        let animating = self.event_stream_manager.state().is_animating(instant);
        if animating != self.animating {
            log::debug!("animation {}", if animating { "started" } else { "finished" });
        }
        self.animating = animating;

        if update_status.rerender {
            Ok(Some(self.scene_graph.clone()))
        } else {
            Ok(None)
        }
    }

    pub fn scene_graph(&self) -> &Arc<SceneGraph> {
        &self.scene_graph
    }

    pub fn rtree(&self) -> &SceneGraphRTree {
        &self.rtree
    }

    pub fn state(&self) -> &State {
        self.event_stream_manager.state()
    }

    /// Whether `tick` still has frames to produce
    pub fn is_animating(&self) -> bool {
        self.animating
    }
}
