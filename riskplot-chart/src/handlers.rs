use std::sync::Arc;
use std::time::Instant;

use riskplot_app::app::{RiskplotApp, SceneGraphBuilder};
use riskplot_app::error::RiskplotAppError;
use riskplot_eventstream::manager::EventStreamHandler;
use riskplot_eventstream::scene::{SceneGraphEvent, SceneGraphEventType};
use riskplot_eventstream::stream::{EventStreamConfig, UpdateStatus};
use riskplot_scenegraph::marks::mark::MarkInstance;
use riskplot_scenegraph::scene_graph::SceneGraph;

use crate::fields::{FieldSelection, XField, YField};
use crate::scene::{make_scene_graph, ChartState, ABBR_PATH, CIRCLES_PATH, X_LABELS_PATH, Y_LABELS_PATH};

pub type ChartStream = (EventStreamConfig, Arc<dyn EventStreamHandler<ChartState>>);

/// Field named by a clicked axis label
pub fn label_selection(mark_instance: &MarkInstance) -> Option<FieldSelection> {
    let index = mark_instance.instance_index?;
    if mark_instance.is_in_mark(&X_LABELS_PATH) {
        XField::from_index(index).map(FieldSelection::X)
    } else if mark_instance.is_in_mark(&Y_LABELS_PATH) {
        YField::from_index(index).map(FieldSelection::Y)
    } else {
        None
    }
}

/// Point under a mark instance, for the circle or its abbreviation
fn point_index(mark_instance: &MarkInstance) -> Option<usize> {
    if mark_instance.is_in_mark(&CIRCLES_PATH) || mark_instance.is_in_mark(&ABBR_PATH) {
        mark_instance.instance_index
    } else {
        None
    }
}

fn on_label_click(event: &SceneGraphEvent, state: &mut ChartState, instant: Instant) -> UpdateStatus {
    let Some(selection) = event.mark_instance().and_then(label_selection) else {
        return UpdateStatus::none();
    };
    match state.select_field(selection, instant) {
        Ok(Some(_)) => UpdateStatus::rebuild(),
        Ok(None) => UpdateStatus::none(),
        Err(err) => {
            log::error!("failed to select {selection}: {err}");
            UpdateStatus::none()
        }
    }
}

fn on_point_enter(event: &SceneGraphEvent, state: &mut ChartState, _instant: Instant) -> UpdateStatus {
    let hovered = event.mark_instance().and_then(point_index);
    if state.set_hovered(hovered) {
        UpdateStatus::rerender()
    } else {
        UpdateStatus::none()
    }
}

fn on_point_leave(event: &SceneGraphEvent, state: &mut ChartState, _instant: Instant) -> UpdateStatus {
    let left = event.mark_instance().and_then(point_index);
    if left.is_some() && left == state.hovered() && state.set_hovered(None) {
        UpdateStatus::rerender()
    } else {
        UpdateStatus::none()
    }
}

/// Label clicks change the selection, hovering a point shows its tooltip
pub fn chart_event_streams() -> Vec<ChartStream> {
    let label_click: Arc<dyn EventStreamHandler<ChartState>> = Arc::new(on_label_click);
    let point_enter: Arc<dyn EventStreamHandler<ChartState>> = Arc::new(on_point_enter);
    let point_leave: Arc<dyn EventStreamHandler<ChartState>> = Arc::new(on_point_leave);

    let point_paths = vec![CIRCLES_PATH.to_vec(), ABBR_PATH.to_vec()];
    vec![
        (
            EventStreamConfig::for_marks(
                vec![SceneGraphEventType::Click],
                vec![X_LABELS_PATH.to_vec(), Y_LABELS_PATH.to_vec()],
            ),
            label_click,
        ),
        (
            EventStreamConfig::for_marks(vec![SceneGraphEventType::MarkMouseEnter], point_paths.clone()),
            point_enter,
        ),
        (
            EventStreamConfig::for_marks(vec![SceneGraphEventType::MarkMouseLeave], point_paths),
            point_leave,
        ),
    ]
}

fn build_scene_graph(
    state: &ChartState,
    instant: Instant,
) -> Result<SceneGraph, RiskplotAppError> {
    make_scene_graph(state, instant).map_err(RiskplotAppError::scene_graph_build)
}

/// App that draws `state` and reacts to pointer input
pub fn make_chart_app(state: ChartState, instant: Instant) -> Result<RiskplotApp<ChartState>, RiskplotAppError> {
    let builder: Arc<dyn SceneGraphBuilder<ChartState>> = Arc::new(build_scene_graph);
    RiskplotApp::new(state, builder, chart_event_streams(), instant)
}
