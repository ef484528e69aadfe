//! Scripted pointer input: label clicks replayed against the chart app on a
//! synthetic clock.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use geo::BoundingRect;
use riskplot_app::app::RiskplotApp;
use riskplot_chart::fields::FieldSelection;
use riskplot_chart::handlers::{label_selection, make_chart_app};
use riskplot_chart::scene::{ChartState, X_LABELS_PATH, Y_LABELS_PATH};
use riskplot_eventstream::window::{ElementState, MouseButton, WindowEvent};
use riskplot_geometry::rtree::SceneGraphRTree;
use riskplot_scenegraph::scene_graph::SceneGraph;

/// Upper bound on ticks spent waiting for a transition to finish
const MAX_SETTLE_STEPS: usize = 10_000;

/// Center of the label for `selection`, in absolute coordinates
pub fn label_center(rtree: &SceneGraphRTree, selection: FieldSelection) -> Option<[f32; 2]> {
    let label_path = match selection {
        FieldSelection::X(_) => X_LABELS_PATH,
        FieldSelection::Y(_) => Y_LABELS_PATH,
    };
    let instance = rtree.rtree().iter().find(|g| {
        g.mark_instance.is_in_mark(&label_path)
            && g.mark_instance.instance_index == Some(selection.index())
    })?;
    let center = instance.geometry.bounding_rect()?.center();
    Some([center.x, center.y])
}

pub struct Replay {
    app: RiskplotApp<ChartState>,
    now: Instant,
}

impl Replay {
    pub fn new(state: ChartState) -> anyhow::Result<Self> {
        let now = Instant::now();
        let app = make_chart_app(state, now)?;
        Ok(Self { app, now })
    }

    pub fn scene_graph(&self) -> &Arc<SceneGraph> {
        self.app.scene_graph()
    }

    pub fn state(&self) -> &ChartState {
        self.app.state()
    }

    pub fn is_animating(&self) -> bool {
        self.app.is_animating()
    }

    /// Move the pointer onto the label for `selection` and click it
    pub fn click(&mut self, selection: FieldSelection) -> anyhow::Result<()> {
        let position = label_center(self.app.rtree(), selection)
            .with_context(|| format!("no label drawn for {selection}"))?;

        // the label must be the top mark there, or the click goes elsewhere
        let picked = self
            .app
            .rtree()
            .pick_top_mark_at_point(&position)
            .and_then(label_selection);
        if picked != Some(selection) {
            bail!("label for {selection} is covered at {position:?}");
        }

        log::debug!("clicking {selection} at {position:?}");
        let events = [
            WindowEvent::cursor_moved(position),
            WindowEvent::mouse_input(ElementState::Pressed, MouseButton::Left),
            WindowEvent::mouse_input(ElementState::Released, MouseButton::Left),
        ];
        for event in &events {
            self.app.update(event, self.now)?;
        }
        Ok(())
    }

    /// Advance the clock, returning the new frame while a transition runs
    pub fn advance(&mut self, step: Duration) -> anyhow::Result<Option<Arc<SceneGraph>>> {
        self.now += step;
        Ok(self.app.tick(self.now)?)
    }

    /// Advance in steps of `step` until no transition is running
    pub fn settle(&mut self, step: Duration) -> anyhow::Result<Vec<Arc<SceneGraph>>> {
        let step = step.max(Duration::from_millis(1));
        let mut frames = vec![];
        for _ in 0..MAX_SETTLE_STEPS {
            if !self.is_animating() {
                return Ok(frames);
            }
            frames.extend(self.advance(step)?);
        }
        bail!("transition did not finish after {MAX_SETTLE_STEPS} steps")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskplot_chart::config::ChartConfig;
    use riskplot_chart::data::Dataset;
    use riskplot_chart::fields::{XField, YField};
    use std::path::PathBuf;

    fn replay() -> Replay {
        let path =
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../riskplot-chart/tests/data/data.csv");
        let dataset = Arc::new(Dataset::load_csv(path).unwrap());
        Replay::new(ChartState::try_new(dataset, ChartConfig::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_label_centers() {
        let replay = replay();
        let rtree = replay.app.rtree();
        let income = label_center(rtree, FieldSelection::X(XField::Income)).unwrap();
        assert!((income[0] - 480.0).abs() < 1.0);
        assert!(income[1] > 440.0 && income[1] < 480.0);

        let smokes = label_center(rtree, FieldSelection::Y(YField::Smokes)).unwrap();
        assert!(smokes[0] < 100.0);
        assert!((smokes[1] - 220.0).abs() < 1.0);
    }

    #[test]
    fn test_clicks_then_settle() {
        let mut replay = replay();
        replay.click(FieldSelection::X(XField::Income)).unwrap();
        replay.click(FieldSelection::Y(YField::Smokes)).unwrap();
        assert!(replay.is_animating());

        let frames = replay.settle(Duration::from_millis(100)).unwrap();
        assert_eq!(frames.len(), 10);
        assert!(!replay.is_animating());
        assert_eq!(replay.state().selection().x, XField::Income);
        assert_eq!(replay.state().selection().y, YField::Smokes);
    }
}
