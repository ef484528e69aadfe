use std::sync::Arc;
use std::time::{Duration, Instant};

use riskplot_app::app::{AppState, RiskplotApp, SceneGraphBuilder};
use riskplot_app::error::RiskplotAppError;
use riskplot_app::transition::{Tween, DEFAULT_DURATION};
use riskplot_eventstream::manager::EventStreamHandler;
use riskplot_eventstream::scene::{SceneGraphEvent, SceneGraphEventType};
use riskplot_eventstream::stream::{EventStreamConfig, UpdateStatus};
use riskplot_eventstream::window::{ElementState, MouseButton, WindowEvent};
use riskplot_scenegraph::marks::group::SceneGroup;
use riskplot_scenegraph::marks::mark::SceneMark;
use riskplot_scenegraph::marks::symbol::{size_for_radius, SceneSymbolMark};
use riskplot_scenegraph::scene_graph::SceneGraph;

/// A single dot that slides right by 100px per click
#[derive(Clone)]
struct SlidingDot {
    x: Tween<f32>,
    clicks: usize,
}

impl AppState for SlidingDot {
    fn is_animating(&self, instant: Instant) -> bool {
        self.x.is_active(instant)
    }
}

fn build(state: &SlidingDot, instant: Instant) -> Result<SceneGraph, RiskplotAppError> {
    let dot = SceneSymbolMark {
        name: "dot".to_string(),
        x: state.x.sample(instant).into(),
        y: 50.0f32.into(),
        size: size_for_radius(10.0).into(),
        ..Default::default()
    };
    Ok(SceneGraph {
        marks: vec![SceneGroup {
            marks: vec![dot.into()],
            ..Default::default()
        }
        .into()],
        width: 400.0,
        height: 100.0,
        origin: [0.0, 0.0],
    })
}

fn dot_x(scene_graph: &SceneGraph) -> f32 {
    let SceneMark::Symbol(dot) = &scene_graph.marks[0].children()[0] else {
        panic!("expected dot symbol");
    };
    *dot.x.get(0).unwrap()
}

fn app(t0: Instant) -> RiskplotApp<SlidingDot> {
    let on_click: Arc<dyn EventStreamHandler<SlidingDot>> = Arc::new(
        |_: &SceneGraphEvent, state: &mut SlidingDot, instant: Instant| {
            state.clicks += 1;
            let target = state.x.target() + 100.0;
            state.x.retarget(target, instant);
            UpdateStatus::rebuild()
        },
    );
    let builder: Arc<dyn SceneGraphBuilder<SlidingDot>> = Arc::new(build);
    RiskplotApp::new(
        SlidingDot {
            x: Tween::new(50.0, DEFAULT_DURATION),
            clicks: 0,
        },
        builder,
        vec![(
            EventStreamConfig::for_marks(vec![SceneGraphEventType::Click], vec![vec![0, 0]]),
            on_click,
        )],
        t0,
    )
    .unwrap()
}

fn click(app: &mut RiskplotApp<SlidingDot>, position: [f32; 2], instant: Instant) -> Option<Arc<SceneGraph>> {
    app.update(&WindowEvent::cursor_moved(position), instant).unwrap();
    app.update(&WindowEvent::mouse_input(ElementState::Pressed, MouseButton::Left), instant)
        .unwrap();
    app.update(&WindowEvent::mouse_input(ElementState::Released, MouseButton::Left), instant)
        .unwrap()
}

#[test]
fn test_initial_scene() {
    let t0 = Instant::now();
    let app = app(t0);
    assert_eq!(dot_x(app.scene_graph()), 50.0);
    assert!(!app.is_animating());
    assert_eq!(app.rtree().rtree().size(), 1);
}

#[test]
fn test_click_starts_animation() {
    let t0 = Instant::now();
    let mut app = app(t0);

    let scene = click(&mut app, [50.0, 50.0], t0).expect("click rerenders");
    assert_eq!(app.state().clicks, 1);
    assert_eq!(dot_x(&scene), 50.0);
    assert!(app.is_animating());

    let mid = app.tick(t0 + Duration::from_millis(500)).unwrap().unwrap();
    assert!((dot_x(&mid) - 100.0).abs() < 1e-3);

    // One last frame at the target, then nothing more to draw
    let last = app.tick(t0 + Duration::from_millis(1200)).unwrap().unwrap();
    assert_eq!(dot_x(&last), 150.0);
    assert!(!app.is_animating());
    assert!(app.tick(t0 + Duration::from_millis(1300)).unwrap().is_none());
}

#[test]
fn test_miss_does_not_rerender() {
    let t0 = Instant::now();
    let mut app = app(t0);
    assert!(click(&mut app, [300.0, 90.0], t0).is_none());
    assert_eq!(app.state().clicks, 0);
    assert!(app.tick(t0).unwrap().is_none());
}
