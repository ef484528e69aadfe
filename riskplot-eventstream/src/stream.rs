use crate::manager::EventStreamHandler;
use crate::scene::{SceneGraphEvent, SceneGraphEventType};
use riskplot_scenegraph::marks::mark::MarkInstance;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub type EventFilter = Arc<dyn Fn(&SceneGraphEvent) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct EventStreamConfig {
    /// Event types to include in the stream
    pub types: Vec<SceneGraphEventType>,

    /// If specified, only events associated with marks within
    /// the specified scene group will be included
    pub source_group: Option<Vec<usize>>,

    /// If true, the event will be consumed by the event stream and
    /// not propagated to other streams
    pub consume: bool,

    /// If specified, only events matching all of the filters will be included
    pub filter: Option<Vec<EventFilter>>,

    /// If specified, only events that occur after the start stream has been triggered
    /// and before the end stream has been triggered will be included
    pub between: Option<(Box<EventStreamConfig>, Box<EventStreamConfig>)>,

    /// If specified, only events associated with the specified mark paths will be included
    pub mark_paths: Option<Vec<Vec<usize>>>,

    /// Minimum time (in milliseconds) between events
    pub throttle: Option<u64>,
}

impl EventStreamConfig {
    /// Stream of `types` events on the marks at `mark_paths`
    pub fn for_marks(types: Vec<SceneGraphEventType>, mark_paths: Vec<Vec<usize>>) -> Self {
        Self {
            types,
            mark_paths: Some(mark_paths),
            ..Default::default()
        }
    }

    /// Whether the event passes the type, filter, group, and mark path checks.
    /// Stateful checks (between, throttle) are applied by the stream.
    pub fn matches_event(
        &self,
        event: &SceneGraphEvent,
        mark_instance: Option<&MarkInstance>,
    ) -> bool {
        if !self.types.contains(&event.event_type()) {
            return false;
        }

        if let Some(filters) = &self.filter {
            if !filters.iter().all(|filter| filter(event)) {
                return false;
            }
        }

        // Events without a mark are not restricted by the source group
        if let (Some(group), Some(mark_instance)) = (&self.source_group, mark_instance) {
            if !mark_instance.is_in_group(group) {
                return false;
            }
        }

        if let Some(paths) = &self.mark_paths {
            match mark_instance {
                Some(mark_instance) if paths.contains(&mark_instance.mark_path) => {}
                _ => return false,
            }
        }

        true
    }
}

/// What a handler changed, so the app knows how much to rebuild
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStatus {
    /// The scene graph must be rebuilt and redrawn
    pub rerender: bool,
    /// Mark positions changed, so the hit-test r-tree must be rebuilt
    pub rebuild_geometry: bool,
}

impl UpdateStatus {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn rerender() -> Self {
        Self {
            rerender: true,
            rebuild_geometry: false,
        }
    }

    pub fn rebuild() -> Self {
        Self {
            rerender: true,
            rebuild_geometry: true,
        }
    }

    pub fn merge(self, other: UpdateStatus) -> Self {
        Self {
            rerender: self.rerender || other.rerender,
            rebuild_geometry: self.rebuild_geometry || other.rebuild_geometry,
        }
    }
}

#[derive(Clone)]
struct BetweenState {
    started: bool,
    start: EventStreamConfig,
    end: EventStreamConfig,
}

/// A registered stream: its config, its handler, and the state used for
/// `between` and `throttle`
pub(crate) struct EventStream<State> {
    pub(crate) config: EventStreamConfig,
    pub(crate) handler: Arc<dyn EventStreamHandler<State>>,
    between_state: Option<BetweenState>,
    last_handled_time: Option<Instant>,
}

impl<State> EventStream<State> {
    pub(crate) fn new(config: EventStreamConfig, handler: Arc<dyn EventStreamHandler<State>>) -> Self {
        let between_state = config.between.as_ref().map(|(start, end)| BetweenState {
            started: false,
            start: start.as_ref().clone(),
            end: end.as_ref().clone(),
        });

        Self {
            config,
            handler,
            between_state,
            last_handled_time: None,
        }
    }

    /// Whether the handler should run for this event. Advances the between
    /// state and records the handling time when it returns true.
    pub(crate) fn matches_and_update(
        &mut self,
        event: &SceneGraphEvent,
        mark_instance: Option<&MarkInstance>,
        now: Instant,
    ) -> bool {
        if let Some(between) = &mut self.between_state {
            if !between.started {
                if between.start.matches_event(event, mark_instance) {
                    between.started = true;
                }
                return false;
            } else if between.end.matches_event(event, mark_instance) {
                between.started = false;
                return false;
            }
        }

        if !self.config.matches_event(event, mark_instance) || !self.throttle_allows(now) {
            return false;
        }
        self.last_handled_time = Some(now);
        true
    }

    fn throttle_allows(&self, now: Instant) -> bool {
        match (self.config.throttle, self.last_handled_time) {
            (Some(throttle), Some(last_time)) => {
                now.saturating_duration_since(last_time) >= Duration::from_millis(throttle)
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneClickEvent, SceneCursorMovedEvent};
    use crate::window::MouseButton;

    fn label(path: Vec<usize>, index: usize) -> MarkInstance {
        MarkInstance {
            name: "label".to_string(),
            mark_path: path,
            instance_index: Some(index),
        }
    }

    fn click(mark_instance: Option<MarkInstance>) -> SceneGraphEvent {
        SceneGraphEvent::Click(SceneClickEvent {
            position: [0.0, 0.0],
            button: MouseButton::Left,
            mark_instance,
        })
    }

    #[test]
    fn test_mark_path_filtering() {
        let config =
            EventStreamConfig::for_marks(vec![SceneGraphEventType::Click], vec![vec![0, 3, 0]]);
        let hit = label(vec![0, 3, 0], 1);
        let miss = label(vec![0, 4, 0], 1);

        assert!(config.matches_event(&click(Some(hit.clone())), Some(&hit)));
        assert!(!config.matches_event(&click(Some(miss.clone())), Some(&miss)));
        assert!(!config.matches_event(&click(None), None));
    }

    #[test]
    fn test_source_group_and_filter() {
        let has_position: EventFilter = Arc::new(|event: &SceneGraphEvent| event.position().is_some());
        let config = EventStreamConfig {
            types: vec![SceneGraphEventType::Click],
            source_group: Some(vec![0, 2]),
            filter: Some(vec![has_position]),
            ..Default::default()
        };
        let inside = label(vec![0, 2, 1], 0);
        let outside = label(vec![0, 3, 0], 0);
        assert!(config.matches_event(&click(Some(inside.clone())), Some(&inside)));
        assert!(!config.matches_event(&click(Some(outside.clone())), Some(&outside)));
    }

    #[test]
    fn test_update_status_merge() {
        let status = UpdateStatus::none().merge(UpdateStatus::rerender());
        assert_eq!(status, UpdateStatus::rerender());
        assert_eq!(status.merge(UpdateStatus::rebuild()), UpdateStatus::rebuild());
    }

    #[test]
    fn test_throttle_and_between() {
        struct Noop;
        impl EventStreamHandler<()> for Noop {
            fn handle(&self, _: &SceneGraphEvent, _: &mut (), _: Instant) -> UpdateStatus {
                UpdateStatus::none()
            }
        }

        let moved = SceneGraphEvent::CursorMoved(SceneCursorMovedEvent {
            position: [1.0, 1.0],
            mark_instance: None,
        });
        let start = Instant::now();

        let mut throttled = EventStream::<()>::new(
            EventStreamConfig {
                types: vec![SceneGraphEventType::CursorMoved],
                throttle: Some(100),
                ..Default::default()
            },
            Arc::new(Noop),
        );
        assert!(throttled.matches_and_update(&moved, None, start));
        assert!(!throttled.matches_and_update(&moved, None, start + Duration::from_millis(50)));
        assert!(throttled.matches_and_update(&moved, None, start + Duration::from_millis(150)));

        let mut between = EventStream::<()>::new(
            EventStreamConfig {
                types: vec![SceneGraphEventType::CursorMoved],
                between: Some((
                    Box::new(EventStreamConfig {
                        types: vec![SceneGraphEventType::MouseDown],
                        ..Default::default()
                    }),
                    Box::new(EventStreamConfig {
                        types: vec![SceneGraphEventType::Click],
                        ..Default::default()
                    }),
                )),
                ..Default::default()
            },
            Arc::new(Noop),
        );
        let down = SceneGraphEvent::MouseDown(crate::scene::SceneMouseDownEvent {
            position: [1.0, 1.0],
            button: MouseButton::Left,
            mark_instance: None,
        });
        assert!(!between.matches_and_update(&moved, None, start));
        assert!(!between.matches_and_update(&down, None, start));
        assert!(between.matches_and_update(&moved, None, start));
        assert!(!between.matches_and_update(&click(None), None, start));
        assert!(!between.matches_and_update(&moved, None, start));
    }
}
