use crate::scene::{
    SceneClickEvent, SceneCursorMovedEvent, SceneDoubleClickEvent, SceneGraphEvent,
    SceneMouseDownEvent, SceneMouseEnterEvent, SceneMouseLeaveEvent, SceneMouseUpEvent,
};
use crate::stream::{EventStream, EventStreamConfig, UpdateStatus};
use crate::window::{ElementState, MouseButton, WindowEvent};
use riskplot_geometry::rtree::SceneGraphRTree;
use riskplot_scenegraph::marks::mark::MarkInstance;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Callback invoked for events that match a stream
pub trait EventStreamHandler<State>: Send + Sync + 'static {
    fn handle(&self, event: &SceneGraphEvent, state: &mut State, instant: Instant)
        -> UpdateStatus;
}

impl<State, F> EventStreamHandler<State> for F
where
    F: Fn(&SceneGraphEvent, &mut State, Instant) -> UpdateStatus + Send + Sync + 'static,
{
    fn handle(&self, event: &SceneGraphEvent, state: &mut State, instant: Instant) -> UpdateStatus {
        self(event, state, instant)
    }
}

/// Owns the app state and turns window events into scene graph events for
/// the registered streams
pub struct EventStreamManager<State> {
    state: State,
    streams: Vec<EventStream<State>>,
    current_mark: Option<MarkInstance>,
    last_click: Option<(Instant, [f32; 2])>,
    double_click_threshold: Duration,
    // pixels
    double_click_distance: f32,
    current_cursor_position: Option<[f32; 2]>,
    // press that a release must match to count as a click
    mousedown_mark: Option<MarkInstance>,
    mousedown_button: Option<MouseButton>,
}

impl<State: Send + Sync + 'static> EventStreamManager<State> {
    pub fn new(state: State) -> Self {
        Self {
            state,
            streams: Vec::new(),
            current_mark: None,
            last_click: None,
            double_click_threshold: Duration::from_millis(500),
            double_click_distance: 5.0,
            current_cursor_position: None,
            mousedown_mark: None,
            mousedown_button: None,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Mark instance currently under the cursor
    pub fn current_mark(&self) -> Option<&MarkInstance> {
        self.current_mark.as_ref()
    }

    /// Register a new event handler with the given configuration.
    /// Streams are tried in registration order.
    pub fn register_handler(
        &mut self,
        config: EventStreamConfig,
        handler: Arc<dyn EventStreamHandler<State>>,
    ) {
        self.streams.push(EventStream::new(config, handler));
    }

    pub fn dispatch_event(
        &mut self,
        event: &WindowEvent,
        rtree: &SceneGraphRTree,
        instant: Instant,
    ) -> UpdateStatus {
        let mut status = UpdateStatus::none();

        if let Some(position) = event.position() {
            self.current_cursor_position = Some(position);
        }

        let scene_event = match event {
            WindowEvent::MouseInput(input) => match self.current_cursor_position {
                Some(position) => {
                    let mark_instance = rtree.pick_top_mark_at_point(&position).cloned();
                    match input.state {
                        ElementState::Pressed => {
                            self.mousedown_mark = mark_instance.clone();
                            self.mousedown_button = Some(input.button);
                            Some(SceneGraphEvent::MouseDown(SceneMouseDownEvent {
                                position,
                                button: input.button,
                                mark_instance,
                            }))
                        }
                        ElementState::Released => {
                            let is_click = self.mousedown_button == Some(input.button)
                                && self.mousedown_mark == mark_instance;
                            if is_click {
                                status = status.merge(self.dispatch_click(
                                    position,
                                    input.button,
                                    mark_instance.clone(),
                                    instant,
                                ));
                            }
                            self.mousedown_mark = None;
                            self.mousedown_button = None;
                            Some(SceneGraphEvent::MouseUp(SceneMouseUpEvent {
                                position,
                                button: input.button,
                                mark_instance,
                            }))
                        }
                    }
                }
                None => {
                    log::warn!("ignoring mouse input before any cursor position");
                    None
                }
            },
            WindowEvent::CursorMoved(e) => {
                status = status.merge(self.update_hovered_mark(e.position, rtree, instant));
                Some(SceneGraphEvent::CursorMoved(SceneCursorMovedEvent {
                    position: e.position,
                    mark_instance: self.current_mark.clone(),
                }))
            }
            WindowEvent::CursorLeft => {
                if let Some(prev) = self.current_mark.take() {
                    let position = self.current_cursor_position.unwrap_or_default();
                    status = status.merge(self.dispatch_single_event(
                        &SceneGraphEvent::MouseLeave(SceneMouseLeaveEvent {
                            position,
                            mark_instance: prev,
                        }),
                        instant,
                    ));
                }
                self.current_cursor_position = None;
                None
            }
            WindowEvent::WindowResize(e) => Some(SceneGraphEvent::WindowResize(e.clone())),
            WindowEvent::WindowFocused(focused) => Some(SceneGraphEvent::WindowFocused(*focused)),
        };

        if let Some(scene_event) = scene_event {
            status = status.merge(self.dispatch_single_event(&scene_event, instant));
        }
        status
    }

    fn dispatch_single_event(&mut self, event: &SceneGraphEvent, instant: Instant) -> UpdateStatus {
        let mut status = UpdateStatus::none();
        let mark_instance = event.mark_instance();

        for stream in &mut self.streams {
            if stream.matches_and_update(event, mark_instance, instant) {
                status = status.merge(stream.handler.handle(event, &mut self.state, instant));
                if stream.config.consume {
                    break;
                }
            }
        }
        status
    }

    /// Emit leave/enter events when the mark under the cursor changes
    fn update_hovered_mark(
        &mut self,
        position: [f32; 2],
        rtree: &SceneGraphRTree,
        instant: Instant,
    ) -> UpdateStatus {
        let current_mark = rtree.pick_top_mark_at_point(&position).cloned();
        if current_mark == self.current_mark {
            return UpdateStatus::none();
        }

        let mut status = UpdateStatus::none();
        if let Some(prev) = self.current_mark.take() {
            status = status.merge(self.dispatch_single_event(
                &SceneGraphEvent::MouseLeave(SceneMouseLeaveEvent {
                    position,
                    mark_instance: prev,
                }),
                instant,
            ));
        }
        if let Some(curr) = &current_mark {
            status = status.merge(self.dispatch_single_event(
                &SceneGraphEvent::MouseEnter(SceneMouseEnterEvent {
                    position,
                    mark_instance: curr.clone(),
                }),
                instant,
            ));
        }
        self.current_mark = current_mark;
        status
    }

    /// Left clicks within the double click window and distance of the previous
    /// click become a double click instead of a second click
    fn dispatch_click(
        &mut self,
        position: [f32; 2],
        button: MouseButton,
        mark_instance: Option<MarkInstance>,
        instant: Instant,
    ) -> UpdateStatus {
        if button == MouseButton::Left {
            if let Some((last_time, last_pos)) = self.last_click {
                let time_diff = instant.saturating_duration_since(last_time);
                let distance = (position[0] - last_pos[0]).hypot(position[1] - last_pos[1]);
                if time_diff <= self.double_click_threshold
                    && distance <= self.double_click_distance
                {
                    self.last_click = None;
                    return self.dispatch_single_event(
                        &SceneGraphEvent::DoubleClick(SceneDoubleClickEvent {
                            position,
                            mark_instance,
                        }),
                        instant,
                    );
                }
            }
            self.last_click = Some((instant, position));
        }

        self.dispatch_single_event(
            &SceneGraphEvent::Click(SceneClickEvent {
                position,
                button,
                mark_instance,
            }),
            instant,
        )
    }
}
