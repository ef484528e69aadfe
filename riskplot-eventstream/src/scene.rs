use riskplot_scenegraph::marks::mark::MarkInstance;

use crate::window::{MouseButton, WindowResizeEvent};

/// Window events resolved against the scene graph
#[derive(Debug, Clone, PartialEq)]
pub enum SceneGraphEvent {
    MouseDown(SceneMouseDownEvent),
    MouseUp(SceneMouseUpEvent),
    Click(SceneClickEvent),
    DoubleClick(SceneDoubleClickEvent),
    CursorMoved(SceneCursorMovedEvent),
    MouseEnter(SceneMouseEnterEvent),
    MouseLeave(SceneMouseLeaveEvent),
    WindowResize(WindowResizeEvent),
    WindowFocused(bool),
}

impl SceneGraphEvent {
    pub fn position(&self) -> Option<[f32; 2]> {
        match self {
            Self::MouseDown(event) => Some(event.position),
            Self::MouseUp(event) => Some(event.position),
            Self::Click(event) => Some(event.position),
            Self::DoubleClick(event) => Some(event.position),
            Self::CursorMoved(event) => Some(event.position),
            Self::MouseEnter(event) => Some(event.position),
            Self::MouseLeave(event) => Some(event.position),
            Self::WindowResize(_) | Self::WindowFocused(_) => None,
        }
    }

    pub fn mark_instance(&self) -> Option<&MarkInstance> {
        match self {
            Self::MouseDown(event) => event.mark_instance.as_ref(),
            Self::MouseUp(event) => event.mark_instance.as_ref(),
            Self::Click(event) => event.mark_instance.as_ref(),
            Self::DoubleClick(event) => event.mark_instance.as_ref(),
            Self::CursorMoved(event) => event.mark_instance.as_ref(),
            Self::MouseEnter(event) => Some(&event.mark_instance),
            Self::MouseLeave(event) => Some(&event.mark_instance),
            Self::WindowResize(_) | Self::WindowFocused(_) => None,
        }
    }

    pub fn event_type(&self) -> SceneGraphEventType {
        match self {
            Self::MouseDown(..) => SceneGraphEventType::MouseDown,
            Self::MouseUp(..) => SceneGraphEventType::MouseUp,
            Self::Click(..) => SceneGraphEventType::Click,
            Self::DoubleClick(..) => SceneGraphEventType::DoubleClick,
            Self::CursorMoved(..) => SceneGraphEventType::CursorMoved,
            Self::MouseEnter(..) => SceneGraphEventType::MarkMouseEnter,
            Self::MouseLeave(..) => SceneGraphEventType::MarkMouseLeave,
            Self::WindowResize(..) => SceneGraphEventType::WindowResize,
            Self::WindowFocused(..) => SceneGraphEventType::WindowFocused,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneGraphEventType {
    MouseDown,
    MouseUp,
    Click,
    DoubleClick,
    CursorMoved,
    MarkMouseEnter,
    MarkMouseLeave,
    WindowResize,
    WindowFocused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMouseDownEvent {
    pub position: [f32; 2],
    pub button: MouseButton,
    pub mark_instance: Option<MarkInstance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMouseUpEvent {
    pub position: [f32; 2],
    pub button: MouseButton,
    pub mark_instance: Option<MarkInstance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneClickEvent {
    pub position: [f32; 2],
    pub button: MouseButton,
    pub mark_instance: Option<MarkInstance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneDoubleClickEvent {
    pub position: [f32; 2],
    pub mark_instance: Option<MarkInstance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneCursorMovedEvent {
    pub position: [f32; 2],
    pub mark_instance: Option<MarkInstance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMouseEnterEvent {
    pub position: [f32; 2],
    pub mark_instance: MarkInstance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMouseLeaveEvent {
    pub position: [f32; 2],
    pub mark_instance: MarkInstance,
}
