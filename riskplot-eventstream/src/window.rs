/// Native window events, in logical coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    WindowResize(WindowResizeEvent),
    WindowFocused(bool),
    MouseInput(WindowMouseInput),
    CursorMoved(WindowCursorMoved),
    CursorLeft,
}

impl WindowEvent {
    pub fn position(&self) -> Option<[f32; 2]> {
        match self {
            Self::CursorMoved(event) => Some(event.position),
            _ => None,
        }
    }

    pub fn cursor_moved(position: [f32; 2]) -> Self {
        Self::CursorMoved(WindowCursorMoved { position })
    }

    pub fn mouse_input(state: ElementState, button: MouseButton) -> Self {
        Self::MouseInput(WindowMouseInput { state, button })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowResizeEvent {
    pub size: [f32; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowMouseInput {
    pub state: ElementState,
    pub button: MouseButton,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowCursorMoved {
    pub position: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}
