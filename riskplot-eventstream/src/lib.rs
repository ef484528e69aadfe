pub mod manager;
pub mod scene;
pub mod stream;
pub mod window;

pub use scene::{SceneGraphEvent, SceneGraphEventType};
pub use window::{
    ElementState, MouseButton, WindowCursorMoved, WindowEvent, WindowMouseInput,
    WindowResizeEvent,
};
