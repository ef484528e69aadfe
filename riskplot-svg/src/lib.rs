pub mod canvas;
pub mod error;
mod marks;

#[cfg(feature = "png")]
pub mod png;

pub use canvas::{scene_graph_to_svg, Canvas, SvgCanvas};
