pub mod group;
pub mod mark;
pub mod rect;
pub mod rule;
pub mod symbol;
pub mod text;
