mod component;
mod render;

pub use component::{LayoutResult, SankeyDiagram, is_drawable};
