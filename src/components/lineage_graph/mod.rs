mod component;
mod render;
mod state;
mod types;

pub use component::LineageGraphCanvas;
pub use types::{GraphEdge, GraphNode, LineageGraph, NodeKind};
