#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Table,
	Column,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub description: Option<String>,
	pub kind: NodeKind,
	/// Top-left corner in graph (world) coordinates.
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineageGraph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}
