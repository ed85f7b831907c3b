use std::collections::{HashMap, HashSet};

use super::types::{LineageGraph, NodeKind};

pub const TABLE_NODE_W: f64 = 180.0;
pub const TABLE_NODE_H: f64 = 44.0;
pub const COLUMN_NODE_W: f64 = 150.0;
pub const COLUMN_NODE_H: f64 = 36.0;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;
const FIT_PADDING: f64 = 40.0;

/// One laid-out node with a mutable position (nodes stay draggable).
#[derive(Clone, Debug)]
pub struct VisualNode {
	pub label: String,
	pub description: Option<String>,
	pub kind: NodeKind,
	pub x: f64,
	pub y: f64,
}

impl VisualNode {
	pub fn size(&self) -> (f64, f64) {
		match self.kind {
			NodeKind::Table => (TABLE_NODE_W, TABLE_NODE_H),
			NodeKind::Column => (COLUMN_NODE_W, COLUMN_NODE_H),
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

pub struct LineageGraphState {
	pub nodes: Vec<VisualNode>,
	pub edges: Vec<(usize, usize)>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl LineageGraphState {
	pub fn new(data: &LineageGraph, width: f64, height: f64) -> Self {
		let mut id_to_idx = HashMap::new();
		let nodes: Vec<VisualNode> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				id_to_idx.insert(node.id.clone(), i);
				VisualNode {
					label: node.label.clone(),
					description: node.description.clone(),
					kind: node.kind,
					x: node.x,
					y: node.y,
				}
			})
			.collect();

		// Edges with an unknown endpoint are silently skipped.
		let edges = data
			.edges
			.iter()
			.filter_map(|edge| {
				match (id_to_idx.get(&edge.source), id_to_idx.get(&edge.target)) {
					(Some(&src), Some(&tgt)) => Some((src, tgt)),
					_ => None,
				}
			})
			.collect();

		let mut state = Self {
			nodes,
			edges,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		};
		state.fit_view();
		state
	}

	/// Zoom and center so the whole graph is visible, never zooming in
	/// past 1:1.
	pub fn fit_view(&mut self) {
		let Some(first) = self.nodes.first() else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};

		let (fw, fh) = first.size();
		let (mut min_x, mut min_y) = (first.x, first.y);
		let (mut max_x, mut max_y) = (first.x + fw, first.y + fh);
		for node in &self.nodes[1..] {
			let (w, h) = node.size();
			min_x = min_x.min(node.x);
			min_y = min_y.min(node.y);
			max_x = max_x.max(node.x + w);
			max_y = max_y.max(node.y + h);
		}

		let (bw, bh) = (max_x - min_x, max_y - min_y);
		let k = ((self.width - 2.0 * FIT_PADDING) / bw)
			.min((self.height - 2.0 * FIT_PADDING) / bh)
			.clamp(MIN_ZOOM, 1.0);
		self.transform.k = k;
		self.transform.x = (self.width - bw * k) / 2.0 - min_x * k;
		self.transform.y = (self.height - bh * k) / 2.0 - min_y * k;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		// Reverse order so the node drawn on top wins.
		self.nodes.iter().enumerate().rev().find_map(|(i, node)| {
			let (w, h) = node.size();
			let hit = gx >= node.x && gx <= node.x + w && gy >= node.y && gy <= node.y + h;
			hit.then_some(i)
		})
	}

	pub fn move_node(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.x = x;
			node.y = y;
		}
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Advance edge-flow and hover-highlight animation. Positions are
	/// fixed; nothing else moves here.
	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lineage::build_lineage_graph;
	use crate::model::AnalysisResult;

	fn sample_state() -> LineageGraphState {
		let rows = vec![
			AnalysisResult {
				table: "users".into(),
				column: "id".into(),
				description: "pk".into(),
			},
			AnalysisResult {
				table: "users".into(),
				column: "email".into(),
				description: "login".into(),
			},
		];
		LineageGraphState::new(&build_lineage_graph(&rows), 800.0, 600.0)
	}

	#[test]
	fn edges_resolve_to_node_indices() {
		let state = sample_state();
		assert_eq!(state.nodes.len(), 3);
		assert_eq!(state.edges, vec![(0, 1), (0, 2)]);
	}

	#[test]
	fn unknown_edge_endpoints_are_skipped() {
		let mut graph = build_lineage_graph(&[]);
		graph.edges.push(crate::components::lineage_graph::GraphEdge {
			id: "a-b".into(),
			source: "a".into(),
			target: "a.b".into(),
		});
		let state = LineageGraphState::new(&graph, 800.0, 600.0);
		assert!(state.edges.is_empty());
	}

	#[test]
	fn fit_view_keeps_bounds_inside_viewport() {
		let state = sample_state();
		let k = state.transform.k;
		assert!(k > 0.0 && k <= 1.0);
		// Top-left corner of the layout lands inside the canvas.
		let sx = 100.0 * k + state.transform.x;
		let sy = 0.0 * k + state.transform.y;
		assert!(sx >= 0.0 && sx <= state.width);
		assert!(sy >= 0.0 && sy <= state.height);
	}

	#[test]
	fn node_hit_test_respects_rect_bounds() {
		let mut state = sample_state();
		state.transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		// Table node occupies (100,0)..(280,44) in world space.
		assert_eq!(state.node_at_position(110.0, 10.0), Some(0));
		assert_eq!(state.node_at_position(290.0, 10.0), None);
		// Column node "users.id" occupies (400,0)..(550,36).
		assert_eq!(state.node_at_position(410.0, 30.0), Some(1));
	}

	#[test]
	fn hover_collects_neighbors_across_edge_direction() {
		let mut state = sample_state();
		state.set_hover(Some(0));
		assert_eq!(state.hover.neighbors, HashSet::from([1, 2]));
		state.set_hover(Some(2));
		assert_eq!(state.hover.neighbors, HashSet::from([0]));
	}

	#[test]
	fn clearing_hover_fades_out_then_resets() {
		let mut state = sample_state();
		state.set_hover(Some(0));
		for _ in 0..120 {
			state.tick(0.016);
		}
		assert!(state.hover.highlight_t > 0.5);

		state.set_hover(None);
		assert_eq!(state.hover.prev_node, Some(0));
		assert!(state.has_active_highlight());
		for _ in 0..300 {
			state.tick(0.016);
		}
		assert_eq!(state.hover.highlight_t, 0.0);
		assert!(!state.has_active_highlight());
	}

	#[test]
	fn zoom_is_clamped_and_anchored() {
		let mut state = sample_state();
		state.transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		};
		for _ in 0..100 {
			state.zoom_at(400.0, 300.0, 1.1);
		}
		assert_eq!(state.transform.k, 10.0);
		// The anchor point maps back to itself.
		let (gx, gy) = state.screen_to_graph(400.0, 300.0);
		assert!((gx * state.transform.k + state.transform.x - 400.0).abs() < 1e-6);
		assert!((gy * state.transform.k + state.transform.y - 300.0).abs() < 1e-6);
	}

	#[test]
	fn dragging_moves_only_the_target_node() {
		let mut state = sample_state();
		let before = (state.nodes[2].x, state.nodes[2].y);
		state.move_node(1, 42.0, 17.0);
		assert_eq!((state.nodes[1].x, state.nodes[1].y), (42.0, 17.0));
		assert_eq!((state.nodes[2].x, state.nodes[2].y), before);
	}
}
