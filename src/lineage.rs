//! Flat analysis rows -> node/edge graph with fixed grid positions.
//!
//! The layout deliberately stays trivial: tables stack down the left,
//! each table's columns sit one fixed offset to the right, staggered in
//! bands of five. No layout algorithm runs after this.

use std::collections::HashMap;

use crate::components::lineage_graph::{GraphEdge, GraphNode, LineageGraph, NodeKind};
use crate::model::AnalysisResult;

const TABLE_X: f64 = 100.0;
const TABLE_V_SPACING: f64 = 300.0;
const COLUMN_X_OFFSET: f64 = 300.0;
const COLUMN_V_SPACING: f64 = 60.0;
const COLUMN_BAND: usize = 5;

/// Build the lineage graph from the analysis rows.
///
/// One table node per distinct `table` (ordered by first appearance),
/// one column node and one containment edge per row. A column's vertical
/// slot comes from the row's index in the *full* list, so columns of
/// interleaved tables stagger rather than stack.
pub fn build_lineage_graph(rows: &[AnalysisResult]) -> LineageGraph {
	let mut nodes = Vec::new();
	let mut edges = Vec::with_capacity(rows.len());
	let mut table_positions: HashMap<&str, (f64, f64)> = HashMap::new();

	for row in rows {
		if !table_positions.contains_key(row.table.as_str()) {
			let position = (TABLE_X, table_positions.len() as f64 * TABLE_V_SPACING);
			table_positions.insert(row.table.as_str(), position);
			nodes.push(GraphNode {
				id: row.table.clone(),
				label: row.table.clone(),
				description: None,
				kind: NodeKind::Table,
				x: position.0,
				y: position.1,
			});
		}
	}

	for (index, row) in rows.iter().enumerate() {
		let (tx, ty) = table_positions[row.table.as_str()];
		let column_id = format!("{}.{}", row.table, row.column);
		nodes.push(GraphNode {
			id: column_id.clone(),
			label: row.column.clone(),
			description: Some(row.description.clone()),
			kind: NodeKind::Column,
			x: tx + COLUMN_X_OFFSET,
			y: ty + (index % COLUMN_BAND) as f64 * COLUMN_V_SPACING,
		});
		edges.push(GraphEdge {
			id: format!("{}-{}", row.table, row.column),
			source: row.table.clone(),
			target: column_id,
		});
	}

	LineageGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn row(table: &str, column: &str) -> AnalysisResult {
		AnalysisResult {
			table: table.into(),
			column: column.into(),
			description: format!("{table}.{column} description"),
		}
	}

	fn tables(graph: &LineageGraph) -> Vec<&GraphNode> {
		graph
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Table)
			.collect()
	}

	fn columns(graph: &LineageGraph) -> Vec<&GraphNode> {
		graph
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Column)
			.collect()
	}

	#[test]
	fn empty_input_yields_empty_graph() {
		let graph = build_lineage_graph(&[]);
		assert!(graph.nodes.is_empty());
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn one_table_node_per_distinct_table() {
		let rows = vec![
			row("users", "id"),
			row("orders", "id"),
			row("users", "email"),
			row("orders", "total"),
		];
		let graph = build_lineage_graph(&rows);
		assert_eq!(tables(&graph).len(), 2);
		assert_eq!(columns(&graph).len(), rows.len());
		assert_eq!(graph.edges.len(), rows.len());
	}

	#[test]
	fn column_ids_and_edge_endpoints_match_owner() {
		let rows = vec![row("users", "id"), row("users", "email")];
		let graph = build_lineage_graph(&rows);
		let cols = columns(&graph);
		assert_eq!(cols[0].id, "users.id");
		assert_eq!(cols[1].id, "users.email");
		for (edge, col) in graph.edges.iter().zip(&cols) {
			assert_eq!(edge.source, "users");
			assert_eq!(edge.target, col.id);
		}
		assert_eq!(graph.edges[0].id, "users-id");
	}

	#[test]
	fn tables_stack_in_first_appearance_order() {
		let rows = vec![row("b", "x"), row("a", "y"), row("b", "z")];
		let graph = build_lineage_graph(&rows);
		let tabs = tables(&graph);
		assert_eq!(tabs[0].id, "b");
		assert_eq!(tabs[1].id, "a");
		assert_eq!((tabs[0].x, tabs[0].y), (100.0, 0.0));
		assert_eq!((tabs[1].x, tabs[1].y), (100.0, 300.0));
	}

	#[test]
	fn columns_sit_right_of_their_table_staggered_by_global_index() {
		let rows = vec![
			row("users", "id"),
			row("users", "email"),
			row("orders", "id"),
		];
		let graph = build_lineage_graph(&rows);
		let cols = columns(&graph);
		// users at y=0, orders at y=300; slots use the global row index
		assert_eq!((cols[0].x, cols[0].y), (400.0, 0.0));
		assert_eq!((cols[1].x, cols[1].y), (400.0, 60.0));
		assert_eq!((cols[2].x, cols[2].y), (400.0, 420.0));
	}

	#[test]
	fn column_slot_wraps_after_five_rows() {
		let rows: Vec<_> = (0..7).map(|i| row("t", &format!("c{i}"))).collect();
		let graph = build_lineage_graph(&rows);
		let cols = columns(&graph);
		assert_eq!(cols[4].y, 240.0);
		assert_eq!(cols[5].y, 0.0);
		assert_eq!(cols[6].y, 60.0);
	}

	#[test]
	fn descriptions_ride_on_column_nodes_only() {
		let rows = vec![row("users", "id")];
		let graph = build_lineage_graph(&rows);
		assert!(tables(&graph)[0].description.is_none());
		assert_eq!(
			columns(&graph)[0].description.as_deref(),
			Some("users.id description")
		);
	}
}
