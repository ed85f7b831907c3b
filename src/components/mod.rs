pub mod lineage_graph;
pub mod notification;
pub mod upload_panel;
