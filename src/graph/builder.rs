// src/graph/builder.rs
//! Graph construction from resolved source files.

use super::model::{Edge, Graph, Node, SourceFile};

/// Builds the dependency graph: one node per file, one edge per distinct
/// (file, dependency) pair whose dependency is itself a scanned file.
#[must_use]
pub fn build(files: &[SourceFile]) -> Graph {
    let nodes = files.iter().map(Node::new).collect();
    let edges = files.iter().flat_map(|file| {
        file.dependencies
            .iter()
            .map(move |dep| Edge::new(file.path.clone(), dep.clone()))
    });
    let graph = Graph::from_parts(nodes, edges);
    tracing::debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "graph assembled"
    );
    graph
}
