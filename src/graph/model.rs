// src/graph/model.rs
//! Core types for the dependency graph.
//!
//! A [`Graph`] is a value: pipeline stages take `&Graph` and return a new
//! one. Edge counts live behind private fields and are derived from the
//! edge set whenever a graph is assembled, so they cannot drift.

use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// One scanned file with its resolved (canonical) dependency paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the scan root, for display.
    pub display_name: String,
    pub dependencies: Vec<PathBuf>,
}

/// Structural role of a file in the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Core,
    Utility,
    Standalone,
}

impl Role {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Utility => "utility",
            Self::Standalone => "standalone",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: PathBuf,
    label: String,
    relative_path: String,
    dependency_count: usize,
    dependent_count: usize,
    pub(crate) is_circular: bool,
    pub(crate) role: Role,
    pub(crate) position: Position,
}

impl Node {
    #[must_use]
    pub fn new(file: &SourceFile) -> Self {
        let label = file
            .path
            .file_name()
            .map_or_else(|| file.display_name.clone(), |n| n.to_string_lossy().into_owned());
        Self {
            id: file.path.clone(),
            label,
            relative_path: file.display_name.clone(),
            dependency_count: 0,
            dependent_count: 0,
            is_circular: false,
            role: Role::default(),
            position: Position::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &Path {
        &self.id
    }

    /// Basename of the file.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Outgoing edge count.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.dependency_count
    }

    /// Incoming edge count (fan-in).
    #[must_use]
    pub fn dependent_count(&self) -> usize {
        self.dependent_count
    }

    #[must_use]
    pub fn is_circular(&self) -> bool {
        self.is_circular
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

/// "`source` imports `target`".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl Edge {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> String {
        format!("e-{}-{}", self.source.display(), self.target.display())
    }
}

impl Serialize for Edge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Edge", 3)?;
        s.serialize_field("id", &self.id())?;
        s.serialize_field("source", &self.source)?;
        s.serialize_field("target", &self.target)?;
        s.end()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_files: usize,
    pub total_dependencies: usize,
    pub circular_dependencies: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<PathBuf, usize>,
    edges: BTreeSet<Edge>,
}

impl Graph {
    /// Assembles a graph, dropping duplicate nodes (first wins) and edges
    /// whose endpoints are not both present, then derives edge counts.
    #[must_use]
    pub fn from_parts(nodes: Vec<Node>, edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut kept = Vec::with_capacity(nodes.len());
        for node in nodes {
            if !index.contains_key(&node.id) {
                index.insert(node.id.clone(), kept.len());
                kept.push(node);
            }
        }

        let edges: BTreeSet<Edge> = edges
            .into_iter()
            .filter(|e| index.contains_key(&e.source) && index.contains_key(&e.target))
            .collect();

        let mut graph = Self {
            nodes: kept,
            index,
            edges,
        };
        graph.recount();
        graph
    }

    fn recount(&mut self) {
        for node in &mut self.nodes {
            node.dependency_count = 0;
            node.dependent_count = 0;
        }
        for edge in &self.edges {
            if let Some(&i) = self.index.get(&edge.source) {
                self.nodes[i].dependency_count += 1;
            }
            if let Some(&i) = self.index.get(&edge.target) {
                self.nodes[i].dependent_count += 1;
            }
        }
    }

    /// Returns a copy with each node passed through `f`. Edges and counts
    /// are untouched; `f` can only reach the annotation fields.
    #[must_use]
    pub(crate) fn annotate(&self, mut f: impl FnMut(usize, &mut Node)) -> Self {
        let mut next = self.clone();
        for (i, node) in next.nodes.iter_mut().enumerate() {
            f(i, node);
        }
        next
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn node(&self, id: &Path) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    #[must_use]
    pub fn index_of(&self, id: &Path) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn contains_edge(&self, source: &Path, target: &Path) -> bool {
        self.edges.contains(&Edge::new(source, target))
    }

    /// Files that `id` imports.
    #[must_use]
    pub fn dependencies(&self, id: &Path) -> Vec<&Path> {
        self.edges
            .iter()
            .filter(|e| e.source == id)
            .map(|e| e.target.as_path())
            .collect()
    }

    /// Files that import `id`.
    #[must_use]
    pub fn dependents(&self, id: &Path) -> Vec<&Path> {
        self.edges
            .iter()
            .filter(|e| e.target == id)
            .map(|e| e.source.as_path())
            .collect()
    }

    /// Outgoing neighbour indices per node, each list sorted by target path.
    #[must_use]
    pub fn successors(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            if let (Some(&s), Some(&t)) = (self.index.get(&edge.source), self.index.get(&edge.target)) {
                adjacency[s].push(t);
            }
        }
        adjacency
    }

    #[must_use]
    pub fn stats(&self) -> AnalysisStats {
        AnalysisStats {
            total_files: self.nodes.len(),
            total_dependencies: self.edges.len(),
            circular_dependencies: self.nodes.iter().filter(|n| n.is_circular).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(path),
            display_name: path.trim_start_matches('/').to_string(),
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn dangling_edges_are_dropped_and_counts_derived() {
        let nodes = vec![Node::new(&file("/p/a.ts")), Node::new(&file("/p/b.ts"))];
        let edges = vec![
            Edge::new("/p/a.ts", "/p/b.ts"),
            Edge::new("/p/a.ts", "/p/b.ts"),
            Edge::new("/p/a.ts", "/elsewhere/c.ts"),
        ];
        let graph = Graph::from_parts(nodes, edges);
        assert_eq!(graph.edge_count(), 1);
        let a = graph.node(Path::new("/p/a.ts"));
        assert_eq!(a.map(Node::dependency_count), Some(1));
        assert_eq!(a.map(Node::label), Some("a.ts"));
        let b = graph.node(Path::new("/p/b.ts"));
        assert_eq!(b.map(Node::dependent_count), Some(1));
        assert_eq!(graph.dependents(Path::new("/p/b.ts")), vec![Path::new("/p/a.ts")]);
    }

    #[test]
    fn annotate_leaves_original_untouched() {
        let graph = Graph::from_parts(vec![Node::new(&file("/p/a.ts"))], Vec::new());
        let next = graph.annotate(|_, n| n.is_circular = true);
        assert!(!graph.nodes()[0].is_circular());
        assert!(next.nodes()[0].is_circular());
        assert_eq!(next.stats().circular_dependencies, 1);
    }

    #[test]
    fn edge_id_format() {
        let edge = Edge::new("/p/a.ts", "/p/b.ts");
        assert_eq!(edge.id(), "e-/p/a.ts-/p/b.ts");
    }
}
