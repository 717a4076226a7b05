// src/graph/classifier.rs
//! Node classification by topology and naming.

use super::model::{Graph, Node, Role};
use crate::config::ClassifyConfig;

/// Configuration thresholds for node classification.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Lowercased basename fragments marking a utility file.
    pub utility_markers: Vec<String>,
    /// Fan-in strictly above this marks a utility file.
    pub fan_in_threshold: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::from(&ClassifyConfig::default())
    }
}

impl From<&ClassifyConfig> for ClassifierConfig {
    fn from(config: &ClassifyConfig) -> Self {
        Self {
            utility_markers: config
                .utility_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            fan_in_threshold: config.fan_in_threshold,
        }
    }
}

/// Returns a copy of `graph` with every node's role assigned.
#[must_use]
pub fn classify(graph: &Graph, config: &ClassifierConfig) -> Graph {
    graph.annotate(|_, node| node.role = classify_node(node, config))
}

/// Classifies one node from its edge counts and basename.
#[must_use]
pub fn classify_node(node: &Node, config: &ClassifierConfig) -> Role {
    if is_standalone(node) {
        return Role::Standalone;
    }
    if has_utility_name(node, config) || is_shared(node, config) {
        return Role::Utility;
    }
    Role::Core
}

fn is_standalone(node: &Node) -> bool {
    node.dependency_count() == 0 && node.dependent_count() == 0
}

fn has_utility_name(node: &Node, config: &ClassifierConfig) -> bool {
    let name = node.label().to_lowercase();
    config.utility_markers.iter().any(|m| name.contains(m.as_str()))
}

fn is_shared(node: &Node, config: &ClassifierConfig) -> bool {
    node.dependent_count() > config.fan_in_threshold
}
