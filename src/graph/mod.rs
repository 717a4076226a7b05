// src/graph/mod.rs
//! Dependency graph: extraction, resolution, construction and annotation.

pub mod builder;
pub mod classifier;
pub mod cycles;
pub mod imports;
pub mod layout;
pub mod model;
pub mod resolver;

pub use classifier::ClassifierConfig;
pub use model::{AnalysisStats, Edge, Graph, Node, Position, Role, SourceFile};
