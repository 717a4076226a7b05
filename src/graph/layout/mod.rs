// src/graph/layout/mod.rs
//! Node placement strategies.

pub mod layered;
pub mod zoned;

pub use zoned::{Zone, Zones};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use crate::config::{LayoutConfig, LayoutStrategy};
use crate::graph::model::{Graph, Position};

/// Positions every node with the configured strategy.
#[must_use]
pub fn apply(graph: &Graph, config: &LayoutConfig) -> Graph {
    match config.strategy {
        LayoutStrategy::Layered => layered::layout(graph, config),
        LayoutStrategy::Zoned => {
            let mut rng = seeded_rng(config.seed);
            zoned::layout(graph, config, &mut rng)
        }
    }
}

/// A seeded generator, or one from OS entropy when no seed is given.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// Translates all positions so `id` lands at the canvas centre.
/// Returns `None` if `id` is not in the graph.
#[must_use]
pub fn center_on(graph: &Graph, id: &Path, config: &LayoutConfig) -> Option<Graph> {
    let target = graph.node(id)?.position();
    let dx = config.canvas_width / 2.0 - target.x;
    let dy = config.canvas_height / 2.0 - target.y;
    Some(graph.annotate(|_, node| {
        node.position = Position::new(node.position.x + dx, node.position.y + dy);
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::build;
    use crate::graph::model::SourceFile;
    use std::path::PathBuf;

    #[test]
    fn test_center_on() {
        let files = vec![
            SourceFile {
                path: PathBuf::from("/r/a.ts"),
                display_name: "a.ts".into(),
                dependencies: vec![PathBuf::from("/r/b.ts")],
            },
            SourceFile {
                path: PathBuf::from("/r/b.ts"),
                display_name: "b.ts".into(),
                dependencies: Vec::new(),
            },
        ];
        let config = LayoutConfig::default();
        let placed = apply(&build(&files), &config);
        let before = placed.node(Path::new("/r/a.ts")).map(|n| n.position());

        let Some(centered) = center_on(&placed, Path::new("/r/b.ts"), &config) else {
            panic!("b.ts is in the graph");
        };
        let b = centered.node(Path::new("/r/b.ts")).map(|n| n.position());
        assert_eq!(b, Some(Position::new(1000.0, 600.0)));
        assert_eq!(placed.node(Path::new("/r/a.ts")).map(|n| n.position()), before);
        assert!(center_on(&placed, Path::new("/r/none.ts"), &config).is_none());
    }
}
