// src/graph/layout/layered.rs
//! Layered (hierarchical) placement.
//!
//! Importers sit above what they import. Each node's rank is its longest
//! path from a source node; cycles are broken by releasing the first
//! unranked node in graph order. Rows are placed bottom-up so every parent
//! is centred over the children already placed below it.

use std::collections::VecDeque;

use crate::config::LayoutConfig;
use crate::graph::model::{Graph, Position};

#[must_use]
pub fn layout(graph: &Graph, config: &LayoutConfig) -> Graph {
    let adjacency = graph.successors();
    let ranks = infer_ranks(&adjacency);
    let positions = place_rows(&adjacency, &ranks, config);
    graph.annotate(|i, node| node.position = positions[i])
}

/// Longest-path rank per node; sources are rank 0. Self loops are ignored.
#[must_use]
pub fn infer_ranks(adjacency: &[Vec<usize>]) -> Vec<usize> {
    let n = adjacency.len();
    let mut indegree = vec![0usize; n];
    for (from, targets) in adjacency.iter().enumerate() {
        for &to in targets {
            if to != from {
                indegree[to] += 1;
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut done = vec![false; n];
    let mut ready: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut remaining = n;
    // Nodes below `cursor` are all done, so each cycle opening resumes there.
    let mut cursor = 0;

    loop {
        while let Some(node) = ready.pop_front() {
            if done[node] {
                continue;
            }
            done[node] = true;
            remaining -= 1;
            release_successors(node, adjacency, &mut ranks, &mut indegree, &done, &mut ready);
        }

        if remaining == 0 {
            break;
        }
        // Only cycles are left; open one at its first member.
        while cursor < n && done[cursor] {
            cursor += 1;
        }
        if cursor == n {
            break;
        }
        ready.push_back(cursor);
    }

    ranks
}

fn release_successors(
    node: usize,
    adjacency: &[Vec<usize>],
    ranks: &mut [usize],
    indegree: &mut [usize],
    done: &[bool],
    ready: &mut VecDeque<usize>,
) {
    for &next in &adjacency[node] {
        if next == node || done[next] {
            continue;
        }
        ranks[next] = ranks[next].max(ranks[node] + 1);
        indegree[next] = indegree[next].saturating_sub(1);
        if indegree[next] == 0 {
            ready.push_back(next);
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn place_rows(adjacency: &[Vec<usize>], ranks: &[usize], config: &LayoutConfig) -> Vec<Position> {
    let n = adjacency.len();
    let max_rank = ranks.iter().copied().max().unwrap_or(0);
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for (node, &rank) in ranks.iter().enumerate() {
        rows[rank].push(node);
    }

    let pitch = config.node_width + config.node_separation;
    let row_height = config.node_height + config.rank_separation;
    let mut xs = vec![0.0f64; n];

    for rank in (0..=max_rank).rev() {
        let mut wanted: Vec<(f64, usize)> = rows[rank]
            .iter()
            .enumerate()
            .map(|(slot, &node)| {
                let below: Vec<f64> = adjacency[node]
                    .iter()
                    .filter(|&&child| ranks[child] > rank)
                    .map(|&child| xs[child])
                    .collect();
                let x = if below.is_empty() {
                    slot as f64 * pitch
                } else {
                    below.iter().sum::<f64>() / below.len() as f64
                };
                (x, node)
            })
            .collect();

        wanted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut previous = f64::NEG_INFINITY;
        for (x, node) in wanted {
            let placed = x.max(previous + pitch);
            xs[node] = placed;
            previous = placed;
        }
    }

    (0..n)
        .map(|i| Position::new(xs[i], ranks[i] as f64 * row_height))
        .collect()
}
