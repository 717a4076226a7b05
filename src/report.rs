// src/report.rs
//! Output formatting for analysis results.

use colored::Colorize;
use serde::Serialize;

use crate::error::{AnalysisError, ParseWarning, Result};
use crate::graph::model::{AnalysisStats, Edge, Node, Role};
use crate::pipeline::Analysis;

/// The wire shape consumed by the rendering layer.
#[derive(Debug, Serialize)]
pub struct GraphReport<'a> {
    pub nodes: &'a [Node],
    pub edges: Vec<&'a Edge>,
    pub stats: AnalysisStats,
    pub warnings: &'a [ParseWarning],
}

impl Analysis {
    #[must_use]
    pub fn report(&self) -> GraphReport<'_> {
        GraphReport {
            nodes: self.graph.nodes(),
            edges: self.graph.edges().collect(),
            stats: self.stats,
            warnings: &self.warnings,
        }
    }
}

/// Serializes any report value as JSON.
///
/// # Errors
/// Returns `Internal` if serialization fails (e.g. a non-UTF-8 path).
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.map_err(|e| AnalysisError::internal("serialize report", e))
}

/// Prints a human-readable summary of a run.
pub fn print_summary(analysis: &Analysis) {
    let stats = analysis.stats;
    println!(
        "\n{} {} files | {} dependencies | {} circular ({}ms)",
        "DEPENDENCY SCAN".cyan().bold(),
        stats.total_files,
        stats.total_dependencies,
        format_count(stats.circular_dependencies),
        analysis.duration_ms,
    );
    println!("  root: {}", analysis.root.display().to_string().dimmed());

    print_roles(analysis);
    print_circular(analysis);
    print_warnings(&analysis.warnings);
}

fn format_count(n: usize) -> String {
    if n == 0 {
        n.to_string().green().to_string()
    } else {
        n.to_string().red().to_string()
    }
}

fn print_roles(analysis: &Analysis) {
    let nodes = analysis.graph.nodes();
    for role in [Role::Core, Role::Utility, Role::Standalone] {
        let count = nodes.iter().filter(|n| n.role() == role).count();
        println!("  {:<11} {count}", role.label());
    }
}

fn print_circular(analysis: &Analysis) {
    let circular: Vec<&Node> = analysis
        .graph
        .nodes()
        .iter()
        .filter(|n| n.is_circular())
        .collect();
    if circular.is_empty() {
        println!("{}", "  ✓ No circular imports.".green());
        return;
    }
    println!("\n{}", "  CIRCULAR IMPORTS".red().bold());
    for node in circular {
        println!(
            "    {} {} (imports {}, imported by {})",
            "↻".red(),
            node.relative_path(),
            node.dependency_count(),
            node.dependent_count()
        );
    }
}

fn print_warnings(warnings: &[ParseWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", format!("  {} file(s) skipped:", warnings.len()).yellow());
    for w in warnings {
        println!("    {} {}", w.path.display(), w.message.dimmed());
    }
}
