// src/cli/handlers.rs
use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::args::OutputFormat;
use crate::config::{Config, LayoutStrategy};
use crate::error::AnalysisError;
use crate::exit::DepscopeExit;
use crate::graph::layout;
use crate::metrics;
use crate::pipeline::Analyzer;
use crate::report;

#[derive(Debug, Clone, Default)]
pub struct AnalyzeArgs {
    pub path: Option<PathBuf>,
    pub layout: Option<LayoutStrategy>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub pretty: bool,
    pub focus: Option<PathBuf>,
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Handles the analyze command.
///
/// # Errors
/// Returns the underlying `AnalysisError` for a bad root, config or focus.
pub fn handle_analyze(args: AnalyzeArgs) -> Result<DepscopeExit> {
    let root = args.path.unwrap_or_else(current_dir);
    let mut config = Config::load(&root, args.config.as_deref())?;
    if let Some(strategy) = args.layout {
        config.layout.strategy = strategy;
    }
    if args.seed.is_some() {
        config.layout.seed = args.seed;
    }

    let analyzer = Analyzer::new(config);
    let mut analysis = analyzer.analyze(&root)?;

    if let Some(focus) = args.focus {
        let id = focus_id(&analysis.root, &focus)?;
        analysis.graph = layout::center_on(&analysis.graph, &id, &analyzer.config().layout)
            .ok_or_else(|| AnalysisError::input(format!("Not in graph: {}", focus.display())))?;
    }

    match args.format {
        OutputFormat::Json => println!("{}", report::to_json(&analysis.report(), args.pretty)?),
        OutputFormat::Text => report::print_summary(&analysis),
    }
    Ok(DepscopeExit::Success)
}

fn focus_id(root: &Path, focus: &Path) -> Result<PathBuf, AnalysisError> {
    let candidate = if focus.is_absolute() {
        focus.to_path_buf()
    } else {
        root.join(focus)
    };
    std::fs::canonicalize(&candidate).map_err(|_| AnalysisError::NotFound {
        what: "File",
        path: candidate,
    })
}

/// Handles the metrics command.
///
/// # Errors
/// Returns `AnalysisError` for a missing file, or an I/O error reading stdin.
pub fn handle_metrics(
    file: Option<PathBuf>,
    stdin: bool,
    name: &str,
    pretty: bool,
) -> Result<DepscopeExit> {
    let result = if stdin {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        metrics::extract(name, &content)
    } else {
        metrics::extract_path(file.as_deref().unwrap_or_else(|| Path::new("")))?
    };
    println!("{}", report::to_json(&result, pretty)?);
    Ok(DepscopeExit::Success)
}
