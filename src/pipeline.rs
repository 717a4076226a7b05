// src/pipeline.rs
//! End-to-end analysis: scan, extract and resolve per file, then build,
//! mark cycles, classify and lay out the graph.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::discovery;
use crate::error::{AnalysisError, ParseWarning, Result, WarningKind};
use crate::graph::model::{AnalysisStats, Graph, SourceFile};
use crate::graph::{builder, classifier, cycles, imports, layout, resolver, ClassifierConfig};

/// The finished, positioned graph of one run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub root: PathBuf,
    pub graph: Graph,
    pub stats: AnalysisStats,
    pub warnings: Vec<ParseWarning>,
    pub duration_ms: u128,
}

pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the whole pipeline over `root`.
    ///
    /// Root problems fail before any file is read. Per-file problems become
    /// warnings and the file contributes no dependencies.
    ///
    /// # Errors
    /// Returns `Input` for an empty or non-directory root, `NotFound` if it
    /// does not exist, `Internal` if it cannot be canonicalized.
    pub fn analyze(&self, root: &Path) -> Result<Analysis> {
        let start = Instant::now();
        let root = validate_root(root)?;

        let scan = discovery::scan(&root, &self.config.scan)?;
        let mut warnings = scan.warnings;

        let mut loaded: Vec<(SourceFile, Option<ParseWarning>)> = scan
            .files
            .par_iter()
            .map(|path| self.load_source(&root, path))
            .collect();
        loaded.sort_by(|a, b| a.0.path.cmp(&b.0.path));

        let mut files = Vec::with_capacity(loaded.len());
        for (file, warning) in loaded {
            if let Some(w) = warning {
                w.log();
                warnings.push(w);
            }
            files.push(file);
        }

        let graph = builder::build(&files);
        let graph = cycles::detect(&graph);
        let graph = classifier::classify(&graph, &ClassifierConfig::from(&self.config.classify));
        let graph = layout::apply(&graph, &self.config.layout);
        let stats = graph.stats();

        tracing::info!(
            files = stats.total_files,
            edges = stats.total_dependencies,
            circular = stats.circular_dependencies,
            warnings = warnings.len(),
            "analysis finished"
        );

        Ok(Analysis {
            root,
            graph,
            stats,
            warnings,
            duration_ms: start.elapsed().as_millis(),
        })
    }

    /// Node ids are canonical so they match resolver output; a symlink
    /// inside the tree collapses into its target.
    fn load_source(&self, root: &Path, path: &Path) -> (SourceFile, Option<ParseWarning>) {
        let id = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let mut file = SourceFile {
            display_name: discovery::display_name(root, &id),
            path: id,
            dependencies: Vec::new(),
        };

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                return (file, Some(ParseWarning::new(path, WarningKind::Read, e.to_string())));
            }
        };

        let specifiers = match imports::extract(path, &content) {
            Ok(s) => s,
            Err(warning) => return (file, Some(warning)),
        };

        let extensions = &self.config.scan.extensions;
        file.dependencies = specifiers
            .iter()
            .filter_map(|s| resolver::resolve(root, path, s, extensions))
            .collect();
        tracing::debug!(
            file = %file.display_name,
            specifiers = specifiers.len(),
            resolved = file.dependencies.len(),
            "file processed"
        );
        (file, None)
    }
}

/// Convenience wrapper: analyze `root` with `config`.
///
/// # Errors
/// See [`Analyzer::analyze`].
pub fn analyze(root: &Path, config: &Config) -> Result<Analysis> {
    Analyzer::new(config.clone()).analyze(root)
}

fn validate_root(root: &Path) -> Result<PathBuf> {
    if root.as_os_str().is_empty() {
        return Err(AnalysisError::input("Directory path is required"));
    }
    if !root.exists() {
        return Err(AnalysisError::NotFound {
            what: "Directory",
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(AnalysisError::input(format!(
            "Not a directory: {}",
            root.display()
        )));
    }
    std::fs::canonicalize(root).map_err(|e| AnalysisError::internal("canonicalize root", e))
}
