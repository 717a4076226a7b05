// src/discovery.rs
use crate::config::ScanConfig;
use crate::error::{AnalysisError, ParseWarning, Result, WarningKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found under a root plus entries that could not be read.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<ParseWarning>,
}

/// Recursively collects supported source files under `root`.
///
/// Ignored directories are pruned by exact name. Unreadable entries are
/// recorded as warnings and skipped. Output is sorted by path.
///
/// # Errors
/// Returns `NotFound` if `root` does not exist.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<ScanOutcome> {
    if !root.exists() {
        return Err(AnalysisError::NotFound {
            what: "Directory",
            path: root.to_path_buf(),
        });
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_pruned(e, config));

    let mut outcome = accumulate_walker(walker, config);
    outcome.files.sort();
    tracing::info!(
        root = %root.display(),
        files = outcome.files.len(),
        skipped = outcome.warnings.len(),
        "scan finished"
    );
    Ok(outcome)
}

fn is_pruned(entry: &walkdir::DirEntry, config: &ScanConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && config.is_ignored(&entry.file_name().to_string_lossy())
}

fn accumulate_walker<I>(walker: I, config: &ScanConfig) -> ScanOutcome
where
    I: Iterator<Item = walkdir::Result<walkdir::DirEntry>>,
{
    let mut outcome = ScanOutcome::default();
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && config.is_supported(entry.path()) {
                    outcome.files.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e.path().map_or_else(PathBuf::new, Path::to_path_buf);
                let warning = ParseWarning::new(&path, WarningKind::Walk, e.to_string());
                warning.log();
                outcome.warnings.push(warning);
            }
        }
    }
    outcome
}

/// Path relative to `root` with forward slashes, for display.
#[must_use]
pub fn display_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
