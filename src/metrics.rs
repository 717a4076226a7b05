// src/metrics.rs
//! Descriptive per-file metrics and heuristic file classification.
//!
//! Independent of the graph run: callers hand in one file's text on demand.
//! A file that fails to parse still yields a result, with zero structural
//! counts and flags guessed from its name.

use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{AnalysisError, Result};
use crate::lang::Dialect;
use crate::syntax::{ParsedSource, SyntaxItem, Visitor};

static TEST_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[._-])(test|spec)s?\.[cm]?[jt]sx?$")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static CONFIG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[._-])(config|settings|rc)\.[cm]?[jt]s$|^\..*rc\.[cm]?[jt]s$")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static COMPONENT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9]*\.[jt]sx$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

const TEST_CALLEES: &[&str] = &["describe", "it", "test", "expect"];

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetrics {
    pub function_count: usize,
    pub class_count: usize,
    pub interface_count: usize,
    pub type_alias_count: usize,
    pub export_count: usize,
    pub import_count: usize,
    /// Decision points plus one.
    pub complexity: usize,
    pub lines_of_code: usize,
    pub is_component: bool,
    pub is_config: bool,
    pub is_test: bool,
    pub uses_types: bool,
    /// Set when the text did not parse and the counts are a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

/// Computes metrics for one file's text. Never fails.
#[must_use]
pub fn extract(file_name: &str, content: &str) -> FileMetrics {
    let hints = NameHints::from_name(file_name);
    let lines_of_code = count_lines(content);

    let parsed = match ParsedSource::parse(content, Dialect::for_path(Path::new(file_name))) {
        Ok(parsed) => parsed,
        Err(message) => {
            tracing::warn!(file = file_name, "metrics fallback: {message}");
            return FileMetrics {
                lines_of_code,
                is_component: hints.component,
                is_config: hints.config,
                is_test: hints.test,
                uses_types: hints.typed,
                parse_error: Some(message),
                ..FileMetrics::default()
            };
        }
    };

    let mut tally = Tally::default();
    parsed.walk(&mut tally);

    FileMetrics {
        function_count: tally.functions,
        class_count: tally.classes,
        interface_count: tally.interfaces,
        type_alias_count: tally.type_aliases,
        export_count: tally.exports,
        import_count: tally.imports,
        complexity: 1 + tally.branches,
        lines_of_code,
        is_component: tally.jsx || hints.component,
        is_config: hints.config,
        is_test: hints.test || tally.test_calls,
        uses_types: tally.typed,
        parse_error: None,
    }
}

/// Reads a file and computes its metrics.
///
/// # Errors
/// Returns `Input` for an empty path and `NotFound` if the file is
/// missing or unreadable.
pub fn extract_path(path: &Path) -> Result<FileMetrics> {
    if path.as_os_str().is_empty() {
        return Err(AnalysisError::input("File path is required"));
    }
    let content = fs::read_to_string(path).map_err(|_| AnalysisError::NotFound {
        what: "File",
        path: path.to_path_buf(),
    })?;
    let name = path
        .file_name()
        .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy());
    Ok(extract(&name, &content))
}

fn count_lines(content: &str) -> usize {
    content.lines().filter(|l| !l.trim().is_empty()).count()
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Default)]
struct NameHints {
    component: bool,
    config: bool,
    test: bool,
    typed: bool,
}

impl NameHints {
    fn from_name(file_name: &str) -> Self {
        let base = Path::new(file_name)
            .file_name()
            .map_or_else(|| file_name.to_string(), |n| n.to_string_lossy().into_owned());
        let ext = Path::new(&base)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self {
            component: COMPONENT_NAME_RE.is_match(&base),
            config: CONFIG_NAME_RE.is_match(&base),
            test: TEST_NAME_RE.is_match(&base) || file_name.contains("__tests__"),
            typed: matches!(ext, "ts" | "tsx" | "mts" | "cts"),
        }
    }
}

#[derive(Default)]
#[allow(clippy::struct_excessive_bools)]
struct Tally {
    functions: usize,
    classes: usize,
    interfaces: usize,
    type_aliases: usize,
    exports: usize,
    imports: usize,
    branches: usize,
    jsx: bool,
    typed: bool,
    test_calls: bool,
}

impl<'a> Visitor<'a> for Tally {
    fn visit(&mut self, item: SyntaxItem<'a>) {
        match item {
            SyntaxItem::Import { .. } => self.imports += 1,
            SyntaxItem::ExportFrom { .. } | SyntaxItem::ExportAll { .. } | SyntaxItem::LocalExport => {
                self.exports += 1;
            }
            SyntaxItem::Function { .. } => self.functions += 1,
            SyntaxItem::Class { .. } => self.classes += 1,
            SyntaxItem::Interface { .. } => {
                self.interfaces += 1;
                self.typed = true;
            }
            SyntaxItem::TypeAlias { .. } => {
                self.type_aliases += 1;
                self.typed = true;
            }
            SyntaxItem::TypeAnnotation => self.typed = true,
            SyntaxItem::Call { callee } => {
                let head = callee.split('.').next().unwrap_or(callee);
                if TEST_CALLEES.contains(&head) {
                    self.test_calls = true;
                }
            }
            SyntaxItem::Branch => self.branches += 1,
            SyntaxItem::Jsx => self.jsx = true,
        }
    }
}
