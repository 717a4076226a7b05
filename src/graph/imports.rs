// src/graph/imports.rs
use crate::error::{ParseWarning, WarningKind};
use crate::lang::Dialect;
use crate::syntax::{ParsedSource, SyntaxItem, Visitor};
use std::path::Path;

/// Extracts the local import specifiers referenced by a file.
///
/// Covers `import … from`, side-effect imports, `export … from` and
/// `export * from`. Bare package specifiers are dropped: only specifiers
/// starting with `.` or `/` are returned, in source order.
///
/// # Arguments
/// * `path` - File path (used for dialect selection and warnings).
/// * `content` - Source code.
///
/// # Errors
/// Returns a [`ParseWarning`] if the file does not parse in either dialect.
pub fn extract(path: &Path, content: &str) -> Result<Vec<String>, ParseWarning> {
    let parsed = ParsedSource::parse(content, Dialect::for_path(path))
        .map_err(|msg| ParseWarning::new(path, WarningKind::Parse, msg))?;

    let mut collector = SpecifierCollector::default();
    parsed.walk(&mut collector);

    Ok(collector
        .specifiers
        .into_iter()
        .filter(|s| is_local(s))
        .map(str::to_string)
        .collect())
}

/// True for relative (`./`, `../`) and absolute (`/`) specifiers.
#[must_use]
pub fn is_local(specifier: &str) -> bool {
    specifier.starts_with('.') || specifier.starts_with('/')
}

#[derive(Default)]
struct SpecifierCollector<'a> {
    specifiers: Vec<&'a str>,
}

impl<'a> Visitor<'a> for SpecifierCollector<'a> {
    fn visit(&mut self, item: SyntaxItem<'a>) {
        match item {
            SyntaxItem::Import { source }
            | SyntaxItem::ExportFrom { source }
            | SyntaxItem::ExportAll { source } => self.specifiers.push(source),
            SyntaxItem::LocalExport
            | SyntaxItem::Function { .. }
            | SyntaxItem::Class { .. }
            | SyntaxItem::Interface { .. }
            | SyntaxItem::TypeAlias { .. }
            | SyntaxItem::TypeAnnotation
            | SyntaxItem::Call { .. }
            | SyntaxItem::Branch
            | SyntaxItem::Jsx => {}
        }
    }
}
