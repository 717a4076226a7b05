// src/lang.rs
use std::path::Path;
use tree_sitter::Language;

/// The two tree-sitter grammars that together cover the ECMAScript family.
///
/// `Tsx` accepts JSX and is used for JavaScript sources too; `TypeScript`
/// accepts angle-bracket type assertions that `Tsx` rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Dialect for a path, defaulting to `Tsx` for unknown extensions.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_ext)
            .unwrap_or(Self::Tsx)
    }

    #[must_use]
    pub fn grammar(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::language_typescript(),
            Self::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }

    /// The other dialect, tried when this one fails to parse a file.
    #[must_use]
    pub fn fallback(self) -> Self {
        match self {
            Self::TypeScript => Self::Tsx,
            Self::Tsx => Self::TypeScript,
        }
    }
}
