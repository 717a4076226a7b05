// src/error.rs
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Missing or malformed caller input (root path, file path, config file).
    #[error("{message}")]
    Input { message: String },

    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("{operation} failed: {message}")]
    Internal {
        operation: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Coarse outcome class reported to callers (HTTP-style 400 / 404 / 500).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    NotFound,
    Server,
}

impl ErrorClass {
    #[must_use]
    pub fn status(self) -> u16 {
        match self {
            Self::Client => 400,
            Self::NotFound => 404,
            Self::Server => 500,
        }
    }
}

impl AnalysisError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn internal(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Internal {
            operation,
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Input { .. } => ErrorClass::Client,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Internal { .. } => ErrorClass::Server,
        }
    }
}

/// What went wrong with a single file. Collected, never propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    /// The directory walk could not read an entry.
    Walk,
    /// The file could not be read as UTF-8 text.
    Read,
    /// Neither dialect produced an error-free syntax tree.
    Parse,
}

/// A per-file failure that degrades the result without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub path: PathBuf,
    pub kind: WarningKind,
    pub message: String,
}

impl ParseWarning {
    pub fn new(path: &Path, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            message: message.into(),
        }
    }

    /// Emits the warning through the log.
    pub fn log(&self) {
        tracing::warn!(
            path = %self.path.display(),
            kind = ?self.kind,
            "{}",
            self.message
        );
    }
}
