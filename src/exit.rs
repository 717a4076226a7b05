// src/exit.rs
//! Standardized process exit codes for `depscope`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

use crate::error::ErrorClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum DepscopeExit {
    /// Operation completed successfully.
    Success = 0,
    /// Unexpected internal failure.
    Error = 1,
    /// Missing or invalid input (root path, file path, config).
    InvalidInput = 2,
    /// The requested directory or file does not exist.
    NotFound = 3,
}

impl DepscopeExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<ErrorClass> for DepscopeExit {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Client => Self::InvalidInput,
            ErrorClass::NotFound => Self::NotFound,
            ErrorClass::Server => Self::Error,
        }
    }
}

impl Termination for DepscopeExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
