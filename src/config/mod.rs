// src/config/mod.rs
pub mod types;

pub use self::types::{ClassifyConfig, Config, LayoutConfig, LayoutStrategy, ScanConfig};

use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILE;
use crate::error::{AnalysisError, Result};

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration for an analysis of `root`.
    ///
    /// An explicit file must exist and parse. Without one, `depscope.toml`
    /// at the root is used when present; if it is malformed the defaults
    /// are kept and a warning is logged.
    ///
    /// # Errors
    /// Returns `Input` if the explicit config file is missing or malformed.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path).map_err(|e| {
                AnalysisError::input(format!("Cannot read config {}: {e}", path.display()))
            })?;
            return Self::parse_toml(&content).map_err(|e| {
                AnalysisError::input(format!("Invalid config {}: {e}", path.display()))
            });
        }

        let implicit = root.join(CONFIG_FILE);
        let Ok(content) = fs::read_to_string(&implicit) else {
            return Ok(Self::default());
        };
        match Self::parse_toml(&content) {
            Ok(config) => {
                tracing::debug!(path = %implicit.display(), "loaded config");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(path = %implicit.display(), "ignoring invalid config: {e}");
                Ok(Self::default())
            }
        }
    }

    /// Parses a TOML document; absent keys take their defaults.
    ///
    /// # Errors
    /// Returns the TOML error if the document is malformed.
    pub fn parse_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
