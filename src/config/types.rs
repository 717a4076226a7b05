use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{PRUNE_DIRS, SOURCE_EXTENSIONS, UTILITY_MARKERS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub classify: ClassifyConfig,
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names skipped during the walk (exact name match).
    pub ignore_dirs: Vec<String>,
    /// Extensions without the leading dot, in resolution order.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: PRUNE_DIRS.iter().map(ToString::to_string).collect(),
            extensions: SOURCE_EXTENSIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ScanConfig {
    #[must_use]
    pub fn is_ignored(&self, dir_name: &str) -> bool {
        self.ignore_dirs.iter().any(|d| d == dir_name)
    }

    #[must_use]
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Case-insensitive basename fragments that mark a utility file.
    pub utility_markers: Vec<String>,
    /// More distinct importers than this makes a file a utility.
    pub fan_in_threshold: usize,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            utility_markers: UTILITY_MARKERS.iter().map(ToString::to_string).collect(),
            fan_in_threshold: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Rows by topological rank.
    #[default]
    Layered,
    /// Core/utility/standalone zones with a force-relaxed core.
    Zoned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub strategy: LayoutStrategy,
    /// Seed for the zoned strategy's initial placement. `None` draws from entropy.
    pub seed: Option<u64>,
    pub node_width: f64,
    pub node_height: f64,
    pub rank_separation: f64,
    pub node_separation: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub iterations: usize,
    pub min_separation: f64,
    pub grid_size: f64,
    pub link_distance: f64,
    pub link_strength: f64,
    pub charge_strength: f64,
    pub charge_distance_min: f64,
    pub charge_distance_max: f64,
    pub center_strength: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::Layered,
            seed: None,
            node_width: 160.0,
            node_height: 24.0,
            rank_separation: 100.0,
            node_separation: 80.0,
            canvas_width: 2000.0,
            canvas_height: 1200.0,
            iterations: 300,
            min_separation: 80.0,
            grid_size: 20.0,
            link_distance: 200.0,
            link_strength: 1.0,
            charge_strength: -400.0,
            charge_distance_min: 100.0,
            charge_distance_max: 400.0,
            center_strength: 1.0,
        }
    }
}
