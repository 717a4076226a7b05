// src/constants.rs
//! Defaults for scanning and classification.

/// Directory names never descended into. Matched against the whole name.
pub const PRUNE_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "dist",
    "build",
    "coverage",
    ".vercel",
    "out",
];

/// Supported source extensions, in resolution order.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Basename fragments that mark a file as a shared utility.
pub const UTILITY_MARKERS: &[&str] = &["util", "helper"];

/// Config file looked up at the analysed root.
pub const CONFIG_FILE: &str = "depscope.toml";
