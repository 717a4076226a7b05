pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod graph;
pub mod lang;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod syntax;

pub use error::{AnalysisError, ParseWarning};
pub use pipeline::{analyze, Analysis, Analyzer};
