//! Command dispatch, kept out of the binary.

use super::args::Commands;
use super::handlers::{handle_analyze, handle_metrics, AnalyzeArgs};
use crate::exit::DepscopeExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<DepscopeExit> {
    match command {
        Commands::Analyze {
            path,
            layout,
            seed,
            config,
            format,
            pretty,
            focus,
        } => handle_analyze(AnalyzeArgs {
            path,
            layout,
            seed,
            config,
            format,
            pretty,
            focus,
        }),
        Commands::Metrics {
            file,
            stdin,
            name,
            pretty,
        } => handle_metrics(file, stdin, &name, pretty),
    }
}

/// Maps a failed command to its exit code.
#[must_use]
pub fn exit_for(err: &anyhow::Error) -> DepscopeExit {
    err.downcast_ref::<crate::error::AnalysisError>()
        .map_or(DepscopeExit::Error, |e| DepscopeExit::from(e.class()))
}
