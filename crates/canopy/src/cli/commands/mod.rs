//! CLI command implementations.

mod filter;
mod parse;
mod search;
mod stats;

use std::process::ExitCode;

use crate::cli::{args::Commands, context::CommandContext};

/// Runs the given command and returns its exit code.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Filter(cmd) => filter::run(ctx, &cmd),
        Commands::Stats(cmd) => stats::run(ctx, &cmd),
        Commands::Parse(cmd) => parse::run(&cmd),
    }
}
