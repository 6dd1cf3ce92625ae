//! Command-line interface for the `canopy` dataset browser.

use std::process::ExitCode;

use canopy::cli::{
    args::{Cli, Commands},
    commands,
    context::CommandContext,
};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // `parse` is a pure diagnostic and must keep working even when an
    // existing canopy.toml is broken
    let ctx = if matches!(cli.command, Commands::Parse(_)) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load()
    };

    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
