//! The `parse` command: show the syntax tree for a query without
//! touching any dataset.

use std::process::ExitCode;

use crate::cli::args::ParseCommand;

/// Runs the parse command.
pub fn run(cmd: &ParseCommand) -> ExitCode {
    match canopy_query::parse(&cmd.query) {
        Ok(Some(expr)) => {
            print!("{expr}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("(empty query)");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
