//! Command implementations.
//!
//! Each submodule handles a specific CLI command.

mod compare;
mod index;

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Compare {
            actual,
            expected,
            compare,
        } => compare::cmd_compare(actual, expected, compare),
        Commands::Index { path, head } => index::cmd_index(path, *head),
    }
}
