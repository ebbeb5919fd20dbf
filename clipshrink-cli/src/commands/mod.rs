//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

use crate::error::CliResult;
use crate::prompt::prompt_for_root;

use std::path::PathBuf;

/// Module containing the implementation of the `encode` command.
pub mod encode;

/// Module containing the implementation of the `plan` command.
pub mod plan;

/// The root folder to work on and whether it was typed in interactively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    pub path: PathBuf,
    pub interactive: bool,
}

/// Uses the root given on the command line, or asks for one.
///
/// `json` keeps the prompt off stdout.
pub fn resolve_root(root: Option<PathBuf>, json: bool) -> CliResult<ResolvedRoot> {
    match root {
        Some(path) => Ok(ResolvedRoot {
            path,
            interactive: false,
        }),
        None => Ok(ResolvedRoot {
            path: prompt_for_root(json)?,
            interactive: true,
        }),
    }
}
