// clipshrink-cli/src/lib.rs
//
// Library portion of the clipshrink CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, EncodeArgs, PlanArgs};
pub use commands::encode::run_encode;
pub use commands::plan::run_plan;
pub use error::{CliErrorContext, CliResult};
