// ============================================================================
// clipshrink-core/src/external/handbrake_executor.rs
// ============================================================================
//
// HANDBRAKE EXECUTOR: Encoder Process Management and Abstraction
//
// Runs HandBrakeCLI to completion with its output streams discarded. The
// caller gets the exit status back and decides, together with the presence
// of the output file, whether the encode succeeded.

use crate::error::{CoreResult, command_start_error};
use crate::external::program_label;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Trait representing something that can run the encoder to completion.
pub trait EncoderSpawner {
    /// Runs the encoder with `args` and blocks until it exits.
    fn run(&self, args: &[OsString]) -> CoreResult<ExitStatus>;
}

/// Runs the real HandBrakeCLI executable.
#[derive(Debug, Clone)]
pub struct HandBrakeCli {
    program: PathBuf,
}

impl HandBrakeCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for HandBrakeCli {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HANDBRAKE_PROGRAM)
    }
}

impl EncoderSpawner for HandBrakeCli {
    fn run(&self, args: &[OsString]) -> CoreResult<ExitStatus> {
        let label = program_label(&self.program);
        log::debug!("Running {} {:?}", label, args);

        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| command_start_error(label, e))
    }
}
