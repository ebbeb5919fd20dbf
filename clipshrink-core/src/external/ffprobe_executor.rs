//! FFprobe integration for frame rate queries.
//!
//! The prober is asked for the first video stream's `r_frame_rate` in bare CSV
//! form, which yields a single value such as `30000/1001` or `25/1`.
//! Interpreting that text is the job of `processing::probe`.

use crate::error::{CoreResult, command_failed_error, command_start_error};
use crate::external::program_label;

use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs the frame rate query for one file and returns the raw output.
pub trait ProbeExecutor {
    /// Returns ffprobe's stdout, or an error when the tool could not be
    /// started or exited unsuccessfully.
    fn query_frame_rate(&self, input_path: &Path) -> CoreResult<String>;
}

/// Fixed argument list for the frame rate query, minus the target path.
pub const FRAME_RATE_QUERY_ARGS: &[&str] = &[
    "-v",
    "error",
    "-select_streams",
    "v:0",
    "-show_entries",
    "stream=r_frame_rate",
    "-of",
    "csv=p=0",
];

/// Runs the real ffprobe executable.
#[derive(Debug, Clone)]
pub struct FfprobeCli {
    program: PathBuf,
}

impl FfprobeCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfprobeCli {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FFPROBE_PROGRAM)
    }
}

impl ProbeExecutor for FfprobeCli {
    fn query_frame_rate(&self, input_path: &Path) -> CoreResult<String> {
        let label = program_label(&self.program);
        log::debug!("Running {} for frame rate on: {}", label, input_path.display());

        let output = Command::new(&self.program)
            .args(FRAME_RATE_QUERY_ARGS)
            .arg(input_path)
            .output()
            .map_err(|e| command_start_error(label.clone(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(command_failed_error(label, output.status, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
