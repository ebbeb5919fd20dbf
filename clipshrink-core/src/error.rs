// ============================================================================
// clipshrink-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// Every fallible operation in the core library returns `CoreResult<T>`.
// Run-aborting conditions (bad root, nothing to process) and per-file
// conditions (staging collision, encoder failure, empty source) share one
// enum; the orchestrator decides which ones stop the run, and the CLI
// maps them onto exit codes.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the clipshrink core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Directory traversal failed: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Root directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("No video files found under {}", .0.display())]
    NoFilesFound(PathBuf),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Staging destination already exists: {}", .destination.display())]
    StagingCollision { candidate: PathBuf, destination: PathBuf },

    #[error("Cannot restore {}: original path is occupied", .0.display())]
    RestoreConflict(PathBuf),

    #[error("Encoder exited cleanly but produced no output at {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("Encoder failed with {status} and produced no output at {}", .output.display())]
    EncoderFailed { output: PathBuf, status: ExitStatus },

    #[error("Encoder exited with {status} but left output at {}", .output.display())]
    ExitStatusMismatch { output: PathBuf, status: ExitStatus },

    #[error("Source file is empty, cannot compute savings: {}", .0.display())]
    EmptySource(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result alias used across the core library.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds the error for a process that could not be spawned.
pub fn command_start_error(cmd_name: impl Into<String>, err: io::Error) -> CoreError {
    if err.kind() == io::ErrorKind::NotFound {
        log::warn!("Dependency not found while starting command: {}", err);
    }
    CoreError::CommandStart(cmd_name.into(), err)
}

/// Builds the error for a process that ran and exited unsuccessfully.
pub fn command_failed_error(
    cmd_name: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd_name.into(), status, stderr.into())
}
