// ============================================================================
// clipshrink-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with External CLI Tools and File System
//
// This module encapsulates every process launch and every file size lookup
// the pipeline performs. Each boundary is a trait with one concrete
// implementation, so tests can substitute their own.
//
// KEY COMPONENTS:
// - ProbeExecutor / FfprobeCli: frame rate query through ffprobe
// - EncoderSpawner / HandBrakeCli: re-encode through HandBrakeCLI
// - FileMetadataProvider / StdFsMetadataProvider: file sizes
// - check_dependency: verifies a tool can be started before a run

use crate::error::{CoreError, CoreResult};

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// HandBrake argument building and encode parameters
pub mod handbrake;

/// Trait and implementation for running the encoder
pub mod handbrake_executor;

/// Trait and implementation for running the prober
pub mod ffprobe_executor;

pub use ffprobe_executor::{FfprobeCli, ProbeExecutor};
pub use handbrake::{EncodeParams, build_handbrake_args};
pub use handbrake_executor::{EncoderSpawner, HandBrakeCli};

/// Checks if a required external command is available and executable.
///
/// Runs the command with `version_arg` and discards its output. Only the
/// ability to start the process matters; the exit status is ignored because
/// some tools return non-zero for their version flag.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(program: &Path, version_arg: &str) -> CoreResult<()> {
    let display_name = program.display().to_string();

    let result = Command::new(program)
        .arg(version_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", display_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", display_name);
            Err(CoreError::DependencyNotFound(display_name))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", display_name, e);
            Err(CoreError::CommandStart(display_name, e))
        }
    }
}

/// Name of a program for log and error messages.
pub(crate) fn program_label(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or_else(|| OsStr::new("?"))
        .to_string_lossy()
        .into_owned()
}

// ============================================================================
// FILE METADATA ACCESS
// ============================================================================

/// Trait for abstracting file metadata access operations.
///
/// # Examples
///
/// ```rust
/// use clipshrink_core::external::FileMetadataProvider;
/// use clipshrink_core::CoreResult;
/// use std::path::Path;
///
/// struct FixedSize;
///
/// impl FileMetadataProvider for FixedSize {
///     fn get_size(&self, _path: &Path) -> CoreResult<u64> {
///         Ok(1_000_000)
///     }
/// }
///
/// assert_eq!(FixedSize.get_size(Path::new("/fake/path")).unwrap(), 1_000_000);
/// ```
pub trait FileMetadataProvider {
    /// Gets the size of the file at the given path in bytes.
    fn get_size(&self, path: &Path) -> CoreResult<u64>;
}

/// Standard implementation of FileMetadataProvider using std::fs::metadata.
#[derive(Debug, Clone, Default)]
pub struct StdFsMetadataProvider;

impl FileMetadataProvider for StdFsMetadataProvider {
    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        Ok(std::fs::metadata(path)?.len())
    }
}
