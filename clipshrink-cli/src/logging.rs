// ============================================================================
// clipshrink-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and Run Log Dispatch
//
// Everything logs through the `log` facade. This module installs a `fern`
// dispatcher with two outputs:
//
// - stderr, at warn level (debug with --verbose), so regular terminal output
//   stays readable
// - an optional run log file, always at debug level, named
//   clipshrink_run_<YYYYMMDD_HHMMSS>.log inside the chosen log directory

use crate::error::{CliErrorContext, CliResult};

use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let name = format!("clipshrink_run_{}.log", clipshrink_cli::logging::get_timestamp());
/// assert_eq!(name.len(), "clipshrink_run_.log".len() + 15);
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// File name of the run log started now.
pub fn run_log_file_name() -> String {
    format!("clipshrink_run_{}.log", get_timestamp())
}

/// Installs the global logger. Returns the run log path when one was opened.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let console = fern::Dispatch::new()
        .level(console_level)
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        .level(LevelFilter::Debug)
        .chain(console);

    let mut log_path = None;
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)
            .cli_with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let path = dir.join(run_log_file_name());
        let file = fern::log_file(&path)
            .cli_with_context(|| format!("Failed to open log file {}", path.display()))?;

        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .level(LevelFilter::Debug)
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} [{}] {}: {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(file),
        );
        log_path = Some(path);
    }

    dispatch
        .apply()
        .map_err(|e| clipshrink_core::CoreError::OperationFailed(format!("Failed to initialize logging: {e}")))?;

    Ok(log_path)
}
