// ============================================================================
// clipshrink-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Failure Context and Exit Codes
//
// The CLI reuses the core error type so every failure, wherever it started,
// is reported the same way. Context added here ends up in
// `CoreError::OperationFailed`.

use clipshrink_core::{CoreError, CoreResult};

use std::fmt;

/// Commands fail with the same error type as the core library.
pub type CliResult<T> = CoreResult<T>;

/// Prefixes a failure with what the CLI was doing when it happened.
///
/// The result is always `CoreError::OperationFailed`, so `main` needs only
/// one way to print it.
pub trait CliErrorContext<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;

    /// Like `cli_context`, but the message is only built on failure.
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", context, core_error))
        })
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", f(), core_error))
        })
    }
}

impl<T> CliErrorContext<T> for Option<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.ok_or_else(|| CoreError::OperationFailed(context.to_string()))
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| CoreError::OperationFailed(f().to_string()))
    }
}

/// Process exit code for a finished command.
///
/// Only problems that stop a run before any file is touched are failures.
/// "Nothing to process" is not one of them.
#[must_use]
pub fn exit_code_for(result: &CliResult<()>) -> i32 {
    match result {
        Ok(()) | Err(CoreError::NoFilesFound(_)) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn context_wraps_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "disk gone"));
        let err = result.cli_context("Failed to create log directory").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation failed: Failed to create log directory: I/O error: disk gone"
        );
    }

    #[test]
    fn option_context() {
        let value: Option<u8> = None;
        let err = value.cli_with_context(|| format!("missing {}", "root")).unwrap_err();
        assert!(matches!(err, CoreError::OperationFailed(ref msg) if msg == "missing root"));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code_for(&Ok(())), 0);
        assert_eq!(exit_code_for(&Err(CoreError::NoFilesFound(PathBuf::from("/r")))), 0);
        assert_eq!(exit_code_for(&Err(CoreError::RootNotFound(PathBuf::from("/r")))), 1);
    }
}
