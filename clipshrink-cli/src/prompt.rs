//! Interactive prompts.
//!
//! Used only when no root folder is passed on the command line. Input is read
//! through `console::Term` on a terminal and from plain stdin otherwise.

use crate::error::{CliErrorContext, CliResult};

use console::Term;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Removes whitespace and any quote characters wrapping a pasted path.
///
/// ```
/// use clipshrink_cli::prompt::strip_path_quotes;
///
/// assert_eq!(strip_path_quotes("  \"/media/Trip 2023\"\n"), "/media/Trip 2023");
/// assert_eq!(strip_path_quotes("'/media/clips'"), "/media/clips");
/// ```
pub fn strip_path_quotes(input: &str) -> &str {
    input.trim().trim_matches(|c| c == '"' || c == '\'')
}

fn read_line(term: &Term) -> CliResult<String> {
    if term.is_term() {
        return term.read_line().cli_context("Failed to read from terminal");
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .cli_context("Failed to read from stdin")?;
    Ok(line)
}

/// Asks for the root folder to process.
///
/// With `stdout_reserved` the question goes to stderr, leaving stdout to
/// machine-readable output.
pub fn prompt_for_root(stdout_reserved: bool) -> CliResult<PathBuf> {
    let term = if stdout_reserved {
        Term::stderr()
    } else {
        Term::stdout()
    };
    term.write_str("Enter the root folder path: ")
        .cli_context("Failed to write prompt")?;
    let line = read_line(&term)?;

    let root = strip_path_quotes(&line);
    if root.is_empty() {
        return Err(clipshrink_core::CoreError::PathError(
            "No root folder given".to_string(),
        ));
    }
    Ok(PathBuf::from(root))
}

/// Blocks until the user presses Enter.
pub fn wait_for_acknowledgement() -> CliResult<()> {
    let term = Term::stdout();
    term.write_line("Press Enter to exit...")
        .cli_context("Failed to write prompt")?;
    read_line(&term).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_and_whitespace_are_stripped() {
        assert_eq!(strip_path_quotes("/media/clips"), "/media/clips");
        assert_eq!(strip_path_quotes("\"C:\\Videos\\Trip\"\r\n"), "C:\\Videos\\Trip");
        assert_eq!(strip_path_quotes("''"), "");
        assert_eq!(strip_path_quotes("   "), "");
    }

    #[test]
    fn inner_quotes_survive() {
        assert_eq!(strip_path_quotes("\"/media/Bob's clips\""), "/media/Bob's clips");
    }
}
