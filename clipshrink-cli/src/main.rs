// clipshrink-cli/src/main.rs
//
// Entry point for the clipshrink binary.
//
// Parses arguments, installs logging, resolves the root folder (prompting for
// it when none was given), runs the chosen command and maps the outcome onto
// the process exit code. Fatal errors go to stderr in red and exit with 1.
// Finding nothing to process is reported through the run's event handler
// and exits with 0.

use clap::Parser;
use clipshrink_cli::commands::{ResolvedRoot, resolve_root};
use clipshrink_cli::error::{CliResult, exit_code_for};
use clipshrink_cli::logging::init_logging;
use clipshrink_cli::prompt::wait_for_acknowledgement;
use clipshrink_cli::terminal;
use clipshrink_cli::{Cli, Commands, run_encode, run_plan};
use clipshrink_core::CoreError;

use std::process;

fn run(cli: Cli) -> (CliResult<()>, bool) {
    let (root, pause_allowed, json) = match &cli.command {
        Commands::Encode(args) => (args.root.clone(), !args.no_pause && !args.json, args.json),
        Commands::Plan(args) => (args.root.clone(), true, false),
    };

    let root = match resolve_root(root, json) {
        Ok(root) => root,
        Err(e) => return (Err(e), false),
    };
    let ResolvedRoot { path, interactive } = root;
    let pause = interactive && pause_allowed;

    let result = match &cli.command {
        Commands::Encode(args) => run_encode(args, &path).map(|_| ()),
        Commands::Plan(args) => run_plan(args, &path).map(|_| ()),
    };
    (result, pause)
}

fn main() {
    let cli = Cli::parse();

    match init_logging(cli.verbose, cli.log_dir.as_deref()) {
        Ok(Some(path)) => log::info!("Run log: {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            terminal::print_error(&e.to_string());
            process::exit(1);
        }
    }

    let (result, pause) = run(cli);

    match &result {
        Ok(()) => {}
        // Already rendered by the active event handler
        Err(CoreError::NoFilesFound(root)) => {
            log::warn!("Nothing to process under {}", root.display());
        }
        Err(e) => {
            log::error!("{}", e);
            terminal::print_error(&e.to_string());
        }
    }

    if pause {
        if let Err(e) = wait_for_acknowledgement() {
            log::warn!("{}", e);
        }
    }

    process::exit(exit_code_for(&result));
}
