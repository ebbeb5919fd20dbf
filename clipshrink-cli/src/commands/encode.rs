//! Implementation of the 'encode' subcommand.
//!
//! Builds the core configuration from the flags, checks that both external
//! tools can be started and runs the pipeline with either the terminal or the
//! JSON event handler attached.

use crate::cli::EncodeArgs;
use crate::error::CliResult;
use crate::terminal::{self, TerminalEventHandler};

use clipshrink_core::events::{EventDispatcher, JsonProgressHandler};
use clipshrink_core::external::{
    FfprobeCli, HandBrakeCli, StdFsMetadataProvider, check_dependency,
};
use clipshrink_core::{CoreConfig, RunSummary, run_pipeline};

use log::info;
use std::path::Path;
use std::sync::Arc;

/// Verifies that HandBrakeCLI and ffprobe can be started.
pub fn check_tools(config: &CoreConfig) -> CliResult<()> {
    check_dependency(&config.handbrake_program, "--version")?;
    check_dependency(&config.ffprobe_program, "-version")?;
    info!("External dependency check passed.");
    Ok(())
}

/// Runs the whole pipeline over `root`.
pub fn run_encode(args: &EncodeArgs, root: &Path) -> CliResult<RunSummary> {
    let config = args.to_config();
    config.validate()?;

    info!("clipshrink encode run started: {}", chrono::Local::now());
    info!("Root: {}", root.display());
    info!("Configuration: {:?}", config);

    if args.skip_dependency_check {
        info!("Skipping external dependency check.");
    } else {
        check_tools(&config)?;
    }

    let mut events = EventDispatcher::new();
    if args.json {
        events.add_handler(Arc::new(JsonProgressHandler::new()));
    } else {
        terminal::print_section("clipshrink");
        terminal::print_status("Encoder", &format!("{} (RF {})", config.encoder, config.quality));
        terminal::print_status("Staging folder", &config.staging_dir_name);
        terminal::print_status("Output prefix", &format!("\"{}\"", config.output_prefix));
        events.add_handler(Arc::new(TerminalEventHandler::new()));
    }

    let summary = run_pipeline(
        &FfprobeCli::new(config.ffprobe_program.clone()),
        &HandBrakeCli::new(config.handbrake_program.clone()),
        &StdFsMetadataProvider,
        root,
        &config,
        &events,
    )?;

    info!("clipshrink encode run finished: {}", chrono::Local::now());
    Ok(summary)
}
