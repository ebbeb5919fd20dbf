//! Implementation of the 'plan' subcommand.
//!
//! Prints every move an `encode` run would make, and every file it would
//! skip, without touching the filesystem.

use crate::cli::PlanArgs;
use crate::error::CliResult;
use crate::terminal;

use clipshrink_core::events::EventDispatcher;
use clipshrink_core::{CoreError, StagingPlan, plan_run};

use std::path::Path;

/// Computes the staging plan for `root` and prints it.
pub fn run_plan(args: &PlanArgs, root: &Path) -> CliResult<StagingPlan> {
    let config = args.to_config();
    let plan = match plan_run(root, &config, &EventDispatcher::new()) {
        Err(CoreError::NoFilesFound(empty_root)) => {
            terminal::print_warning(&format!(
                "No video files found under {}. Nothing to do.",
                empty_root.display()
            ));
            return Err(CoreError::NoFilesFound(empty_root));
        }
        other => other?,
    };

    terminal::print_section("Plan");
    terminal::print_status("Root", &root.display().to_string());
    terminal::print_status("To process", &plan.files.len().to_string());
    terminal::print_status("To skip", &plan.conflicts.len().to_string());

    for planned in &plan.files {
        println!();
        terminal::print_processing(&planned.candidate.path().display().to_string());
        terminal::print_sub_item(&format!("stage  -> {}", planned.staged_path.display()));
        terminal::print_sub_item(&format!("output -> {}", planned.output_path.display()));
    }

    if !plan.conflicts.is_empty() {
        println!();
        for conflict in &plan.conflicts {
            terminal::print_warning(&format!("Skipping {conflict}"));
        }
    }

    Ok(plan)
}
