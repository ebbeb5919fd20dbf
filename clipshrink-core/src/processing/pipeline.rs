//! Whole-run orchestration.
//!
//! A run moves through `Idle`, `ValidatingRoot`, `Discovering`,
//! `Processing(i)` and `Done`. Validation and discovery failures abort the
//! run before anything is moved; everything after that is per file.

use crate::config::CoreConfig;
use crate::discovery::{find_processable_files, validate_root};
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher, RunPhase};
use crate::external::{EncoderSpawner, FileMetadataProvider, ProbeExecutor};
use crate::processing::video::process_videos;
use crate::reporting::RunSummary;
use crate::staging::StagingPlan;

use std::path::Path;
use std::time::Instant;

fn enter_phase(events: &EventDispatcher, phase: RunPhase) {
    log::debug!("Entering phase: {}", phase.label());
    events.emit(Event::PhaseChanged { phase });
}

/// Validates the root, discovers candidates and computes the staging plan.
///
/// Touches nothing on disk.
pub fn plan_run(root: &Path, config: &CoreConfig, events: &EventDispatcher) -> CoreResult<StagingPlan> {
    config.validate()?;

    enter_phase(events, RunPhase::Idle);
    enter_phase(events, RunPhase::ValidatingRoot);
    validate_root(root)?;

    enter_phase(events, RunPhase::Discovering);
    let candidates = match find_processable_files(root, config) {
        Err(CoreError::NoFilesFound(empty_root)) => {
            log::info!("No video files found under {}", empty_root.display());
            events.emit(Event::NothingToProcess {
                root: empty_root.clone(),
            });
            return Err(CoreError::NoFilesFound(empty_root));
        }
        other => other?,
    };
    let total_files = candidates.len();
    log::info!("Found {} video file(s) under {}", total_files, root.display());
    events.emit(Event::DiscoveryComplete {
        root: root.to_path_buf(),
        total_files,
    });

    let plan = StagingPlan::build(candidates, config);
    for conflict in &plan.conflicts {
        events.emit(Event::StagingSkipped {
            conflict: conflict.clone(),
        });
    }
    Ok(plan)
}

/// Runs the complete pipeline over `root`.
///
/// # Returns
///
/// * `Ok(RunSummary)` - Every file was attempted; per-file failures are inside
/// * `Err(CoreError::RootNotFound)` / `Err(CoreError::RootNotDirectory)` - Bad root
/// * `Err(CoreError::NoFilesFound)` - Nothing to process
/// * `Err(CoreError::Config)` - Invalid configuration
pub fn run_pipeline<P: ProbeExecutor, E: EncoderSpawner, M: FileMetadataProvider>(
    prober: &P,
    encoder: &E,
    metadata: &M,
    root: &Path,
    config: &CoreConfig,
    events: &EventDispatcher,
) -> CoreResult<RunSummary> {
    let start = Instant::now();
    let plan = plan_run(root, config, events)?;

    let mut summary = process_videos(prober, encoder, metadata, config, &plan, events);
    summary.elapsed_secs = start.elapsed().as_secs_f64();

    enter_phase(events, RunPhase::Done);
    log::info!(
        "Run complete: {} compressed, {} failed, {} skipped",
        summary.reports.len(),
        summary.failures.len(),
        summary.conflicts.len()
    );
    events.emit(Event::RunComplete {
        summary: summary.clone(),
    });
    Ok(summary)
}
