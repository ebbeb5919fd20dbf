// ============================================================================
// clipshrink-core/src/processing/video.rs
// ============================================================================
//
// VIDEO PROCESSING: Per-File Staging, Probing, Encoding and Reporting
//
// Runs every planned file through the same sequence, one file at a time:
//
// 1. Move the file into its staging folder
// 2. Probe its frame rate (failures fall back to the encoder's choice)
// 3. Encode it into the parent folder under the output prefix
// 4. Compare sizes and build the compression report
//
// A failure in any step is confined to that file. Anything the failed encode
// left behind is removed and the file is moved back to where it was found,
// unless restoring is disabled in the configuration.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher, RunPhase};
use crate::external::{EncoderSpawner, FileMetadataProvider, ProbeExecutor};
use crate::processing::probe::probe_frame_rate;
use crate::processing::transcode::{TranscodeStatus, transcode_staged_file};
use crate::reporting::{CompressionReport, FileFailure, RunSummary};
use crate::staging::{PlannedFile, StagedFile, StagingPlan, stage_file};

use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Processes every file of `plan` in order.
///
/// Generic over the tool boundaries so tests can substitute them:
/// - `P`: ProbeExecutor - queries the frame rate
/// - `E`: EncoderSpawner - runs the encoder
/// - `M`: FileMetadataProvider - reads file sizes
///
/// Never fails as a whole. Each file ends up either as a report or as a
/// failure in the returned summary. Conflicts already recorded in the plan are
/// carried into the summary untouched.
pub fn process_videos<P: ProbeExecutor, E: EncoderSpawner, M: FileMetadataProvider>(
    prober: &P,
    encoder: &E,
    metadata: &M,
    config: &CoreConfig,
    plan: &StagingPlan,
    events: &EventDispatcher,
) -> RunSummary {
    let start = Instant::now();
    let total = plan.files.len();
    let mut summary = RunSummary {
        conflicts: plan.conflicts.clone(),
        ..RunSummary::default()
    };

    for (offset, planned) in plan.files.iter().enumerate() {
        let index = offset + 1;
        let source = planned.candidate.path();

        events.emit(Event::PhaseChanged {
            phase: RunPhase::Processing { index, total },
        });
        events.emit(Event::FileStarted {
            index,
            total,
            source: source.to_path_buf(),
        });
        info!("Processing ({}/{}): {}", index, total, source.display());

        let staged = match stage_file(planned) {
            Ok(staged) => staged,
            Err(e) => {
                // Nothing moved, the file is still where it was found.
                error!("Could not stage {}: {}. Skipping file.", source.display(), e);
                let failure = FileFailure {
                    source: source.to_path_buf(),
                    reason: e.to_string(),
                    restored: false,
                };
                events.emit(Event::FileFailed {
                    failure: failure.clone(),
                });
                summary.failures.push(failure);
                info!("----------------------------------------");
                continue;
            }
        };
        info!("Moved: {} -> {}", source.display(), staged.path().display());
        events.emit(Event::FileStaged {
            staged_path: staged.path().to_path_buf(),
        });

        match encode_and_report(prober, encoder, metadata, config, planned, &staged, events) {
            Ok((report, status)) => {
                info!("{}", report);
                events.emit(Event::FileCompleted {
                    report: report.clone(),
                    status,
                });
                summary.reports.push(report);
            }
            Err(e) => {
                error!("Failed to process {}: {}", source.display(), e);
                let failure = recover_failed_file(config, staged, e);
                events.emit(Event::FileFailed {
                    failure: failure.clone(),
                });
                summary.failures.push(failure);
            }
        }

        info!("----------------------------------------");
    }

    summary.elapsed_secs = start.elapsed().as_secs_f64();
    summary
}

fn encode_and_report<P: ProbeExecutor, E: EncoderSpawner, M: FileMetadataProvider>(
    prober: &P,
    encoder: &E,
    metadata: &M,
    config: &CoreConfig,
    planned: &PlannedFile,
    staged: &StagedFile,
    events: &EventDispatcher,
) -> CoreResult<(CompressionReport, TranscodeStatus)> {
    let frame_rate = probe_frame_rate(prober, staged.path());
    events.emit(Event::FrameRateProbed {
        path: staged.path().to_path_buf(),
        frame_rate,
    });

    events.emit(Event::TranscodeStarted {
        input: staged.path().to_path_buf(),
        output: planned.output_path.clone(),
    });
    let output = transcode_staged_file(encoder, metadata, config, staged, frame_rate)?;

    let report = CompressionReport::build(
        staged.path(),
        &output.path,
        output.original_size,
        output.compressed_size,
    )?;
    Ok((report, output.status))
}

/// Cleans up after a file that failed once staged.
fn recover_failed_file(config: &CoreConfig, staged: StagedFile, cause: CoreError) -> FileFailure {
    remove_leftover_output(staged.output_path());

    let source = staged.original_path().to_path_buf();
    let restored = if config.restore_on_failure {
        match staged.restore() {
            Ok(_) => true,
            Err(e) => {
                warn!("Could not restore {}: {}", source.display(), e);
                false
            }
        }
    } else {
        info!("Leaving {} in staging", staged.path().display());
        false
    };

    FileFailure {
        source,
        reason: cause.to_string(),
        restored,
    }
}

fn remove_leftover_output(output: &Path) {
    if !output.exists() {
        return;
    }
    match fs::remove_file(output) {
        Ok(()) => info!("Removed incomplete output {}", output.display()),
        Err(e) => warn!("Failed to remove output {}: {}", output.display(), e),
    }
}
