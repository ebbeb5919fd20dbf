//! JSON progress handler for structured progress output
//!
//! Writes one JSON object per event, one per line, so the run can be driven
//! and monitored by another program.

use super::{Event, EventHandler, RunPhase};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that outputs progress events as structured JSON to stdout
pub struct JsonProgressHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonProgressHandler {
    /// Create a new JSON progress handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a new JSON progress handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }
}

impl Default for JsonProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for JsonProgressHandler {
    fn handle(&self, event: &Event) {
        let timestamp = Self::get_timestamp();

        let value = match event {
            Event::PhaseChanged { phase } => {
                let (index, total) = match phase {
                    RunPhase::Processing { index, total } => (Some(*index), Some(*total)),
                    _ => (None, None),
                };
                json!({
                    "type": "phase",
                    "phase": phase.label(),
                    "index": index,
                    "total": total,
                    "timestamp": timestamp
                })
            }

            Event::DiscoveryComplete { root, total_files } => json!({
                "type": "discovery_complete",
                "root": root,
                "total_files": total_files,
                "timestamp": timestamp
            }),

            Event::StagingSkipped { conflict } => json!({
                "type": "staging_skipped",
                "conflict": conflict,
                "timestamp": timestamp
            }),

            Event::NothingToProcess { root } => json!({
                "type": "nothing_to_process",
                "root": root,
                "timestamp": timestamp
            }),

            Event::FileStarted {
                index,
                total,
                source,
            } => json!({
                "type": "file_started",
                "index": index,
                "total": total,
                "source": source,
                "timestamp": timestamp
            }),

            Event::FileStaged { staged_path } => json!({
                "type": "file_staged",
                "staged_path": staged_path,
                "timestamp": timestamp
            }),

            Event::FrameRateProbed { path, frame_rate } => json!({
                "type": "frame_rate",
                "path": path,
                "fps": frame_rate.map(|rate| rate.as_f64()),
                "timestamp": timestamp
            }),

            Event::TranscodeStarted { input, output } => json!({
                "type": "transcode_started",
                "input": input,
                "output": output,
                "timestamp": timestamp
            }),

            Event::FileCompleted { report, status } => json!({
                "type": "file_completed",
                "report": report,
                "encoder_status": status,
                "timestamp": timestamp
            }),

            Event::FileFailed { failure } => json!({
                "type": "file_failed",
                "failure": failure,
                "timestamp": timestamp
            }),

            Event::RunComplete { summary } => json!({
                "type": "run_complete",
                "processed": summary.reports.len(),
                "failed": summary.failures.len(),
                "skipped": summary.conflicts.len(),
                "total_original_size": summary.total_original_size(),
                "total_compressed_size": summary.total_compressed_size(),
                "percent_saved": summary.overall_percent_saved(),
                "summary": summary,
                "timestamp": timestamp
            }),
        };

        self.write_json(value);
    }
}
