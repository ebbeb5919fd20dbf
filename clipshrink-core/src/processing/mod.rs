//! Core video processing logic and orchestration.
//!
//! Organizes the per-file steps into submodules and exposes the entry points
//! for starting a run.

/// Whole-run orchestration
pub mod pipeline;

/// Frame rate probing and parsing
pub mod probe;

/// Encoder invocation and result classification
pub mod transcode;

/// Per-file processing loop
pub mod video;

pub use pipeline::{plan_run, run_pipeline};
pub use probe::{FrameRate, parse_frame_rate, probe_frame_rate};
pub use transcode::{TranscodeOutput, TranscodeStatus, transcode_staged_file};
pub use video::process_videos;
