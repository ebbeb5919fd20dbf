//! Core library for batch re-encoding of raw video footage with HandBrakeCLI.
//!
//! This crate discovers unprocessed video files under a root directory, moves
//! each one into a staging folder next to it, probes its frame rate with
//! ffprobe, re-encodes it into the original folder under an output prefix and
//! reports the space saved.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use clipshrink_core::{CoreConfigBuilder, EventDispatcher, run_pipeline};
//! use clipshrink_core::external::{FfprobeCli, HandBrakeCli, StdFsMetadataProvider};
//! use std::path::Path;
//!
//! let config = CoreConfigBuilder::new()
//!     .staging_dir_name("Ham")
//!     .quality(20)
//!     .build();
//!
//! let summary = run_pipeline(
//!     &FfprobeCli::default(),
//!     &HandBrakeCli::default(),
//!     &StdFsMetadataProvider,
//!     Path::new("/path/to/footage"),
//!     &config,
//!     &EventDispatcher::new(),
//! )
//! .unwrap();
//!
//! for report in &summary.reports {
//!     println!("{report}");
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod external;
pub mod processing;
pub mod reporting;
pub mod staging;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use discovery::{CandidateFile, find_processable_files};
pub use error::{CoreError, CoreResult};
pub use events::{Event, EventDispatcher, EventHandler, RunPhase};
pub use processing::{FrameRate, TranscodeStatus, plan_run, process_videos, run_pipeline};
pub use reporting::{CompressionReport, FileFailure, RunSummary};
pub use staging::{StagedFile, StagingConflict, StagingPlan};
pub use utils::{format_bytes, format_duration};
