//! Re-encoding of staged files.
//!
//! Runs the encoder for one staged file and classifies the result from two
//! facts: the exit status and whether the output file exists afterwards.
//!
//! | exit      | output  | result                                        |
//! |-----------|---------|-----------------------------------------------|
//! | success   | present | `TranscodeStatus::Clean`                      |
//! | non-zero  | present | `NonZeroExit` (or `ExitStatusMismatch` strict) |
//! | success   | missing | `CoreError::OutputMissing`                    |
//! | non-zero  | missing | `CoreError::EncoderFailed`                    |

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{EncodeParams, EncoderSpawner, FileMetadataProvider, build_handbrake_args};
use crate::processing::probe::FrameRate;
use crate::staging::StagedFile;

use serde::Serialize;
use std::path::PathBuf;

/// How the encoder exited when it did produce an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscodeStatus {
    Clean,
    NonZeroExit { code: Option<i32> },
}

/// The encoded file and the sizes on both sides of the encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOutput {
    pub path: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub status: TranscodeStatus,
}

/// Encodes `staged` into its planned output path.
pub fn transcode_staged_file<E: EncoderSpawner, M: FileMetadataProvider>(
    encoder: &E,
    metadata: &M,
    config: &CoreConfig,
    staged: &StagedFile,
    frame_rate: Option<FrameRate>,
) -> CoreResult<TranscodeOutput> {
    let output_path = staged.output_path().to_path_buf();
    let original_size = metadata.get_size(staged.path())?;

    let params = EncodeParams::from_config(
        config,
        staged.path().to_path_buf(),
        output_path.clone(),
        frame_rate,
    );
    match params.frame_rate {
        Some(rate) => log::info!("Encoding {} at {} fps", staged.path().display(), rate),
        None => log::info!("Encoding {} at encoder-chosen frame rate", staged.path().display()),
    }

    let status = encoder.run(&build_handbrake_args(&params))?;

    if !output_path.exists() {
        return Err(if status.success() {
            CoreError::OutputMissing(output_path)
        } else {
            CoreError::EncoderFailed {
                output: output_path,
                status,
            }
        });
    }

    let transcode_status = if status.success() {
        TranscodeStatus::Clean
    } else if config.strict_exit_status {
        if let Err(e) = std::fs::remove_file(&output_path) {
            log::warn!("Failed to remove partial output {}: {}", output_path.display(), e);
        }
        return Err(CoreError::ExitStatusMismatch {
            output: output_path,
            status,
        });
    } else {
        log::warn!(
            "Encoder exited with {} but wrote {}; keeping the output",
            status,
            output_path.display()
        );
        TranscodeStatus::NonZeroExit {
            code: status.code(),
        }
    };

    let compressed_size = metadata.get_size(&output_path)?;

    Ok(TranscodeOutput {
        path: output_path,
        original_size,
        compressed_size,
        status: transcode_status,
    })
}
