//! Configuration structures and constants for the clipshrink-core library.
//!
//! This module provides the knobs of the processing pipeline: names used on
//! disk (staging folder, output marker prefix), the extension allow-list, the
//! encoder settings and the paths of the two external tools.

mod builder;

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

pub use builder::CoreConfigBuilder;

// Default constants

/// Name of the staging subfolder created next to each discovered file.
pub const DEFAULT_STAGING_DIR_NAME: &str = "staging";

/// Filename prefix carried by every transcoded output.
/// Files starting with it are never picked up by discovery.
pub const DEFAULT_OUTPUT_PREFIX: &str = "HB ";

/// Extensions (compared case-insensitively) eligible for processing.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mts"];

/// HandBrake video encoder name.
pub const DEFAULT_ENCODER: &str = "x264";

/// Constant quality (RF) passed to HandBrake. Lower is higher quality.
pub const DEFAULT_QUALITY: u8 = 22;

/// Highest RF value x264/x265 accept.
pub const MAX_QUALITY: u8 = 51;

/// Program used for frame rate probing.
pub const DEFAULT_FFPROBE_PROGRAM: &str = "ffprobe";

/// Program used for transcoding.
pub const DEFAULT_HANDBRAKE_PROGRAM: &str = "HandBrakeCLI";

/// Main configuration structure for the clipshrink-core library.
///
/// Every field has a default, so `CoreConfig::default()` is a complete
/// configuration. The builder provides a fluent way to override individual
/// values.
///
/// # Examples
///
/// ```rust
/// use clipshrink_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .staging_dir_name("Ham")
///     .quality(20)
///     .strict_exit_status(true)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Name of the per-directory staging folder
    pub staging_dir_name: String,

    /// Prefix prepended to the basename of every output file
    pub output_prefix: String,

    /// Lowercase extensions (without dot) accepted by discovery
    pub video_extensions: Vec<String>,

    /// HandBrake encoder name passed with `-e`
    pub encoder: String,

    /// Constant quality value passed with `-q`
    pub quality: u8,

    /// Path or name of the ffprobe executable
    pub ffprobe_program: PathBuf,

    /// Path or name of the HandBrakeCLI executable
    pub handbrake_program: PathBuf,

    /// Move a staged file back to its original location when its
    /// processing fails
    pub restore_on_failure: bool,

    /// Treat a non-zero encoder exit as a failure even when an output
    /// file was produced
    pub strict_exit_status: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            staging_dir_name: DEFAULT_STAGING_DIR_NAME.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            encoder: DEFAULT_ENCODER.to_string(),
            quality: DEFAULT_QUALITY,
            ffprobe_program: PathBuf::from(DEFAULT_FFPROBE_PROGRAM),
            handbrake_program: PathBuf::from(DEFAULT_HANDBRAKE_PROGRAM),
            restore_on_failure: true,
            strict_exit_status: false,
        }
    }
}

impl CoreConfig {
    /// Checks that the configuration can drive a run.
    ///
    /// The staging folder name must be a single path component, otherwise
    /// staged files could escape the candidate's directory. The output
    /// prefix must be non-empty, otherwise outputs would be re-discovered.
    pub fn validate(&self) -> CoreResult<()> {
        let staging = self.staging_dir_name.as_str();
        if staging.is_empty()
            || staging == "."
            || staging == ".."
            || staging.contains('/')
            || staging.contains('\\')
        {
            return Err(CoreError::Config(format!(
                "staging directory name must be a single folder name, got '{staging}'"
            )));
        }

        if self.output_prefix.trim().is_empty() {
            return Err(CoreError::Config(
                "output prefix must contain at least one visible character".to_string(),
            ));
        }
        if self.output_prefix.contains('/') || self.output_prefix.contains('\\') {
            return Err(CoreError::Config(format!(
                "output prefix must not contain path separators, got '{}'",
                self.output_prefix
            )));
        }

        if self.video_extensions.is_empty() {
            return Err(CoreError::Config(
                "at least one video extension is required".to_string(),
            ));
        }

        if self.quality > MAX_QUALITY {
            return Err(CoreError::Config(format!(
                "quality must be between 0 and {MAX_QUALITY}, got {}",
                self.quality
            )));
        }

        if self.encoder.trim().is_empty() {
            return Err(CoreError::Config("encoder name must not be empty".to_string()));
        }

        Ok(())
    }

    /// True when `extension` is on the allow-list (case-insensitive).
    #[must_use]
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.video_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.staging_dir_name, "staging");
        assert_eq!(config.output_prefix, "HB ");
        assert_eq!(config.quality, 22);
        assert!(config.restore_on_failure);
        assert!(!config.strict_exit_status);
    }

    #[test]
    fn extension_match_ignores_case() {
        let config = CoreConfig::default();
        assert!(config.accepts_extension("mp4"));
        assert!(config.accepts_extension("MTS"));
        assert!(config.accepts_extension("Mp4"));
        assert!(!config.accepts_extension("mkv"));
    }

    #[test]
    fn rejects_nested_staging_name() {
        let config = CoreConfig {
            staging_dir_name: "a/b".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_blank_prefix() {
        let config = CoreConfig {
            output_prefix: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let config = CoreConfig {
            quality: 60,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
