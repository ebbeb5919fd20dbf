// ============================================================================
// clipshrink-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Every field starts at its default so a
// caller only names what it overrides; validation stays in
// `CoreConfig::validate`.

use std::path::PathBuf;

use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use clipshrink_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .output_prefix("SMALL ")
///     .encoder("x265")
///     .quality(24)
///     .handbrake_program("/opt/handbrake/HandBrakeCLI")
///     .build();
/// assert_eq!(config.encoder, "x265");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name of the staging subfolder.
    pub fn staging_dir_name(mut self, name: &str) -> Self {
        self.config.staging_dir_name = name.to_string();
        self
    }

    /// Sets the output marker prefix.
    pub fn output_prefix(mut self, prefix: &str) -> Self {
        self.config.output_prefix = prefix.to_string();
        self
    }

    /// Replaces the extension allow-list. Leading dots are stripped.
    pub fn video_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.video_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Sets the HandBrake encoder name.
    pub fn encoder(mut self, encoder: &str) -> Self {
        self.config.encoder = encoder.to_string();
        self
    }

    /// Sets the constant quality value.
    pub fn quality(mut self, quality: u8) -> Self {
        self.config.quality = quality;
        self
    }

    /// Sets the ffprobe executable.
    pub fn ffprobe_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.ffprobe_program = program.into();
        self
    }

    /// Sets the HandBrakeCLI executable.
    pub fn handbrake_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.config.handbrake_program = program.into();
        self
    }

    /// Sets whether failed files are moved back out of staging.
    pub fn restore_on_failure(mut self, restore: bool) -> Self {
        self.config.restore_on_failure = restore;
        self
    }

    /// Sets whether a non-zero encoder exit always fails the file.
    pub fn strict_exit_status(mut self, strict: bool) -> Self {
        self.config.strict_exit_status = strict;
        self
    }

    /// Builds the CoreConfig.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_normalized() {
        let config = CoreConfigBuilder::new()
            .video_extensions([".MOV", "mp4"])
            .build();
        assert_eq!(config.video_extensions, vec!["mov", "mp4"]);
    }

    #[test]
    fn untouched_fields_keep_defaults() {
        let config = CoreConfigBuilder::new().quality(18).build();
        assert_eq!(config.quality, 18);
        assert_eq!(config.staging_dir_name, super::super::DEFAULT_STAGING_DIR_NAME);
        assert_eq!(config.encoder, super::super::DEFAULT_ENCODER);
    }
}
