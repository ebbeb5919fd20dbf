// clipshrink-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use clipshrink_core::config::{
    CoreConfig, CoreConfigBuilder, DEFAULT_ENCODER, DEFAULT_FFPROBE_PROGRAM,
    DEFAULT_HANDBRAKE_PROGRAM, DEFAULT_OUTPUT_PREFIX, DEFAULT_QUALITY, DEFAULT_STAGING_DIR_NAME,
    MAX_QUALITY,
};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "clipshrink: batch re-encoder for raw camera footage",
    long_about = "Finds .mp4/.mts files under a folder, parks each original in a staging \
                  subfolder and re-encodes it next to where it was found using HandBrakeCLI."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output on the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write a timestamped run log into this directory
    #[arg(long, global = true, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stages and re-encodes every video file under a folder
    Encode(EncodeArgs),
    /// Shows what `encode` would do without moving anything
    Plan(PlanArgs),
}

/// Names used on disk. Shared by every command so `plan` shows exactly what
/// `encode` would do.
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Name of the staging subfolder created next to each file
    #[arg(long = "staging-dir", value_name = "NAME", default_value = DEFAULT_STAGING_DIR_NAME)]
    pub staging_dir: String,

    /// Filename prefix of encoded outputs
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_OUTPUT_PREFIX)]
    pub prefix: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Root folder to process (prompted for when omitted)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    /// HandBrake video encoder
    #[arg(long, value_name = "NAME", default_value = DEFAULT_ENCODER)]
    pub encoder: String,

    /// Constant quality (RF), lower is better quality
    #[arg(
        long,
        value_name = "Q",
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=MAX_QUALITY as i64)
    )]
    pub quality: u8,

    /// Path to the HandBrakeCLI executable
    #[arg(long, value_name = "PATH", default_value = DEFAULT_HANDBRAKE_PROGRAM)]
    pub handbrake: PathBuf,

    /// Path to the ffprobe executable
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FFPROBE_PROGRAM)]
    pub ffprobe: PathBuf,

    /// Treat any non-zero encoder exit as a failure, even with an output
    #[arg(long)]
    pub strict_exit_status: bool,

    /// Leave failed files in their staging folder
    #[arg(long)]
    pub no_restore: bool,

    /// Do not check that HandBrakeCLI and ffprobe can be started
    #[arg(long)]
    pub skip_dependency_check: bool,

    /// Emit progress as JSON lines on stdout
    #[arg(long)]
    pub json: bool,

    /// Exit without waiting for Enter after an interactive run
    #[arg(long)]
    pub no_pause: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Root folder to inspect (prompted for when omitted)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

impl LayoutArgs {
    fn apply(&self, builder: CoreConfigBuilder) -> CoreConfigBuilder {
        builder
            .staging_dir_name(&self.staging_dir)
            .output_prefix(&self.prefix)
    }
}

impl EncodeArgs {
    /// Maps the flags onto a core configuration.
    pub fn to_config(&self) -> CoreConfig {
        self.layout
            .apply(CoreConfigBuilder::new())
            .encoder(&self.encoder)
            .quality(self.quality)
            .handbrake_program(self.handbrake.clone())
            .ffprobe_program(self.ffprobe.clone())
            .strict_exit_status(self.strict_exit_status)
            .restore_on_failure(!self.no_restore)
            .build()
    }
}

impl PlanArgs {
    pub fn to_config(&self) -> CoreConfig {
        self.layout.apply(CoreConfigBuilder::new()).build()
    }
}
