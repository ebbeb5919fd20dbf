// ============================================================================
// clipshrink-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Consistent output helpers (sections, status lines, success and error
// markers) and the event handler that renders a pipeline run with them.
//
// Terminal UI components follow a visual hierarchy:
//
// 1. Sections (===== SECTION =====) for run phases
// 2. Processing steps (» Step description) for each file
// 3. Sub-items (    Description) for details under a step
// 4. Status items (  Label:       Value) for key-value information
// 5. Success / failure markers (✓ / ✗)

use clipshrink_core::events::{Event, EventHandler, RunPhase};
use clipshrink_core::reporting::{RunSummary, bytes_to_megabytes};
use clipshrink_core::utils::get_filename_safe;
use clipshrink_core::{TranscodeStatus, format_bytes, format_duration};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const PROCESSING_SYMBOL: &str = "»";
    pub const WARNING_SYMBOL: &str = "!";
    pub const ERROR_SYMBOL: &str = "✗";

    pub const SECTION_PREFIX: &str = "===== ";
    pub const SECTION_SUFFIX: &str = " =====";

    pub const STATUS_INDENT: &str = "  ";
    pub const SUB_ITEM_INDENT: &str = "    ";

    pub const SPINNER_TEMPLATE: &str = "    {spinner} {msg} [{elapsed}]";
    pub const SPINNER_TICK_MS: u64 = 120;
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    println!();
    println!(
        "{}{}{}",
        styling::SECTION_PREFIX,
        style(title.to_uppercase()).cyan().bold(),
        styling::SECTION_SUFFIX
    );
    println!();
}

/// Print a key-value status line
pub fn print_status(label: &str, value: &str) {
    println!(
        "{}{:<14} {}",
        styling::STATUS_INDENT,
        format!("{label}:"),
        style(value).bold()
    );
}

pub fn print_processing(message: &str) {
    println!("{} {}", style(styling::PROCESSING_SYMBOL).cyan(), message);
}

pub fn print_sub_item(message: &str) {
    println!("{}{}", styling::SUB_ITEM_INDENT, message);
}

pub fn print_success(message: &str) {
    println!(
        "{}{} {}",
        styling::STATUS_INDENT,
        style(styling::SUCCESS_SYMBOL).green().bold(),
        message
    );
}

pub fn print_warning(message: &str) {
    println!(
        "{}{} {}",
        styling::STATUS_INDENT,
        style(styling::WARNING_SYMBOL).yellow().bold(),
        style(message).yellow()
    );
}

/// Print a failure line for a single file (stdout, the run continues)
pub fn print_failure(message: &str) {
    println!(
        "{}{} {}",
        styling::STATUS_INDENT,
        style(styling::ERROR_SYMBOL).red().bold(),
        message
    );
}

/// Print a fatal error (stderr)
pub fn print_error(message: &str) {
    eprintln!("{}", style(format!("Error: {message}")).red().bold());
}

fn display_name(path: &Path) -> String {
    get_filename_safe(path).unwrap_or_else(|_| path.display().to_string())
}

/// Prints the end-of-run summary.
pub fn print_summary(summary: &RunSummary) {
    print_status("Compressed", &summary.reports.len().to_string());
    print_status("Failed", &summary.failures.len().to_string());
    print_status("Skipped", &summary.conflicts.len().to_string());

    if !summary.reports.is_empty() {
        print_status(
            "Total size",
            &format!(
                "{:.2} MB -> {:.2} MB",
                bytes_to_megabytes(summary.total_original_size()),
                bytes_to_megabytes(summary.total_compressed_size())
            ),
        );
        if let Some(saved) = summary.overall_percent_saved() {
            let freed = summary
                .total_original_size()
                .saturating_sub(summary.total_compressed_size());
            print_status("Saved", &format!("{saved:.2}% ({})", format_bytes(freed)));
        }
    }
    print_status("Elapsed", &format_duration(summary.elapsed_secs));

    for failure in &summary.failures {
        let location = if failure.restored {
            "restored"
        } else {
            "left in place"
        };
        print_failure(&format!(
            "{} ({}): {}",
            failure.source.display(),
            location,
            failure.reason
        ));
    }

    println!();
    if summary.all_succeeded() {
        print_success("Processing complete.");
    } else {
        print_warning("Processing complete with failures.");
    }
}

/// Renders pipeline events for a person watching the terminal.
///
/// A spinner runs while the encoder works, since HandBrakeCLI output is
/// suppressed.
#[derive(Default)]
pub struct TerminalEventHandler {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_spinner(&self, message: String) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template(styling::SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(styling::SPINNER_TICK_MS));

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

impl EventHandler for TerminalEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::PhaseChanged { phase } => match phase {
                RunPhase::Discovering => print_section("Discovery"),
                RunPhase::Processing { index: 1, .. } => print_section("Processing"),
                RunPhase::Done => print_section("Summary"),
                _ => {}
            },

            Event::DiscoveryComplete { root, total_files } => {
                print_status("Root", &root.display().to_string());
                print_status("Files found", &total_files.to_string());
            }

            Event::StagingSkipped { conflict } => {
                print_warning(&format!("Skipping {conflict}"));
            }

            Event::NothingToProcess { root } => {
                print_warning(&format!(
                    "No video files found under {}. Nothing to do.",
                    root.display()
                ));
            }

            Event::FileStarted {
                index,
                total,
                source,
            } => {
                println!();
                print_processing(&format!("({index}/{total}) {}", source.display()));
            }

            Event::FileStaged { staged_path } => {
                print_sub_item(&format!("Moved to {}", staged_path.display()));
            }

            Event::FrameRateProbed { frame_rate, .. } => match frame_rate {
                Some(rate) => print_sub_item(&format!("Frame rate: {:.3} fps", rate.as_f64())),
                None => print_sub_item("Frame rate: unknown, HandBrake will choose"),
            },

            Event::TranscodeStarted { output, .. } => {
                self.start_spinner(format!("Encoding {}", display_name(output)));
            }

            Event::FileCompleted { report, status } => {
                self.stop_spinner();
                if let TranscodeStatus::NonZeroExit { code } = status {
                    let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                    print_warning(&format!("Encoder exited with {code} but produced an output"));
                }
                print_success(&report.to_string());
            }

            Event::FileFailed { failure } => {
                self.stop_spinner();
                print_failure(&format!("{}: {}", display_name(&failure.source), failure.reason));
                if failure.restored {
                    print_sub_item("Moved back to its original folder");
                }
            }

            Event::RunComplete { summary } => print_summary(summary),
        }
    }
}
