// ============================================================================
// clipshrink-core/src/reporting.rs
// ============================================================================
//
// REPORTING: Per-File Compression Reports and Run Summary
//
// Sizes are reported in megabytes (bytes / 1,048,576) and the saving is
// (original - compressed) / original * 100. A zero-byte original has no
// meaningful saving and is reported as an error for that file.

use crate::error::{CoreError, CoreResult};
use crate::staging::StagingConflict;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Bytes per megabyte used for every size shown to the user.
pub const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

#[must_use]
pub fn bytes_to_megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MEGABYTE
}

/// Percentage saved going from `original` to `compressed` bytes.
/// `None` when the original is empty. Negative when the output grew.
#[must_use]
pub fn percent_saved(original: u64, compressed: u64) -> Option<f64> {
    if original == 0 {
        return None;
    }
    let original_mb = bytes_to_megabytes(original);
    let compressed_mb = bytes_to_megabytes(compressed);
    Some((original_mb - compressed_mb) / original_mb * 100.0)
}

/// Size comparison for one transcoded file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    pub source_name: String,
    pub output_name: String,
    pub original_size: u64,
    pub compressed_size: u64,
    pub percent_saved: f64,
}

impl CompressionReport {
    /// Builds the report, rejecting an empty original.
    pub fn build(
        source: &Path,
        output: &Path,
        original_size: u64,
        compressed_size: u64,
    ) -> CoreResult<Self> {
        let percent_saved = percent_saved(original_size, compressed_size)
            .ok_or_else(|| CoreError::EmptySource(source.to_path_buf()))?;

        Ok(Self {
            source_name: source.display().to_string(),
            output_name: output.display().to_string(),
            original_size,
            compressed_size,
            percent_saved,
        })
    }

    #[must_use]
    pub fn original_mb(&self) -> f64 {
        bytes_to_megabytes(self.original_size)
    }

    #[must_use]
    pub fn compressed_mb(&self) -> f64 {
        bytes_to_megabytes(self.compressed_size)
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({:.2} MB -> {:.2} MB, saved {:.2}%)",
            self.source_name,
            self.output_name,
            self.original_mb(),
            self.compressed_mb(),
            self.percent_saved
        )
    }
}

/// A file whose processing failed, and whether it was put back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub source: PathBuf,
    pub reason: String,
    pub restored: bool,
}

/// Aggregate outcome of one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub reports: Vec<CompressionReport>,
    pub failures: Vec<FileFailure>,
    pub conflicts: Vec<StagingConflict>,
    pub elapsed_secs: f64,
}

impl RunSummary {
    #[must_use]
    pub fn total_original_size(&self) -> u64 {
        self.reports.iter().map(|r| r.original_size).sum()
    }

    #[must_use]
    pub fn total_compressed_size(&self) -> u64 {
        self.reports.iter().map(|r| r.compressed_size).sum()
    }

    /// Saving across all successful files, by total size.
    #[must_use]
    pub fn overall_percent_saved(&self) -> Option<f64> {
        percent_saved(self.total_original_size(), self.total_compressed_size())
    }

    /// True when every planned file produced a report.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1_048_576;

    #[test]
    fn forty_percent_saving() {
        let report = CompressionReport::build(
            Path::new("/r/staging/clip.mp4"),
            Path::new("/r/HB clip.mp4"),
            100 * MB,
            60 * MB,
        )
        .unwrap();
        assert_eq!(format!("{:.2}", report.percent_saved), "40.00");
        assert_eq!(report.original_mb(), 100.0);
        assert_eq!(report.compressed_mb(), 60.0);
        assert!(report.to_string().ends_with("saved 40.00%)"));
    }

    #[test]
    fn growth_is_negative_saving() {
        let saved = percent_saved(50 * MB, 75 * MB).unwrap();
        assert_eq!(format!("{saved:.2}"), "-50.00");
    }

    #[test]
    fn empty_original_is_error() {
        let err = CompressionReport::build(Path::new("/r/empty.mp4"), Path::new("/r/HB empty.mp4"), 0, 10)
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptySource(_)));
    }

    #[test]
    fn summary_totals() {
        let mut summary = RunSummary::default();
        for (orig, comp) in [(100 * MB, 50 * MB), (100 * MB, 70 * MB)] {
            summary.reports.push(
                CompressionReport::build(Path::new("a.mp4"), Path::new("HB a.mp4"), orig, comp).unwrap(),
            );
        }
        assert_eq!(summary.total_original_size(), 200 * MB);
        assert_eq!(summary.total_compressed_size(), 120 * MB);
        assert_eq!(format!("{:.2}", summary.overall_percent_saved().unwrap()), "40.00");
        assert!(summary.all_succeeded());
    }
}
