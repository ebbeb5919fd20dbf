// ============================================================================
// clipshrink-core/src/staging.rs
// ============================================================================
//
// STAGING: Two-Phase Relocation of Candidate Files
//
// Phase 1 (`StagingPlan::build`) computes, for every discovered file, where it
// will be staged and where its encoded output will land, without touching the
// filesystem. Candidates whose staging destination or output path is already
// occupied are set aside as conflicts.
//
// Phase 2 (`stage_file`) performs one move right before that file is
// processed. A `StagedFile` remembers where it came from so a failed file can
// be put back with `StagedFile::restore`.

use crate::config::CoreConfig;
use crate::discovery::CandidateFile;
use crate::error::{CoreError, CoreResult};

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a candidate will be moved and where its output will be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub candidate: CandidateFile,
    pub staged_path: PathBuf,
    pub output_path: PathBuf,
}

/// Why a candidate was left out of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictReason {
    /// A file with the same name is already in the staging folder
    StagingOccupied { path: PathBuf },
    /// The encoded output from an earlier run is already present
    OutputExists { path: PathBuf },
}

/// A candidate that will not be processed, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagingConflict {
    pub source: PathBuf,
    pub reason: ConflictReason,
}

impl std::fmt::Display for StagingConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            ConflictReason::StagingOccupied { path } => {
                write!(f, "{}: staging slot already taken by {}", self.source.display(), path.display())
            }
            ConflictReason::OutputExists { path } => {
                write!(f, "{}: output already exists at {}", self.source.display(), path.display())
            }
        }
    }
}

/// The full set of moves for a run, computed before any of them happens.
#[derive(Debug, Clone, Default)]
pub struct StagingPlan {
    pub files: Vec<PlannedFile>,
    pub conflicts: Vec<StagingConflict>,
}

impl StagingPlan {
    /// Computes staging and output paths for every candidate.
    pub fn build(candidates: Vec<CandidateFile>, config: &CoreConfig) -> StagingPlan {
        let mut plan = StagingPlan::default();

        for candidate in candidates {
            let staged_path = staging_path_for(candidate.path(), &config.staging_dir_name);
            let output_path = output_path_for(candidate.path(), &config.output_prefix);

            let reason = if staged_path.exists() {
                Some(ConflictReason::StagingOccupied {
                    path: staged_path.clone(),
                })
            } else if output_path.exists() {
                Some(ConflictReason::OutputExists {
                    path: output_path.clone(),
                })
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    let conflict = StagingConflict {
                        source: candidate.path().to_path_buf(),
                        reason,
                    };
                    log::warn!("Skipping {conflict}");
                    plan.conflicts.push(conflict);
                }
                None => plan.files.push(PlannedFile {
                    candidate,
                    staged_path,
                    output_path,
                }),
            }
        }

        plan
    }

    /// True when nothing can be processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// `<parent>/<staging>/<basename>` for a file at `<parent>/<basename>`.
#[must_use]
pub fn staging_path_for(source: &Path, staging_dir_name: &str) -> PathBuf {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let staging_dir = parent.join(staging_dir_name);
    match source.file_name() {
        Some(name) => staging_dir.join(name),
        None => staging_dir,
    }
}

/// `<parent>/<prefix><basename>` for a file at `<parent>/<basename>`.
///
/// Computed from the pre-stage location, which is the staged file's
/// grandparent directory.
#[must_use]
pub fn output_path_for(source: &Path, output_prefix: &str) -> PathBuf {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    parent.join(format!("{output_prefix}{name}"))
}

/// A file that has been moved into its staging folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    original_path: PathBuf,
    path: PathBuf,
    output_path: PathBuf,
}

impl StagedFile {
    /// Current location inside the staging folder.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the file was before staging.
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Where the encoder will write the output.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Moves the file back to where it was discovered.
    ///
    /// Refuses to overwrite anything that appeared at the original path in the
    /// meantime. Removes the staging folder if the move left it empty.
    pub fn restore(self) -> CoreResult<PathBuf> {
        if self.original_path.exists() {
            return Err(CoreError::RestoreConflict(self.original_path));
        }
        fs::rename(&self.path, &self.original_path)?;
        log::info!(
            "Restored {} -> {}",
            self.path.display(),
            self.original_path.display()
        );

        if let Some(staging_dir) = self.path.parent() {
            // Fails harmlessly when other staged files are still there.
            if fs::remove_dir(staging_dir).is_ok() {
                log::debug!("Removed empty staging folder {}", staging_dir.display());
            }
        }
        Ok(self.original_path)
    }
}

/// Moves a planned file into its staging folder.
///
/// The staging folder is created if missing. The destination is re-checked
/// right before the move; an occupied slot is never overwritten.
pub fn stage_file(planned: &PlannedFile) -> CoreResult<StagedFile> {
    let source = planned.candidate.path();
    let destination = &planned.staged_path;

    let staging_dir = destination.parent().ok_or_else(|| {
        CoreError::PathError(format!("No staging folder for {}", destination.display()))
    })?;
    fs::create_dir_all(staging_dir)?;

    if destination.exists() {
        return Err(CoreError::StagingCollision {
            candidate: source.to_path_buf(),
            destination: destination.clone(),
        });
    }

    fs::rename(source, destination)?;
    log::debug!("Staged {} -> {}", source.display(), destination.display());

    Ok(StagedFile {
        original_path: source.to_path_buf(),
        path: destination.clone(),
        output_path: planned.output_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_path_is_sibling_folder() {
        let staged = staging_path_for(Path::new("/root/trip/clip.mp4"), "staging");
        assert_eq!(staged, PathBuf::from("/root/trip/staging/clip.mp4"));
    }

    #[test]
    fn output_path_carries_prefix() {
        let output = output_path_for(Path::new("/root/trip/clip.MTS"), "HB ");
        assert_eq!(output, PathBuf::from("/root/trip/HB clip.MTS"));
    }

    #[test]
    fn output_of_staged_file_lands_in_grandparent() {
        let source = Path::new("/root/trip/clip.mp4");
        let staged = staging_path_for(source, "staging");
        let grandparent = staged.parent().and_then(Path::parent).unwrap();
        assert_eq!(output_path_for(source, "HB ").parent().unwrap(), grandparent);
    }
}
