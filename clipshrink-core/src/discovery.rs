//! File discovery module for finding video files to process.
//!
//! This module walks the whole tree below a root directory and collects every
//! file whose extension is on the allow-list (case-insensitive) and whose name
//! does not carry the output marker prefix. Staging folders are pruned from the
//! walk so files parked by an earlier run are not picked up again.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A discovered input video eligible for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    path: PathBuf,
    parent: PathBuf,
    extension: String,
}

impl CandidateFile {
    /// Full path of the discovered file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the file was found in.
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Extension as it appears on disk (original case).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name as a lossy string, for logs and reports.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Decides whether a bare file name is a processing candidate.
#[must_use]
pub fn is_candidate_name(file_name: &str, config: &CoreConfig) -> bool {
    if file_name.starts_with(&config.output_prefix) {
        return false;
    }
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.accepts_extension(ext))
}

/// Checks that `root` exists and is a directory.
pub fn validate_root(root: &Path) -> CoreResult<()> {
    if !root.exists() {
        return Err(CoreError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(CoreError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Finds video files eligible for processing anywhere below `root`.
///
/// Entries are visited in file-name order within each directory, and the
/// result is fully materialized before it is returned, so moves made later in the run cannot affect it.
///
/// # Returns
///
/// * `Ok(Vec<CandidateFile>)` - The discovered candidates
/// * `Err(CoreError::RootNotFound)` / `Err(CoreError::RootNotDirectory)` - Bad root
/// * `Err(CoreError::Walkdir)` - If an error occurs during directory traversal
/// * `Err(CoreError::NoFilesFound)` - If nothing matched
///
/// # Examples
///
/// ```rust,no_run
/// use clipshrink_core::{CoreConfig, find_processable_files};
/// use std::path::Path;
///
/// let config = CoreConfig::default();
/// match find_processable_files(Path::new("/path/to/footage"), &config) {
///     Ok(files) => println!("Found {} video files", files.len()),
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_processable_files(root: &Path, config: &CoreConfig) -> CoreResult<Vec<CandidateFile>> {
    validate_root(root)?;

    let staging_name = config.staging_dir_name.as_str();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
        // The root itself is always walked, even if it happens to share the
        // staging folder's name.
        entry.depth() == 0
            || !(entry.file_type().is_dir() && entry.file_name() == staging_name)
    });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            log::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };
        if !is_candidate_name(file_name, config) {
            continue;
        }

        let path = entry.into_path();
        let parent = path
            .parent()
            .ok_or_else(|| CoreError::PathError(format!("No parent directory for {}", path.display())))?
            .to_path_buf();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::debug!("Discovered candidate: {}", path.display());
        files.push(CandidateFile {
            path,
            parent,
            extension,
        });
    }

    if files.is_empty() {
        Err(CoreError::NoFilesFound(root.to_path_buf()))
    } else {
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_names() {
        let config = CoreConfig::default();
        assert!(is_candidate_name("clip.mp4", &config));
        assert!(is_candidate_name("CLIP.MP4", &config));
        assert!(is_candidate_name("00012.MTS", &config));
        assert!(!is_candidate_name("HB clip.mp4", &config));
        assert!(!is_candidate_name("clip.mkv", &config));
        assert!(!is_candidate_name("mp4", &config));
        assert!(!is_candidate_name("notes.txt", &config));
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        let config = CoreConfig::default();
        // Only the exact marker identifies an output.
        assert!(is_candidate_name("hb clip.mp4", &config));
    }
}
