// TraceTrail - core/discovery.rs
//
// Recursive directory traversal and candidate log file enumeration.
//
// Inclusion is by filename suffix only (.log, .txt, .out). There is no
// VCS/build-directory exclusion: this scanner operates on log trees, not
// source trees, and a rotated log inside any subdirectory is fair game.
//
// Per-entry I/O errors are non-fatal: the entry is skipped with a warning
// and traversal continues. Only an invalid root is an error.

use crate::util::constants::LOG_FILE_EXTENSIONS;
use crate::util::error::ScanError;
use std::path::{Path, PathBuf};

/// Discover candidate log files under `root`, recursively.
///
/// Returns paths sorted lexicographically so multi-source extraction and
/// merge tie-breaking are deterministic across platforms and filesystems.
/// An empty result is `Ok` — a directory with no log files is a valid
/// (empty) scan, not an error.
pub fn scan_log_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let meta = std::fs::metadata(root).map_err(|_| ScanError::RootNotFound {
        path: root.to_path_buf(),
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = Vec::new();

    for entry_result in walkdir::WalkDir::new(root).follow_links(false) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                // Inaccessible entry: skip and continue.
                tracing::warn!(error = %e, "Skipping inaccessible entry during scan");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = match entry.file_name().to_str() {
            Some(n) => n,
            None => {
                tracing::warn!(
                    path = %entry.path().display(),
                    "Skipping non-UTF-8 filename"
                );
                continue;
            }
        };

        if has_log_extension(name) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();

    tracing::debug!(
        root = %root.display(),
        files = files.len(),
        "Log file scan complete"
    );

    Ok(files)
}

/// True if `file_name` ends in one of the accepted log suffixes.
fn has_log_extension(file_name: &str) -> bool {
    LOG_FILE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

// =============================================================================
// Tests
// =============================================================================
