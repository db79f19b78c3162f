// TraceTrail - core/correlate.rs
//
// Top-level driver: dispatches single-file vs directory mode and wires
// scanner → per-source extraction → merge.
//
// Sources are processed strictly one at a time, in scanner order; each is
// opened, fully read, and released before the next. There is no parallel
// I/O and no shared mutable state beyond the returned accumulators.
//
// Preconditions (non-empty identifier, existing target) are the caller's
// responsibility; the binary checks them before invoking this.

use crate::core::classifier::TraceMatcher;
use crate::core::discovery;
use crate::core::extract::{extract_source, ExtractConfig};
use crate::core::merge::merge_sources;
use crate::core::model::{SourceExtraction, TraceResult};
use std::path::Path;

/// Correlate `trace_id` across the target file or directory.
///
/// `on_source` is invoked once per source before it is scanned, with the
/// source path, its 1-based position, and the total source count. It is a
/// presentation hook (progress display), not a correctness dependency;
/// pass `|_, _, _| {}` when no feedback is wanted.
pub fn correlate<F>(
    trace_id: &str,
    target: &Path,
    config: &ExtractConfig,
    mut on_source: F,
) -> TraceResult
where
    F: FnMut(&Path, usize, usize),
{
    let matcher = TraceMatcher::new(trace_id);

    if target.is_file() {
        on_source(target, 1, 1);
        let extraction = extract_source(target, &matcher, config);
        return merge_sources(trace_id, target.display().to_string(), vec![extraction], false);
    }

    // Directory mode. A scan failure here means the target vanished after
    // the caller's precondition check; degrade to an empty result rather
    // than erroring, consistent with per-source failure isolation.
    let files = match discovery::scan_log_files(target) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(error = %e, "Directory scan failed");
            Vec::new()
        }
    };

    let total = files.len();
    let source = format!("directory scan ({total} files)");

    tracing::info!(trace_id, target = %target.display(), files = total, "Correlating");

    let mut extractions: Vec<SourceExtraction> = Vec::with_capacity(total);
    for (idx, file) in files.iter().enumerate() {
        on_source(file, idx + 1, total);
        extractions.push(extract_source(file, &matcher, config));
    }

    merge_sources(trace_id, source, extractions, true)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Level;
    use std::fs;

    #[test]
    fn test_single_file_mode_skips_scanner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "2024-01-01 10:00:00 INFO [req-9] hi\n").unwrap();
        // A sibling log that must NOT be picked up in single-file mode.
        fs::write(dir.path().join("other.log"), "INFO [req-9] nope\n").unwrap();

        let result = correlate("req-9", &path, &ExtractConfig::default(), |_, _, _| {});

        assert_eq!(result.logs.len(), 1);
        assert_eq!(result.source, path.display().to_string());
        assert!(result.source_files.is_empty());
        assert!(result.logs[0].source_file.is_none());
    }

    #[test]
    fn test_directory_mode_merges_across_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.log"),
            "2024-01-01 10:00:00 INFO [req-9] in-a\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.log"),
            "2024-01-01 09:00:00 WARN [req-9] in-b\n",
        )
        .unwrap();

        let result = correlate("req-9", dir.path(), &ExtractConfig::default(), |_, _, _| {});

        assert_eq!(result.logs.len(), 2);
        assert_eq!(result.source, "directory scan (2 files)");
        assert_eq!(result.logs[0].level, Level::Warn, "earlier entry first");
        assert_eq!(result.logs[0].source_file.as_deref(), Some("b.log"));
        assert_eq!(result.source_files.len(), 2);
    }

    #[test]
    fn test_empty_directory_yields_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let result = correlate("req-9", dir.path(), &ExtractConfig::default(), |_, _, _| {});

        assert!(result.logs.is_empty());
        assert!(result.source_files.is_empty());
        assert_eq!(result.counts.error + result.counts.warn + result.counts.info, 0);
    }

    #[test]
    fn test_progress_callback_sees_every_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.log"), "x\n").unwrap();
        fs::write(dir.path().join("b.log"), "y\n").unwrap();

        let mut seen = Vec::new();
        correlate("req-9", dir.path(), &ExtractConfig::default(), |p, i, n| {
            seen.push((p.file_name().unwrap().to_str().unwrap().to_string(), i, n));
        });

        assert_eq!(
            seen,
            vec![("a.log".to_string(), 1, 2), ("b.log".to_string(), 2, 2)]
        );
    }
}
