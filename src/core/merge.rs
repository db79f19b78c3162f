// TraceTrail - core/merge.rs
//
// Chronological merging of per-source extractions into one TraceResult.
//
// The sort is a stable sort keyed on `Option<DateTime<Utc>>`: `None`
// (unparsable timestamp) orders before every `Some`, and ties — including
// None-vs-None — keep concatenation order, which is source-enumeration
// order then line order. The key is a total order, so there is no
// "sort failed, fall back to concatenation order" path; the merge
// cannot fail.

use crate::core::model::{LevelCounts, LogEntry, SourceExtraction, TraceResult};
use std::path::PathBuf;

/// Merge per-source extractions into a single chronological timeline.
///
/// `source` is the caller's descriptor for where the entries came from
/// (the file path in single-file mode, a directory summary otherwise).
///
/// In directory mode `source_files` lists every source that contributed
/// at least one entry, in enumeration order — even when the scan found a
/// single file. Entries are tagged with their originating file name only
/// when more than one source is present; a single-source merge leaves
/// `source_file` unset.
pub fn merge_sources(
    trace_id: &str,
    source: String,
    extractions: Vec<SourceExtraction>,
    directory_mode: bool,
) -> TraceResult {
    let multi_source = extractions.len() > 1;

    let mut logs: Vec<LogEntry> = Vec::new();
    let mut counts = LevelCounts::default();
    let mut source_files: Vec<PathBuf> = Vec::new();

    for extraction in extractions {
        counts.add(extraction.counts);

        if extraction.entries.is_empty() {
            continue;
        }
        if directory_mode {
            source_files.push(extraction.path.clone());
        }

        let tag = extraction
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());

        for mut entry in extraction.entries {
            if multi_source {
                entry.source_file = tag.clone();
            }
            logs.push(entry);
        }
    }

    // Stable: equal keys (and None-vs-None) retain concatenation order.
    logs.sort_by_key(|e| e.timestamp);

    tracing::debug!(
        trace_id,
        sources = source_files.len(),
        entries = logs.len(),
        "Merge complete"
    );

    TraceResult {
        trace_id: trace_id.to_string(),
        source,
        source_files,
        counts,
        logs,
    }
}

// =============================================================================
// Tests
// =============================================================================
