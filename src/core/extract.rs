// TraceTrail - core/extract.rs
//
// Single-source extraction: run the classifier over every line of one
// source, attach stack traces to ERROR entries, and accumulate per-level
// counts. Entries are appended in encounter order and never re-sorted
// here; chronological ordering is the merger's job.
//
// Failure isolation: a source that cannot be read yields an empty
// extraction with zero counts, never an error. In directory mode this
// keeps one bad file from sinking the rest of the scan.

use crate::core::classifier::{self, TraceMatcher};
use crate::core::model::{Level, LevelCounts, LogEntry, SourceExtraction};
use std::path::Path;

/// How invalid byte sequences in a source are handled.
///
/// Lossy substitution silently trades data fidelity for robustness, so the
/// choice is an explicit configuration rather than an implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Replace invalid UTF-8 sequences with U+FFFD and keep scanning.
    #[default]
    Lossy,

    /// Treat a non-UTF-8 source as unreadable (empty extraction).
    Strict,
}

/// Configuration for extraction operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractConfig {
    pub decode: DecodePolicy,
}

/// Extract every line matching `matcher` from the source at `path`.
///
/// The source is opened, fully read, and released before returning; no
/// handle outlives the call. Stack-trace continuation lines following an
/// ERROR entry are consumed into that entry and skipped from further
/// classification. Continuation lines after WARN/INFO matches are NOT
/// grouped; they fall through to normal classification and can become
/// entries of their own if they contain the identifier themselves.
pub fn extract_source(
    path: &Path,
    matcher: &TraceMatcher,
    config: &ExtractConfig,
) -> SourceExtraction {
    let content = match read_source(path, config.decode) {
        Some(c) => c,
        None => {
            return SourceExtraction {
                path: path.to_path_buf(),
                entries: Vec::new(),
                counts: LevelCounts::default(),
            }
        }
    };

    let lines: Vec<&str> = content.lines().collect();
    let mut entries: Vec<LogEntry> = Vec::new();
    let mut counts = LevelCounts::default();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let classification = classifier::classify(line, matcher);

        if !classification.is_match {
            i += 1;
            continue;
        }

        counts.record(classification.level);

        let (stack_trace, next) = if classification.level == Level::Error {
            classifier::collect_stack_trace(&lines, i)
        } else {
            (Vec::new(), i + 1)
        };

        entries.push(LogEntry {
            source_file: None, // set by the merger in multi-source mode
            line_number: (i as u64) + 1,
            timestamp_raw: classification.timestamp_raw,
            timestamp: classification.timestamp,
            level: classification.level,
            content: line.trim().to_string(),
            stack_trace,
        });

        i = next;
    }

    tracing::debug!(
        source = %path.display(),
        entries = entries.len(),
        errors = counts.error,
        "Source extraction complete"
    );

    SourceExtraction {
        path: path.to_path_buf(),
        entries,
        counts,
    }
}

/// Read the whole source, applying the decode policy.
/// Returns `None` on read failure (logged, not propagated). Shared with
/// the error-scan pipeline so both sides keep identical decode handling.
pub(crate) fn read_source(path: &Path, decode: DecodePolicy) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(source = %path.display(), error = %e, "Cannot read source");
            return None;
        }
    };

    match decode {
        DecodePolicy::Lossy => Some(String::from_utf8_lossy(&bytes).into_owned()),
        DecodePolicy::Strict => match String::from_utf8(bytes) {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::warn!(
                    source = %path.display(),
                    error = %e,
                    "Source is not valid UTF-8 (strict decode)"
                );
                None
            }
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
