// TraceTrail - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// presentation concerns; these are the shared vocabulary across all layers.
//
// Everything here is created fresh per invocation and immutable once
// returned — no state survives between runs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Log Entry (one matched line, plus any attached stack trace)
// =============================================================================

/// A single log line that matched the correlation identifier.
///
/// This is the core data unit that flows through extraction, merging,
/// rendering, and export. Stack-trace continuation lines belonging to an
/// ERROR entry live inside that entry, never as entries of their own.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// File name of the originating source. `None` in single-file mode;
    /// set by the merger when more than one source contributed.
    pub source_file: Option<String>,

    /// 1-indexed line number within the originating source.
    /// Strictly increasing within one source's entry list.
    pub line_number: u64,

    /// The timestamp substring exactly as matched, or the sentinel
    /// `"Unknown"` when no pattern matched.
    pub timestamp_raw: String,

    /// Parsed timestamp. `None` when no known format matched; such entries
    /// sort before all timestamped entries in the merged timeline.
    pub timestamp: Option<DateTime<Utc>>,

    /// Detected log level.
    pub level: Level,

    /// The trimmed original line text.
    pub content: String,

    /// Stack-trace continuation lines, trimmed, in encounter order.
    /// Populated only when `level == Level::Error`.
    pub stack_trace: Vec<String>,
}

// =============================================================================
// Level
// =============================================================================

/// Log levels detected by keyword presence, ordered by detection precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Unknown,
}

impl Level {
    /// The keyword whose presence in a line marks this level.
    /// Matching is case-sensitive; real log frameworks emit these uppercase.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Level::Error => Some("ERROR"),
            Level::Warn => Some("WARN"),
            Level::Info => Some("INFO"),
            Level::Debug => Some("DEBUG"),
            Level::Unknown => None,
        }
    }

    /// Detection precedence, most severe first. ERROR wins over WARN even
    /// when both keywords appear in the same line.
    pub fn detection_order() -> &'static [Level] {
        &[Level::Error, Level::Warn, Level::Info, Level::Debug]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Level counts
// =============================================================================

/// Per-level totals for a trace. Threaded explicitly through extraction and
/// merging and returned to the caller — never ambient mutable state.
///
/// DEBUG and UNKNOWN entries are collected but not separately tallied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub error: usize,
    pub warn: usize,
    pub info: usize,
}

impl LevelCounts {
    /// Bump the bucket for `level`, if it has one.
    pub fn record(&mut self, level: Level) {
        match level {
            Level::Error => self.error += 1,
            Level::Warn => self.warn += 1,
            Level::Info => self.info += 1,
            Level::Debug | Level::Unknown => {}
        }
    }

    /// Sum another accumulator into this one (directory-mode merge).
    pub fn add(&mut self, other: LevelCounts) {
        self.error += other.error;
        self.warn += other.warn;
        self.info += other.info;
    }
}

// =============================================================================
// Per-source extraction output
// =============================================================================

/// The output of extracting one source: entries in encounter order plus the
/// level totals for that source. Input to the chronological merger.
#[derive(Debug, Clone)]
pub struct SourceExtraction {
    /// Path of the source this extraction came from.
    pub path: PathBuf,

    /// Matched entries in encounter order. Never re-sorted before merge.
    pub entries: Vec<LogEntry>,

    /// Level totals for this source.
    pub counts: LevelCounts,
}

// =============================================================================
// Trace result (final aggregate)
// =============================================================================

/// The fully merged result of a correlation run, handed to renderers and
/// exporters. The core never truncates `logs`; any display capping is a
/// presentation-layer decision downstream.
#[derive(Debug, Clone, Serialize)]
pub struct TraceResult {
    /// The correlation identifier that was searched for.
    pub trace_id: String,

    /// The file path searched, or a directory-scan summary descriptor.
    pub source: String,

    /// Sources that contributed at least one entry. Empty in
    /// single-file mode.
    pub source_files: Vec<PathBuf>,

    /// Summed per-level totals across all sources.
    pub counts: LevelCounts,

    /// All entries, merged across sources and chronologically sorted.
    pub logs: Vec<LogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_record_skips_debug_and_unknown() {
        let mut counts = LevelCounts::default();
        counts.record(Level::Error);
        counts.record(Level::Warn);
        counts.record(Level::Info);
        counts.record(Level::Debug);
        counts.record(Level::Unknown);
        assert_eq!(
            counts,
            LevelCounts {
                error: 1,
                warn: 1,
                info: 1
            }
        );
    }

    #[test]
    fn test_counts_add_sums_buckets() {
        let mut a = LevelCounts {
            error: 2,
            warn: 1,
            info: 0,
        };
        a.add(LevelCounts {
            error: 1,
            warn: 0,
            info: 3,
        });
        assert_eq!(
            a,
            LevelCounts {
                error: 3,
                warn: 1,
                info: 3
            }
        );
    }

    #[test]
    fn test_detection_order_is_most_severe_first() {
        assert_eq!(Level::detection_order()[0], Level::Error);
        assert_eq!(Level::detection_order().last(), Some(&Level::Debug));
    }

    #[test]
    fn test_level_serialises_uppercase() {
        let json = serde_json::to_string(&Level::Warn).unwrap();
        assert_eq!(json, "\"WARN\"");
    }
}
