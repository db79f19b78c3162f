// TraceTrail - core/classifier.rs
//
// Per-line classification: correlation-identifier matching, level
// detection, and timestamp extraction, plus stack-trace continuation
// grouping. Pure logic over string slices; no I/O.
//
// Both regex chains here are ordered-priority lists and the ordering is
// load-bearing: the first pattern that hits wins, so they must never be
// reordered or treated as an unordered set.

use crate::core::model::Level;
use crate::util::constants::{CONTINUATION_PREFIXES, UNKNOWN_TIMESTAMP};
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

// =============================================================================
// Correlation-identifier matching
// =============================================================================

/// Compiled matcher for one correlation identifier.
///
/// Holds the six identifier patterns, compiled once per invocation and
/// evaluated strictly in order. A hit on any pattern is sufficient — the
/// chain is an OR across all six, tried first-to-last.
#[derive(Debug)]
pub struct TraceMatcher {
    patterns: Vec<Regex>,
}

impl TraceMatcher {
    /// Build the matcher for `trace_id`. All patterns are case-insensitive
    /// and the identifier itself is regex-escaped.
    ///
    /// The first five patterns require a field delimiter (`traceId=`,
    /// `trace_id:`, brackets, ...). The final pattern matches the raw
    /// identifier as a standalone token: word-boundary guards keep a
    /// search for `req-42` from hitting inside `req-429`.
    pub fn new(trace_id: &str) -> Self {
        let id = regex::escape(trace_id);
        let sources = [
            format!(r"(?i)traceId[=:]\s*{id}"),
            format!(r"(?i)trace_id[=:]\s*{id}"),
            format!(r"(?i)\[{id}\]"),
            format!(r"(?i)requestId[=:]\s*{id}"),
            format!(r"(?i)request_id[=:]\s*{id}"),
            format!(r"(?i)\b{id}\b"),
        ];
        let patterns = sources
            .iter()
            .map(|p| Regex::new(p).expect("TraceMatcher: invalid identifier pattern"))
            .collect();
        Self { patterns }
    }

    /// True if `line` contains the identifier in any of the six forms.
    pub fn is_match(&self, line: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(line))
    }
}

// =============================================================================
// Classification
// =============================================================================

/// The per-line classification outcome.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Whether the line contains the correlation identifier.
    pub is_match: bool,

    /// Detected level (UNKNOWN when no keyword is present).
    pub level: Level,

    /// Matched timestamp substring, or the `"Unknown"` sentinel.
    pub timestamp_raw: String,

    /// Parsed timestamp, when the matched substring parsed cleanly.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Classify one line against a correlation identifier.
pub fn classify(line: &str, matcher: &TraceMatcher) -> Classification {
    let (timestamp_raw, timestamp) = extract_timestamp(line);
    Classification {
        is_match: matcher.is_match(line),
        level: detect_level(line),
        timestamp_raw,
        timestamp,
    }
}

/// Detect the log level by keyword presence, in fixed precedence
/// ERROR > WARN > INFO > DEBUG. First satisfied wins; none → UNKNOWN.
pub fn detect_level(line: &str) -> Level {
    for level in Level::detection_order() {
        if let Some(keyword) = level.keyword() {
            if line.contains(keyword) {
                return *level;
            }
        }
    }
    Level::Unknown
}

// =============================================================================
// Timestamp extraction
// =============================================================================

/// One rung of the timestamp chain: a regex that finds the substring, and
/// a chrono format that parses it.
struct TimestampFormat {
    re: Regex,
    format: &'static str,
}

/// The ordered timestamp chain. Priority order is significant: the first
/// regex that finds a substring wins, even if a later one would also hit.
fn timestamp_formats() -> &'static [TimestampFormat] {
    static FORMATS: OnceLock<Vec<TimestampFormat>> = OnceLock::new();
    FORMATS.get_or_init(|| {
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("timestamp_formats: invalid regex")
        }
        vec![
            // YYYY-MM-DD HH:MM:SS
            TimestampFormat {
                re: re(r"\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}"),
                format: "%Y-%m-%d %H:%M:%S",
            },
            // ISO form with T separator
            TimestampFormat {
                re: re(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}"),
                format: "%Y-%m-%dT%H:%M:%S",
            },
            // DD/MM/YYYY HH:MM:SS
            TimestampFormat {
                re: re(r"\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}:\d{2}"),
                format: "%d/%m/%Y %H:%M:%S",
            },
        ]
    })
}

/// Extract a timestamp from `line`.
///
/// Returns the matched substring verbatim plus its parsed value. When no
/// pattern finds a substring the raw field is the `"Unknown"` sentinel and
/// the parsed value is `None`. A substring that matches its regex but
/// fails the chrono parse (e.g. month 13) keeps the raw text and a `None`
/// parse — unparsable timestamps are non-fatal throughout.
pub fn extract_timestamp(line: &str) -> (String, Option<DateTime<Utc>>) {
    for tf in timestamp_formats() {
        if let Some(m) = tf.re.find(line) {
            let raw = m.as_str().to_string();
            let parsed = NaiveDateTime::parse_from_str(m.as_str(), tf.format)
                .ok()
                .map(|ndt| ndt.and_utc());
            return (raw, parsed);
        }
    }
    (UNKNOWN_TIMESTAMP.to_string(), None)
}

// =============================================================================
// Stack-trace continuation grouping
// =============================================================================

/// True if `line` is a stack-trace continuation of the preceding entry:
/// it starts with a tab, four literal spaces, or `at `.
pub fn is_continuation(line: &str) -> bool {
    CONTINUATION_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Collect the stack trace following the entry at `entry_idx`.
///
/// Consumes every immediately following continuation line, stopping at the
/// first line that is not one. Returns the trimmed lines in encounter
/// order plus the index of the first unconsumed line; the caller resumes
/// scanning there so consumed lines are never independently classified.
///
/// Callers invoke this only for ERROR entries. Continuation lines after
/// WARN/INFO matches are deliberately left alone and fall through to
/// normal classification.
pub fn collect_stack_trace(lines: &[&str], entry_idx: usize) -> (Vec<String>, usize) {
    let mut trace = Vec::new();
    let mut i = entry_idx + 1;
    while i < lines.len() && is_continuation(lines[i]) {
        trace.push(lines[i].trim().to_string());
        i += 1;
    }
    (trace, i)
}

// =============================================================================
// Tests
// =============================================================================
