// TraceTrail - core/error_scan.rs
//
// Whole-file error extraction without a correlation identifier: find every
// error line, attach its stack trace, and tally exception types. The
// companion workflow to trace correlation when no request ID is known yet.
//
// An "error line" contains an error marker (ERROR keyword, exception
// class name, `Error:`, `Caused by:`, or a bare `at ` frame reference)
// and is not itself a continuation line — continuation lines belong to
// the preceding entry's stack trace, never start a new one.

use crate::core::classifier;
use crate::core::extract::{self, ExtractConfig};
use crate::util::constants::ERROR_SCAN_TOP_TYPES;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Substrings whose presence marks a line as error-related.
const ERROR_MARKERS: &[&str] = &["ERROR", "Exception", "Error:", "Caused by:", "at "];

/// One extracted error with its reassembled stack trace.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEntry {
    /// Matched timestamp substring, or `"Unknown"`.
    pub timestamp_raw: String,

    /// Parsed timestamp, when available.
    pub timestamp: Option<DateTime<Utc>>,

    /// The trimmed error line itself.
    pub message: String,

    /// Continuation lines, trimmed, in encounter order.
    pub stack_trace: Vec<String>,

    /// Exception class name (`...Exception` / `...Error`), when present.
    pub exception_type: Option<String>,
}

/// Result of scanning one file for errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorScan {
    /// The scanned file.
    pub file: PathBuf,

    /// Total lines in the file.
    pub total_lines: usize,

    /// Errors in encounter order.
    pub errors: Vec<ErrorEntry>,

    /// The most frequent exception types, descending, capped at the
    /// top ten.
    pub exception_counts: Vec<(String, usize)>,
}

fn exception_type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+Exception|\w+Error)").expect("exception type regex"))
}

/// True if `line` starts a new error entry.
fn is_error_line(line: &str) -> bool {
    ERROR_MARKERS.iter().any(|m| line.contains(m)) && !classifier::is_continuation(line)
}

/// Scan the file at `path` for error entries.
///
/// Read failure yields an empty report rather than an error, matching the
/// extraction pipeline's failure isolation.
pub fn scan_errors(path: &Path, config: &ExtractConfig) -> ErrorScan {
    let content = match extract::read_source(path, config.decode) {
        Some(c) => c,
        None => return empty_scan(path),
    };

    let lines: Vec<&str> = content.lines().collect();
    let mut errors: Vec<ErrorEntry> = Vec::new();
    let mut type_counts: HashMap<String, usize> = HashMap::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if !is_error_line(line) {
            i += 1;
            continue;
        }

        let (timestamp_raw, timestamp) = classifier::extract_timestamp(line);

        let exception_type = exception_type_re()
            .captures(line)
            .map(|caps| caps[1].to_string());
        if let Some(ref ty) = exception_type {
            *type_counts.entry(ty.clone()).or_insert(0) += 1;
        }

        // Every hit here is an error entry, so the stack trace is always
        // collected (unlike the level-gated trace path).
        let (stack_trace, next) = classifier::collect_stack_trace(&lines, i);

        errors.push(ErrorEntry {
            timestamp_raw,
            timestamp,
            message: line.trim().to_string(),
            stack_trace,
            exception_type,
        });

        i = next;
    }

    let mut exception_counts: Vec<(String, usize)> = type_counts.into_iter().collect();
    // Descending by count; name order breaks ties deterministically.
    exception_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    exception_counts.truncate(ERROR_SCAN_TOP_TYPES);

    tracing::debug!(
        file = %path.display(),
        lines = lines.len(),
        errors = errors.len(),
        "Error scan complete"
    );

    ErrorScan {
        file: path.to_path_buf(),
        total_lines: lines.len(),
        errors,
        exception_counts,
    }
}

fn empty_scan(path: &Path) -> ErrorScan {
    ErrorScan {
        file: path.to_path_buf(),
        total_lines: 0,
        errors: Vec::new(),
        exception_counts: Vec::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scan_str(content: &str) -> ErrorScan {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, content).unwrap();
        scan_errors(&path, &ExtractConfig::default())
    }

    #[test]
    fn test_finds_error_lines_with_stack_traces() {
        let scan = scan_str(
            "2024-01-01 10:00:00 INFO started\n\
             2024-01-01 10:00:05 ERROR NullPointerException in handler\n\
             \tat com.foo.Handler.handle(Handler.java:42)\n\
             \tat com.foo.Main.run(Main.java:10)\n\
             2024-01-01 10:00:06 INFO recovered\n",
        );

        assert_eq!(scan.total_lines, 5);
        assert_eq!(scan.errors.len(), 1);
        let e = &scan.errors[0];
        assert_eq!(e.exception_type.as_deref(), Some("NullPointerException"));
        assert_eq!(e.timestamp_raw, "2024-01-01 10:00:05");
        assert_eq!(e.stack_trace.len(), 2);
    }

    #[test]
    fn test_continuation_lines_do_not_start_entries() {
        // A "Caused by:" buried inside a consumed stack trace must not be
        // double-counted; one standing alone starts its own entry.
        let scan = scan_str(
            "ERROR top failure\n\
             \tat com.foo.A.a(A.java:1)\n\
             \tCaused by: java.io.IOException: disk gone\n\
             Caused by: java.net.SocketException: reset\n",
        );

        assert_eq!(scan.errors.len(), 2);
        assert_eq!(scan.errors[0].stack_trace.len(), 2);
        assert!(scan.errors[1].message.starts_with("Caused by:"));
    }

    #[test]
    fn test_exception_counts_descending_top_capped() {
        let mut content = String::new();
        for _ in 0..3 {
            content.push_str("ERROR TimeoutException waiting\n");
        }
        content.push_str("ERROR OutOfMemoryError heap\n");
        let scan = scan_str(&content);

        assert_eq!(
            scan.exception_counts,
            vec![
                ("TimeoutException".to_string(), 3),
                ("OutOfMemoryError".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_clean_file_reports_no_errors() {
        let scan = scan_str("INFO all good\nINFO still good\n");
        assert!(scan.errors.is_empty());
        assert!(scan.exception_counts.is_empty());
        assert_eq!(scan.total_lines, 2);
    }

    /// The scan honours the shared decode policy: strict decode treats a
    /// non-UTF-8 file as unreadable.
    #[test]
    fn test_strict_decode_skips_invalid_source() {
        use crate::core::extract::DecodePolicy;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binaryish.log");
        fs::write(&path, b"ERROR TimeoutException \xff\xfe\n").unwrap();

        let config = ExtractConfig {
            decode: DecodePolicy::Strict,
        };
        let scan = scan_errors(&path, &config);
        assert!(scan.errors.is_empty());
        assert_eq!(scan.total_lines, 0);
    }

    #[test]
    fn test_missing_file_yields_empty_report() {
        let scan = scan_errors(
            Path::new("/nonexistent/app.log"),
            &ExtractConfig::default(),
        );
        assert!(scan.errors.is_empty());
        assert_eq!(scan.total_lines, 0);
    }
}
