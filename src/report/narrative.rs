// TraceTrail - report/narrative.rs
//
// Complete, untruncated serialisation of a result into plain text. This
// is the form handed to an external analysis collaborator: every entry,
// every stack line, counts, and the contributing source list. Nothing is
// capped here; display limiting belongs to report::summary.

use crate::core::error_scan::ErrorScan;
use crate::core::model::TraceResult;
use crate::util::constants::UNKNOWN_TIMESTAMP;
use std::fmt::Write;

const RULE: &str = "================================================================================";

/// Render the full trace narrative.
pub fn render(result: &TraceResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Trace ID: {}", result.trace_id);
    let _ = writeln!(out, "Total matching entries: {}", result.logs.len());
    let _ = writeln!(out, "ERROR count: {}", result.counts.error);
    let _ = writeln!(out, "WARN count: {}", result.counts.warn);
    let _ = writeln!(out, "INFO count: {}", result.counts.info);

    if !result.source_files.is_empty() {
        let names: Vec<_> = result
            .source_files
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect();
        let _ = writeln!(out, "Files involved: {}", result.source_files.len());
        let _ = writeln!(out, "File list: {}", names.join(", "));
    }

    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "Complete trace log:");
    let _ = writeln!(out, "{RULE}");

    for (idx, entry) in result.logs.iter().enumerate() {
        let _ = writeln!(out, "\n[Entry #{}] {}", idx + 1, entry.level);
        if entry.timestamp_raw != UNKNOWN_TIMESTAMP {
            let _ = writeln!(out, "Time: {}", entry.timestamp_raw);
        }
        if let Some(ref file) = entry.source_file {
            let _ = writeln!(out, "Source: {file}");
        }
        let _ = writeln!(out, "Content: {}", entry.content);

        if !entry.stack_trace.is_empty() {
            let _ = writeln!(out, "Stack trace:");
            for line in &entry.stack_trace {
                let _ = writeln!(out, "  {line}");
            }
        }
    }

    out
}

/// Render the full error-scan narrative.
pub fn render_error_scan(scan: &ErrorScan) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "File: {}", scan.file.display());
    let _ = writeln!(out, "Total lines: {}", scan.total_lines);
    let _ = writeln!(out, "Errors found: {}", scan.errors.len());

    if !scan.exception_counts.is_empty() {
        let _ = writeln!(out, "\nException types:");
        for (ty, count) in &scan.exception_counts {
            let _ = writeln!(out, "  {ty}: {count}");
        }
    }

    for (idx, error) in scan.errors.iter().enumerate() {
        let _ = writeln!(out, "\n{RULE}");
        let _ = write!(out, "Error #{}", idx + 1);
        if let Some(ref ty) = error.exception_type {
            let _ = write!(out, " - {ty}");
        }
        if error.timestamp_raw != UNKNOWN_TIMESTAMP {
            let _ = write!(out, " ({})", error.timestamp_raw);
        }
        out.push('\n');
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "{}", error.message);

        if !error.stack_trace.is_empty() {
            let _ = writeln!(out, "Stack trace:");
            for line in &error.stack_trace {
                let _ = writeln!(out, "  {line}");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Level, LevelCounts, LogEntry};

    #[test]
    fn test_narrative_is_never_truncated() {
        let logs: Vec<LogEntry> = (1..=50)
            .map(|n| LogEntry {
                source_file: Some("a.log".to_string()),
                line_number: n,
                timestamp_raw: "Unknown".to_string(),
                timestamp: None,
                level: Level::Info,
                content: format!("step {n}"),
                stack_trace: Vec::new(),
            })
            .collect();
        let result = TraceResult {
            trace_id: "req-42".to_string(),
            source: "directory scan (3 files)".to_string(),
            source_files: vec!["a.log".into()],
            counts: LevelCounts { error: 0, warn: 0, info: 50 },
            logs,
        };

        let text = render(&result);
        assert!(text.contains("[Entry #1]"));
        assert!(text.contains("[Entry #50]"), "all 50 entries serialised");
        assert!(text.contains("step 50"));
        assert!(text.contains("File list: a.log"));
    }

    #[test]
    fn test_narrative_includes_full_stack_trace() {
        let result = TraceResult {
            trace_id: "req-1".to_string(),
            source: "app.log".to_string(),
            source_files: Vec::new(),
            counts: LevelCounts { error: 1, warn: 0, info: 0 },
            logs: vec![LogEntry {
                source_file: None,
                line_number: 1,
                timestamp_raw: "2024-01-01 10:00:05".to_string(),
                timestamp: None,
                level: Level::Error,
                content: "boom".to_string(),
                stack_trace: (0..30).map(|i| format!("at frame{i}")).collect(),
            }],
        };

        let text = render(&result);
        assert!(text.contains("at frame29"), "no stack-line cap in narrative");
        assert!(text.contains("Time: 2024-01-01 10:00:05"));
    }
}
