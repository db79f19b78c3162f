// TraceTrail - report/summary.rs
//
// Human-oriented on-screen rendering of a TraceResult. Capped: at most
// SUMMARY_MAX_ENTRIES entries and SUMMARY_MAX_STACK_LINES stack lines per
// entry, with "... N more" markers for everything elided. Purely a view —
// the underlying result is untouched.

use crate::core::model::TraceResult;
use crate::util::constants::{SUMMARY_MAX_ENTRIES, SUMMARY_MAX_STACK_LINES, UNKNOWN_TIMESTAMP};
use std::fmt::Write;

/// Render the capped summary view of `result`.
pub fn render(result: &TraceResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Trace ID: {}", result.trace_id);
    let _ = writeln!(out, "Source:   {}", result.source);
    let _ = writeln!(out, "Entries:  {}", result.logs.len());
    let _ = writeln!(
        out,
        "Levels:   ERROR {}  WARN {}  INFO {}",
        result.counts.error, result.counts.warn, result.counts.info
    );

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
        let _ = writeln!(out, "Files:    {}", names.join(", "));
    }

    if result.logs.is_empty() {
        let _ = writeln!(out, "\nNo matching log entries found.");
        return out;
    }

    let shown = result.logs.len().min(SUMMARY_MAX_ENTRIES);
    let _ = writeln!(out, "\nShowing first {shown} entries:\n");

    for (idx, entry) in result.logs.iter().take(SUMMARY_MAX_ENTRIES).enumerate() {
        let mut title = format!("#{} {}", idx + 1, entry.level);
        if entry.timestamp_raw != UNKNOWN_TIMESTAMP {
            title.push_str(&format!(" ({})", entry.timestamp_raw));
        }
        if let Some(ref file) = entry.source_file {
            title.push_str(&format!(" - {file}"));
        }
        let _ = writeln!(out, "[{title}]");
        let _ = writeln!(out, "{}", entry.content);

        if !entry.stack_trace.is_empty() {
            for line in entry.stack_trace.iter().take(SUMMARY_MAX_STACK_LINES) {
                let _ = writeln!(out, "    {line}");
            }
            if entry.stack_trace.len() > SUMMARY_MAX_STACK_LINES {
                let _ = writeln!(
                    out,
                    "    ... {} more stack lines",
                    entry.stack_trace.len() - SUMMARY_MAX_STACK_LINES
                );
            }
        }
        out.push('\n');
    }

    if result.logs.len() > SUMMARY_MAX_ENTRIES {
        let _ = writeln!(
            out,
            "... {} more entries not shown",
            result.logs.len() - SUMMARY_MAX_ENTRIES
        );
    }

    out
}
