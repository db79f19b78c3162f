// TraceTrail - report/export.rs
//
// CSV and JSON export of merged trace results.
// Writes to any Write trait object; never touches the filesystem itself.

use crate::core::error_scan::ErrorScan;
use crate::core::model::{LogEntry, TraceResult};
use crate::util::error::ExportError;
use std::io::Write;

/// Export merged entries to CSV format.
///
/// Columns: timestamp, level, source_file, line, content, stack_lines.
/// The stack trace is flattened to a line count; full traces belong to
/// the JSON and narrative forms.
pub fn write_csv<W: Write>(entries: &[LogEntry], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["timestamp", "level", "source_file", "line", "content", "stack_lines"])
        .map_err(|e| ExportError::Csv { source: e })?;

    let mut count = 0;
    for entry in entries {
        csv_writer
            .write_record([
                &entry.timestamp_raw,
                entry.level.label(),
                entry.source_file.as_deref().unwrap_or(""),
                &entry.line_number.to_string(),
                &entry.content,
                &entry.stack_trace.len().to_string(),
            ])
            .map_err(|e| ExportError::Csv { source: e })?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExportError::Io { source: e })?;

    Ok(count)
}

/// Export a complete trace result as pretty-printed JSON.
pub fn write_json<W: Write>(result: &TraceResult, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, result).map_err(|e| ExportError::Json { source: e })
}

/// Export a complete error scan as pretty-printed JSON.
pub fn write_error_scan_json<W: Write>(scan: &ErrorScan, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, scan).map_err(|e| ExportError::Json { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Level, LevelCounts};

    fn make_entry(line: u64, content: &str) -> LogEntry {
        LogEntry {
            source_file: Some("a.log".to_string()),
            line_number: line,
            timestamp_raw: "2024-01-01 10:00:00".to_string(),
            timestamp: None,
            level: Level::Error,
            content: content.to_string(),
            stack_trace: vec!["at frame".to_string()],
        }
    }

    #[test]
    fn test_csv_export() {
        let entries = vec![make_entry(1, "Error one"), make_entry(2, "Error two")];
        let mut buf = Vec::new();
        let count = write_csv(&entries, &mut buf).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("timestamp,level"));
        assert!(output.contains("Error one"));
        assert!(output.contains("Error two"));
    }

    #[test]
    fn test_json_export_round_trips_fields() {
        let result = TraceResult {
            trace_id: "req-42".to_string(),
            source: "app.log".to_string(),
            source_files: Vec::new(),
            counts: LevelCounts { error: 1, warn: 0, info: 0 },
            logs: vec![make_entry(1, "boom")],
        };
        let mut buf = Vec::new();
        write_json(&result, &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["trace_id"], "req-42");
        assert_eq!(value["logs"][0]["level"], "ERROR");
        assert_eq!(value["logs"][0]["stack_trace"][0], "at frame");
    }
}
