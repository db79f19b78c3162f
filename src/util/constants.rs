// TraceTrail - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "TraceTrail";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Discovery
// =============================================================================

/// Filename suffixes accepted as log sources during directory scans.
/// No other filtering is applied: the scanner operates on log trees, not
/// source trees, so there is no VCS/build-directory exclusion.
pub const LOG_FILE_EXTENSIONS: &[&str] = &[".log", ".txt", ".out"];

// =============================================================================
// Classification
// =============================================================================

/// Sentinel stored in `timestamp_raw` when no timestamp pattern matched.
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// Prefixes that mark a line as a stack-trace continuation of the
/// preceding entry: a tab, four literal spaces, or a Java-style frame.
pub const CONTINUATION_PREFIXES: &[&str] = &["\t", "    ", "at "];

// =============================================================================
// Display caps (presentation layer only — the core never truncates)
// =============================================================================

/// Maximum entries shown by the on-screen summary renderer.
pub const SUMMARY_MAX_ENTRIES: usize = 20;

/// Maximum stack-trace lines shown per entry by the summary renderer.
pub const SUMMARY_MAX_STACK_LINES: usize = 15;

/// Maximum exception types reported by the error scan (most frequent first).
pub const ERROR_SCAN_TOP_TYPES: usize = 10;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG nor --debug is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";
