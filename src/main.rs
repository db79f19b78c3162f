// TraceTrail - main.rs
//
// CLI entry point. Handles:
// 1. Argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Precondition checks (non-empty identifier, existing path) — these
//    are enforced here so the core never sees invalid inputs
// 4. Output selection (summary / narrative / JSON / CSV)

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use tracetrail::core::correlate::correlate;
use tracetrail::core::error_scan::scan_errors;
use tracetrail::core::extract::{DecodePolicy, ExtractConfig};
use tracetrail::report::{export, narrative, summary};
use tracetrail::util;

/// Exit code for precondition violations (bad identifier, missing path).
const EXIT_PRECONDITION: u8 = 2;

/// TraceTrail - trace-ID log correlation across heterogeneous log files.
///
/// Point TraceTrail at a log file or directory with a request/trace
/// identifier to reconstruct that request's complete, chronologically
/// ordered story — stack traces reattached, timelines merged across files.
#[derive(Parser, Debug)]
#[command(name = "tracetrail", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Correlate a trace/request identifier across a file or directory.
    Trace {
        /// The correlation identifier to search for (traceId, requestId, ...).
        trace_id: String,

        /// Log file or directory to search.
        path: PathBuf,

        /// Print the complete narrative instead of the capped summary.
        #[arg(long)]
        full: bool,

        /// Output format.
        #[arg(short = 'o', long = "output", value_enum, default_value_t = TraceOutput::Text)]
        output: TraceOutput,

        /// Fail sources that are not valid UTF-8 instead of decoding lossily.
        #[arg(long = "strict-decode")]
        strict_decode: bool,
    },

    /// Scan a single log file for errors and exception types.
    Errors {
        /// Log file to scan.
        path: PathBuf,

        /// Output format.
        #[arg(short = 'o', long = "output", value_enum, default_value_t = ErrorOutput::Text)]
        output: ErrorOutput,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TraceOutput {
    Text,
    Json,
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ErrorOutput {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::debug!(
        version = util::constants::APP_VERSION,
        "TraceTrail starting"
    );

    match cli.command {
        Command::Trace {
            trace_id,
            path,
            full,
            output,
            strict_decode,
        } => run_trace(&trace_id, &path, full, output, strict_decode),
        Command::Errors { path, output } => run_errors(&path, output),
    }
}

fn run_trace(
    trace_id: &str,
    path: &PathBuf,
    full: bool,
    output: TraceOutput,
    strict_decode: bool,
) -> ExitCode {
    // Precondition checks. The core assumes these hold.
    if trace_id.trim().is_empty() {
        eprintln!("Error: trace identifier must not be empty");
        return ExitCode::from(EXIT_PRECONDITION);
    }
    if !path.exists() {
        eprintln!("Error: path '{}' does not exist", path.display());
        return ExitCode::from(EXIT_PRECONDITION);
    }

    let config = ExtractConfig {
        decode: if strict_decode {
            DecodePolicy::Strict
        } else {
            DecodePolicy::Lossy
        },
    };

    let result = correlate(trace_id, path, &config, |source, idx, total| {
        if total > 1 {
            eprintln!("Scanning [{idx}/{total}] {}", source.display());
        }
    });

    match write_trace_output(&result, full, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Output failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Serialise the result in the requested form. Text rendering is
/// infallible; the export paths surface typed errors.
fn write_trace_output(
    result: &tracetrail::core::model::TraceResult,
    full: bool,
    output: TraceOutput,
) -> util::error::Result<()> {
    match output {
        TraceOutput::Text => {
            if full {
                print!("{}", narrative::render(result));
            } else {
                print!("{}", summary::render(result));
            }
        }
        TraceOutput::Json => {
            export::write_json(result, std::io::stdout().lock())?;
            println!();
        }
        TraceOutput::Csv => {
            let count = export::write_csv(&result.logs, std::io::stdout().lock())?;
            tracing::debug!(rows = count, "CSV export complete");
        }
    }
    Ok(())
}

fn run_errors(path: &PathBuf, output: ErrorOutput) -> ExitCode {
    if !path.is_file() {
        eprintln!("Error: '{}' is not a file", path.display());
        return ExitCode::from(EXIT_PRECONDITION);
    }

    let scan = scan_errors(path, &ExtractConfig::default());

    match output {
        ErrorOutput::Text => {
            print!("{}", narrative::render_error_scan(&scan));
            ExitCode::SUCCESS
        }
        ErrorOutput::Json => {
            match export::write_error_scan_json(&scan, std::io::stdout().lock()) {
                Ok(()) => {
                    println!();
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!(error = %e, "JSON export failed");
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
