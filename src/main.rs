//! CLI entry point for the score rater.
//!
//! Grades every student in a CSV score sheet and reports the top student
//! overall and per university.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use score_rater::analyzers::analyzer::analyze;
use score_rater::{
    output::{write_grades, write_json, write_text},
    parser::{RowPolicy, load_students},
    stats::grade_students,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "score_rater")]
#[command(about = "Grade student score sheets and find the toppers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the overall topper and the topper of each university
    Report {
        /// CSV score sheet (header row, then first,last,university,t1,t2,t3,t4)
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Skip rows with missing fields, bad text or non-numeric scores instead of failing
        #[arg(long, default_value_t = false)]
        skip_invalid: bool,
    },
    /// Print every student with their final score and grade
    Grades {
        /// CSV score sheet
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Skip rows with missing fields, bad text or non-numeric scores instead of failing
        #[arg(long, default_value_t = false)]
        skip_invalid: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn row_policy(skip_invalid: bool) -> RowPolicy {
    if skip_invalid {
        RowPolicy::Skip
    } else {
        RowPolicy::Strict
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing()?;

    let cli = Cli::parse();
    let stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Report {
            source,
            format,
            skip_invalid,
        } => {
            let report = analyze(&source, row_policy(skip_invalid))
                .with_context(|| format!("failed to analyze {}", source.display()))?;

            match format {
                Format::Text => write_text(&report, stdout)?,
                Format::Json => write_json(&report, stdout)?,
            }
        }
        Commands::Grades {
            source,
            skip_invalid,
        } => {
            let roster = load_students(&source, row_policy(skip_invalid))
                .with_context(|| format!("failed to load {}", source.display()))?;
            let graded = grade_students(roster.students);

            info!(students = graded.len(), "Students graded");
            write_grades(&graded, stdout)?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set. The returned guard must live until exit.
fn init_tracing() -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("score_rater.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}
