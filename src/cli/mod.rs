//! # Command Line
//!
//! Every flag is optional. With none given the run targets the public
//! pet-store demo, uses a 5 s timeout, prints a text transcript and exits 0
//! whatever the outcome.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::http::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use crate::suites::Suite;
use crate::testing::RunReport;

#[derive(Debug, Clone, Parser)]
#[command(name = "petstore-smoke")]
#[command(about = "Smoke-test the pet-store REST API", long_about = None)]
pub struct CliConfig {
    /// Base URL every endpoint path is appended to
    #[arg(long, env = "PETSTORE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Connect and per-read timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Which fixed suite to run
    #[arg(long, value_enum, default_value_t = Suite::Smoke)]
    pub suite: Suite,

    /// Also print the run report as JSON after the summary
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Write the JSON run report to this file
    #[arg(long = "report")]
    pub report_path: Option<PathBuf>,

    /// Exit with status 1 when any test failed
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Output format for the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Process exit code for a finished run. Failed cases only count when
/// `fail_on_error` is set.
pub fn exit_status(fail_on_error: bool, report: &RunReport) -> i32 {
    if fail_on_error && report.failed > 0 { 1 } else { 0 }
}
