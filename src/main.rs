mod cli;
mod clock;
mod error;
mod history;
mod http;
mod models;
mod storage;
mod suites;
mod testing;

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cli::{CliConfig, OutputFormat};
use clock::SystemClock;
use http::client::ApiClient;
use testing::TestRunner;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = CliConfig::parse();
    let client = ApiClient::new(&config.base_url, config.timeout_ms)
        .context("failed to build HTTP client")?;
    info!(base_url = client.base_url(), suite = config.suite.name(), "starting run");

    let clock = SystemClock;
    let mut runner = TestRunner::new(io::stdout().lock());
    runner.print_banner(config.suite.title())?;
    runner.run_suite(config.suite.cases(&client, &clock))?;
    runner.print_summary()?;
    let history = client.history();
    info!(exchanges = history.entries().len(), "suite finished");
    let (mut out, report) = runner.finish(config.suite.name(), history);

    if config.output_format == OutputFormat::Json {
        storage::write_json_report(&mut out, &report)?;
    }
    drop(out);

    if let Some(path) = &config.report_path {
        storage::save_report(path, &report)?;
        info!(path = %path.display(), "report written");
    }

    let code = cli::exit_status(config.fail_on_error, &report);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
