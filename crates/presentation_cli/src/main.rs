//! Alumni portal CLI
//!
//! One command per invocation; the session token persists between runs.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, init_logging, log_filter_from_verbosity};
use presentation_cli::{App, Cli};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    let verbosity = (cli.verbose > 0).then(|| log_filter_from_verbosity(cli.verbose));
    init_logging(&config.telemetry, verbosity)?;
    debug!(base_url = %config.portal.base_url, "Configuration loaded");

    let app = App::from_config(&config)?;
    let report = app.run(cli.command).await?;

    print!("{}", report.output);
    if report.failed {
        std::process::exit(1);
    }
    Ok(())
}
