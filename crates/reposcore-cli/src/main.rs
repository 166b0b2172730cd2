// SPDX-License-Identifier: Apache-2.0

//! reposcore - rank GitHub repositories by a weighted popularity score.
//!
//! Searches the GitHub repository index by language and creation date and
//! prints the best matches ordered by a score built from stars, forks and
//! recency of activity.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod provider;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use reposcore_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

async fn run(cli: Cli) -> Result<()> {
    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet);

    let config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    commands::run(cli.command, output_ctx, config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            ExitCode::FAILURE
        }
    }
}
