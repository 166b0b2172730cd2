// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the reposcore CLI.

pub mod auth;
pub mod completion;
pub mod top;
pub mod types;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use reposcore_core::AppConfig;

use crate::cli::{AuthCommand, Commands, CompletionCommand, OutputContext};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            s.set_style(style);
        }
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Dispatch to the appropriate command handler.
pub async fn run(command: Commands, ctx: OutputContext, config: AppConfig) -> Result<()> {
    match command {
        Commands::Top(args) => {
            let result = top::run(args, &ctx, config).await?;
            output::render(&result, &ctx)
        }

        Commands::Auth(auth_cmd) => match auth_cmd {
            AuthCommand::Status => {
                let result = auth::run_status();
                output::render(&result, &ctx)
            }
        },

        Commands::Completion(completion_cmd) => match completion_cmd {
            CompletionCommand::Generate { shell } => completion::run_generate(shell),
        },
    }
}
