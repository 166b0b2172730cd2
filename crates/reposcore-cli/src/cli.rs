// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for reposcore.
//!
//! Uses clap's derive API with noun-verb subcommands.

use std::io::IsTerminal;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Extended help text for the generate subcommand with shell-specific examples.
const COMPLETION_GENERATE_HELP: &str = r#"EXAMPLES

  bash
    Add to ~/.bashrc or ~/.bash_profile:
      eval "$(reposcore completion generate bash)"

  zsh
    Generate completion file:
      mkdir -p ~/.zsh/completions
      reposcore completion generate zsh > ~/.zsh/completions/_reposcore

    Add to ~/.zshrc (before compinit):
      fpath=(~/.zsh/completions $fpath)
      autoload -U compinit && compinit -i

  fish
    Generate completion file:
      reposcore completion generate fish > ~/.config/fish/completions/reposcore.fish
"#;

/// Output format for CLI results.
#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
    /// Markdown table
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone)]
pub struct OutputContext {
    /// Output format (text, json, yaml, markdown)
    pub format: OutputFormat,
    /// Suppress non-essential output (spinners, prompts)
    pub quiet: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            is_tty: std::io::stdout().is_terminal(),
        }
    }

    /// Returns true if interactive elements (spinners, prompts) should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// Parses a `YYYY-MM-DD` date argument.
fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    reposcore_core::utils::parse_date(value)
        .map_err(|e| format!("expected a date in YYYY-MM-DD format ({e})"))
}

/// reposcore - rank GitHub repositories by a weighted popularity score.
///
/// Searches repositories by language and creation date, scores each one by
/// stars, forks and recency of activity, and prints the best matches.
#[derive(Parser)]
#[command(name = "reposcore")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output format (text, json, yaml, markdown)
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinners, prompts)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the highest scoring repositories for a language
    Top(TopArgs),

    /// Inspect GitHub authentication
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Generate shell completion scripts
    #[command(subcommand)]
    Completion(CompletionCommand),
}

/// Arguments for the `top` command.
#[derive(clap::Args)]
pub struct TopArgs {
    /// Primary language to search for (prompted when omitted)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Only include repositories created after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub created_after: Option<NaiveDate>,

    /// Maximum number of repositories to show (defaults to config)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Stop paginating after this many search results (0 = unlimited)
    #[arg(long)]
    pub max_results: Option<u64>,

    /// Override the GitHub API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommand {
    /// Show which GitHub token, if any, would be used
    Status,
}

/// Shell completion subcommands
#[derive(Subcommand)]
pub enum CompletionCommand {
    /// Print a completion script to stdout
    #[command(after_long_help = COMPLETION_GENERATE_HELP)]
    Generate {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
