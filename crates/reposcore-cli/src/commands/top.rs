// SPDX-License-Identifier: Apache-2.0

//! Top repositories command.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use console::style;
use dialoguer::Input;
use reposcore_core::AppConfig;
use reposcore_core::utils::{default_created_after, parse_date};
use tracing::debug;

use super::maybe_spinner;
use crate::cli::{OutputContext, TopArgs};
use crate::commands::types::TopResult;
use crate::provider::CliTokenProvider;

/// Language searched when none is given.
pub const DEFAULT_LANGUAGE: &str = "kotlin";

/// Applies command-line overrides to the loaded configuration.
fn apply_overrides(args: &TopArgs, config: &mut AppConfig) {
    if let Some(base_url) = &args.base_url {
        config.github.base_url.clone_from(base_url);
        debug!("Overriding GitHub base URL to: {base_url}");
    }
    if let Some(max_results) = args.max_results {
        config.search.max_results = max_results;
        debug!("Overriding max results to: {max_results}");
    }
}

/// Returns the trimmed language, or the default when blank.
fn normalize_language(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parses prompted date input, falling back to `default` when invalid.
fn created_after_or_default(input: &str, default: NaiveDate) -> NaiveDate {
    parse_date(input).unwrap_or_else(|_| {
        eprintln!(
            "{} Invalid date {:?}, using {default}",
            style("!").yellow().bold(),
            input.trim()
        );
        default
    })
}

/// Prompt for the language to search for.
fn prompt_language() -> Result<String> {
    let language = Input::<String>::new()
        .with_prompt("Language")
        .default(DEFAULT_LANGUAGE.to_string())
        .interact()
        .context("Failed to read language from input")?;
    Ok(normalize_language(&language))
}

/// Prompt for the creation date lower bound.
fn prompt_created_after() -> Result<NaiveDate> {
    let default = default_created_after();
    let input = Input::<String>::new()
        .with_prompt("Created after (YYYY-MM-DD)")
        .default(default.to_string())
        .interact()
        .context("Failed to read date from input")?;
    Ok(created_after_or_default(&input, default))
}

/// Run the top command - fetch, score and rank repositories.
pub async fn run(args: TopArgs, ctx: &OutputContext, mut config: AppConfig) -> Result<TopResult> {
    apply_overrides(&args, &mut config);

    let can_prompt = ctx.is_interactive() && std::io::stdin().is_terminal();

    let language = match args.language.as_deref() {
        Some(language) => normalize_language(language),
        None if can_prompt => prompt_language()?,
        None => DEFAULT_LANGUAGE.to_string(),
    };
    let created_after = match args.created_after {
        Some(date) => date,
        None if can_prompt => prompt_created_after()?,
        None => default_created_after(),
    };
    let limit = args.limit.unwrap_or(config.search.default_limit);

    let spinner = maybe_spinner(ctx, &format!("Searching {language} repositories..."));
    let result = reposcore_core::top_repositories(
        &CliTokenProvider,
        &config,
        &language,
        created_after,
        limit,
    )
    .await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    Ok(TopResult {
        language,
        created_after,
        repositories: result?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TopArgs {
        TopArgs {
            language: None,
            created_after: None,
            limit: None,
            max_results: None,
            base_url: None,
        }
    }

    #[test]
    fn test_blank_language_uses_default() {
        assert_eq!(normalize_language("   "), "kotlin");
        assert_eq!(normalize_language(" rust "), "rust");
    }

    #[test]
    fn test_invalid_prompted_date_falls_back() {
        let default = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(created_after_or_default("not-a-date", default), default);
        assert_eq!(
            created_after_or_default("2023-06-15", default),
            NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_overrides_are_applied() {
        let mut config = AppConfig::default();
        let args = TopArgs {
            base_url: Some("http://localhost:8080".to_string()),
            max_results: Some(0),
            ..args()
        };

        apply_overrides(&args, &mut config);

        assert_eq!(config.github.base_url, "http://localhost:8080");
        assert_eq!(config.search.fetch_options().max_results, None);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = AppConfig::default();
        apply_overrides(&args(), &mut config);

        assert_eq!(config.github.base_url, "https://api.github.com");
        assert_eq!(config.search.max_results, 1000);
    }
}
