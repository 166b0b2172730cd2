// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `RepoScoreError` and appends a hint suited
//! to the failure. Structured error data stays in the library.

use anyhow::Error;
use reposcore_core::error::RepoScoreError;

/// Returns the hint for a failure, looking through exhausted retries.
fn hint(err: &RepoScoreError) -> Option<String> {
    let tip = match err {
        RepoScoreError::PageExhausted { last_error, .. } => return hint(last_error),
        RepoScoreError::RateLimited { .. } => {
            "The GitHub search API rate limit was hit. Set GH_TOKEN or run \
             `gh auth login` for a higher limit, or try again in a minute."
                .to_string()
        }
        RepoScoreError::TransientNetwork { .. } => {
            "Check your internet connection and try again.".to_string()
        }
        RepoScoreError::HttpStatus { status: 401, .. } => {
            "Your GitHub token was rejected. Check `reposcore auth status`.".to_string()
        }
        RepoScoreError::HttpStatus { status: 422, .. } => {
            "The search query was rejected. Check the language name and date.".to_string()
        }
        RepoScoreError::HttpStatus { status, .. } if *status >= 500 => {
            "GitHub is having trouble answering. Try again later.".to_string()
        }
        RepoScoreError::EmptyResponseBody { .. } => {
            "GitHub returned an empty response. This is usually temporary; try again.".to_string()
        }
        RepoScoreError::InvalidWeights { .. } | RepoScoreError::Config { .. } => format!(
            "Check your config file at {}",
            reposcore_core::config::config_file_path().display()
        ),
        RepoScoreError::HttpStatus { .. } | RepoScoreError::Unexpected { .. } => return None,
    };
    Some(tip)
}

/// Formats an error for CLI display with helpful hints.
///
/// If the error chain contains no `RepoScoreError`, returns the error chain
/// as-is.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<RepoScoreError>())
    else {
        return format!("{error:#}");
    };

    match hint(err) {
        Some(hint) => format!("{err}\n\nTip: {hint}"),
        None => err.to_string(),
    }
}
