// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers and consumed by output renderers.

use chrono::NaiveDate;
use reposcore_core::{ScoredRepository, TokenSource};
use serde::Serialize;

/// Result from the `top` command.
#[derive(Debug, Clone, Serialize)]
pub struct TopResult {
    /// Language filter used for the search.
    pub language: String,
    /// Creation date lower bound used for the search.
    pub created_after: NaiveDate,
    /// Ranked repositories, highest score first.
    pub repositories: Vec<ScoredRepository>,
}

/// Result from the `auth status` command.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatusResult {
    /// Whether a GitHub token is available.
    pub authenticated: bool,
    /// Where the token came from (if any).
    pub method: Option<TokenSource>,
}
