// SPDX-License-Identifier: Apache-2.0

//! High-level entry points for front ends.
//!
//! Wires configuration, credentials and the HTTP page source into a
//! [`RepoScoreService`], so callers only supply a [`TokenProvider`] and the
//! search filters.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::auth::TokenProvider;
use crate::config::AppConfig;
use crate::github::GitHubSearchClient;
use crate::scoring::Scorer;
use crate::search::Fetcher;
use crate::service::{RepoScoreService, ScoredRepository};

/// Builds a service backed by the GitHub search API.
///
/// # Errors
///
/// Returns an error if:
/// - The configured scoring weights are invalid
/// - The HTTP client cannot be created
pub fn build_service(
    provider: &dyn TokenProvider,
    config: &AppConfig,
) -> crate::Result<RepoScoreService<GitHubSearchClient>> {
    let scorer = Scorer::new(config.scoring.weights())?;

    let token = provider.github_token();
    debug!(
        authenticated = token.is_some(),
        base_url = %config.github.base_url,
        "Creating search client"
    );
    let client = GitHubSearchClient::new(
        &config.github.base_url,
        token,
        config.github.timeout(),
        config.github.connect_timeout(),
    )?;

    let fetcher = Fetcher::with_options(client, config.search.fetch_options());
    Ok(RepoScoreService::new(fetcher, scorer))
}

/// Fetches, scores and ranks repositories matching the filters.
///
/// # Arguments
///
/// * `provider` - Token provider for GitHub credentials (may yield no token)
/// * `config` - Application configuration
/// * `language` - Language filter (e.g. "kotlin")
/// * `created_after` - Only repositories created after this date
/// * `limit` - Maximum number of repositories returned
///
/// # Errors
///
/// Returns an error if the service cannot be built or any page fetch fails.
#[instrument(skip(provider, config))]
pub async fn top_repositories(
    provider: &dyn TokenProvider,
    config: &AppConfig,
    language: &str,
    created_after: NaiveDate,
    limit: usize,
) -> crate::Result<Vec<ScoredRepository>> {
    let service = build_service(provider, config)?;
    service
        .top_repositories(language, created_after, limit)
        .await
}
