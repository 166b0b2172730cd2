// SPDX-License-Identifier: Apache-2.0

//! Top repository aggregation.
//!
//! Fetches every matching repository, scores each one, and keeps the best
//! `limit` entries.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::scoring::Scorer;
use crate::search::{Fetcher, PageSource, RepositorySummary};

/// Number of repositories returned when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 500;

/// A repository paired with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRepository {
    /// The scored repository.
    pub repo: RepositorySummary,
    /// Score in `[0, 1]`.
    pub score: f64,
}

/// Orchestrates fetching and scoring.
#[derive(Debug)]
pub struct RepoScoreService<S> {
    fetcher: Fetcher<S>,
    scorer: Scorer,
}

impl<S: PageSource> RepoScoreService<S> {
    /// Creates a service from a fetcher and a scorer.
    #[must_use]
    pub fn new(fetcher: Fetcher<S>, scorer: Scorer) -> Self {
        Self { fetcher, scorer }
    }

    /// Returns the best `limit` repositories, highest score first.
    ///
    /// Repositories with equal scores keep the order the search API
    /// returned them in.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error unchanged.
    #[instrument(skip(self))]
    pub async fn top_repositories(
        &self,
        language: &str,
        created_after: NaiveDate,
        limit: usize,
    ) -> crate::Result<Vec<ScoredRepository>> {
        let response = self.fetcher.fetch_all(language, created_after).await?;

        let now = Utc::now();
        let mut scored: Vec<ScoredRepository> = response
            .items
            .into_iter()
            .map(|repo| {
                let score = self.scorer.score_at(&repo, now);
                ScoredRepository { repo, score }
            })
            .collect();

        // Stable sort: ties keep arrival order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);

        info!(count = scored.len(), "Successfully scored repositories");
        Ok(scored)
    }
}
