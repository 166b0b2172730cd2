// SPDX-License-Identifier: Apache-2.0

//! Repository scoring based on min-max scaling.
//!
//! A score is the weighted sum of three normalized signals:
//! - Stars, over `[0, 1_000_000]`
//! - Forks, over `[0, 100_000]`
//! - Recency (`365 - days since last update`), over `[0, 365]`
//!
//! Every signal is clamped to `[0, 1]` and the weights sum to 1, so the
//! score always lies in `[0, 1]`.

use chrono::{DateTime, Utc};

use crate::error::RepoScoreError;
use crate::search::RepositorySummary;

/// Star count at which the stars signal saturates.
pub const MAX_STARS: f64 = 1_000_000.0;

/// Fork count at which the forks signal saturates.
pub const MAX_FORKS: f64 = 100_000.0;

/// Recency window in days.
pub const RECENCY_WINDOW_DAYS: f64 = 365.0;

const SECONDS_PER_DAY: i64 = 86_400;

/// Relative weight of each scoring signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Weight of the stars signal.
    pub stars: f64,
    /// Weight of the forks signal.
    pub forks: f64,
    /// Weight of the recency signal.
    pub recency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            stars: 0.5,
            forks: 0.3,
            recency: 0.2,
        }
    }
}

impl ScoringWeights {
    #[allow(clippy::float_cmp)]
    fn validate(&self) -> crate::Result<()> {
        let weights = [self.stars, self.forks, self.recency];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RepoScoreError::InvalidWeights {
                message: format!(
                    "weights must be finite and non-negative (stars={}, forks={}, recency={})",
                    self.stars, self.forks, self.recency
                ),
            });
        }

        let sum = self.stars + self.forks + self.recency;
        if sum != 1.0 {
            return Err(RepoScoreError::InvalidWeights {
                message: format!("weights must sum to 1.0, got {sum}"),
            });
        }
        Ok(())
    }
}

/// Computes a bounded popularity score for a repository.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }
}

impl Scorer {
    /// Creates a scorer with the given weights.
    ///
    /// # Errors
    ///
    /// Returns `RepoScoreError::InvalidWeights` if a weight is negative or
    /// not finite, or if the weights do not sum to 1.0.
    pub fn new(weights: ScoringWeights) -> crate::Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Returns the weights this scorer was built with.
    #[must_use]
    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Scores a repository as of now.
    #[must_use]
    pub fn score(&self, repo: &RepositorySummary) -> f64 {
        self.score_at(repo, Utc::now())
    }

    /// Scores a repository as of the given instant.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score_at(&self, repo: &RepositorySummary, now: DateTime<Utc>) -> f64 {
        let days_since_update = days_between(repo.updated_at, now);

        let stars = normalize(repo.stargazers_count as f64, 0.0, MAX_STARS);
        let forks = normalize(repo.forks_count as f64, 0.0, MAX_FORKS);
        let recency = normalize(
            RECENCY_WINDOW_DAYS - days_since_update as f64,
            0.0,
            RECENCY_WINDOW_DAYS,
        );

        stars * self.weights.stars + forks * self.weights.forks + recency * self.weights.recency
    }
}

/// Whole days from `from` to `to`, rounded towards negative infinity.
fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.signed_duration_since(from)
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

/// Min-max normalization clamped to `[0, 1]`.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if value >= max {
        1.0
    } else if value <= min {
        0.0
    } else {
        (value - min) / (max - min)
    }
}
