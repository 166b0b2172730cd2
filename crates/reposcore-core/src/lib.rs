// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # reposcore Core
//!
//! Core library for reposcore - rank GitHub repositories by a weighted
//! popularity score.
//!
//! This crate provides reusable components for:
//! - Paginated repository search with per-page retry and backoff
//! - Min-max scoring of stars, forks and recency
//! - Aggregation into a ranked, truncated list
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use reposcore_core::{load_config, top_repositories, auth::Anonymous};
//!
//! # async fn example() -> reposcore_core::Result<()> {
//! let config = load_config()?;
//! let created_after = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//!
//! let repos = top_repositories(&Anonymous, &config, "rust", created_after, 10).await?;
//! for scored in repos {
//!     println!("{} {:.2}", scored.repo.full_name, scored.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub token resolution and HTTP search client
//! - [`retry`] - Retry policy and failure classification
//! - [`scoring`] - Repository scoring
//! - [`search`] - Paginated search
//! - [`service`] - Top repository aggregation

// ============================================================================
// Authentication
// ============================================================================

pub use auth::TokenProvider;

// ============================================================================
// Error Handling
// ============================================================================

pub use error::RepoScoreError;

/// Convenience Result type for reposcore operations.
///
/// This is equivalent to `std::result::Result<T, RepoScoreError>`.
pub type Result<T> = std::result::Result<T, RepoScoreError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, GitHubConfig, ScoringConfig, SearchConfig, config_dir, config_file_path,
    load_config, load_config_from,
};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::GitHubSearchClient;
pub use github::auth::TokenSource;

// ============================================================================
// Search, Scoring and Aggregation
// ============================================================================

pub use retry::RetryPolicy;
pub use scoring::{Scorer, ScoringWeights};
pub use search::{FetchOptions, Fetcher, PageSource, RepositorySummary, SearchPage};
pub use service::{DEFAULT_LIMIT, RepoScoreService, ScoredRepository};

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{build_service, top_repositories};

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod config;
pub mod error;
pub mod facade;
pub mod github;
pub mod retry;
pub mod scoring;
pub mod search;
pub mod service;
pub mod utils;
