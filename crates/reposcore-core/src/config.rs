// SPDX-License-Identifier: Apache-2.0

//! Configuration management for reposcore.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `REPOSCORE_`)
//! 2. Config file: `~/.config/reposcore/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Allow more attempts per page via environment variable
//! REPOSCORE_SEARCH__MAX_RETRIES=5 reposcore top --language rust
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::RepoScoreError;
use crate::github::DEFAULT_BASE_URL;
use crate::retry::RetryPolicy;
use crate::scoring::ScoringWeights;
use crate::search::FetchOptions;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Search and pagination settings.
    pub search: SearchConfig,
    /// Scoring weights.
    pub scoring: ScoringConfig,
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// API base URL.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Connection timeout in seconds.
    pub connect_timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_timeout_seconds: 30,
            connect_timeout_seconds: 30,
        }
    }
}

impl GitHubConfig {
    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }

    /// Connection timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Search and pagination settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Attempts per page before giving up.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Number of repositories returned when no limit is given.
    pub default_limit: usize,
    /// Stop paginating after this many results (0 = unlimited).
    ///
    /// The search API only serves the first 1000 matches, so requesting
    /// further pages fails.
    pub max_results: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            default_limit: crate::service::DEFAULT_LIMIT,
            max_results: 1000,
        }
    }
}

impl SearchConfig {
    /// Per-page retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.initial_delay_ms)
    }

    /// Fetch options derived from this section.
    #[must_use]
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            retry: self.retry_policy(),
            max_results: (self.max_results > 0).then_some(self.max_results),
        }
    }
}

/// Scoring weights.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the stars signal.
    pub stars_weight: f64,
    /// Weight of the forks signal.
    pub forks_weight: f64,
    /// Weight of the recency signal.
    pub recency_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let weights = ScoringWeights::default();
        Self {
            stars_weight: weights.stars,
            forks_weight: weights.forks,
            recency_weight: weights.recency,
        }
    }
}

impl ScoringConfig {
    /// Scoring weights (validated when the scorer is built).
    #[must_use]
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            stars: self.stars_weight,
            forks: self.forks_weight,
            recency: self.recency_weight,
        }
    }
}

/// Returns the reposcore configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/reposcore`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("reposcore");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("reposcore")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration from the default location.
///
/// Environment variables use the prefix `REPOSCORE_` and double underscore
/// for nested keys (e.g., `REPOSCORE_GITHUB__BASE_URL`).
///
/// # Errors
///
/// Returns `RepoScoreError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, RepoScoreError> {
    load_config_from(&config_file_path())
}

/// Load application configuration from an explicit file path.
///
/// A missing file is not an error; defaults and environment variables apply.
///
/// # Errors
///
/// Returns `RepoScoreError::Config` if the file is invalid.
pub fn load_config_from(path: &Path) -> Result<AppConfig, RepoScoreError> {
    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::from(path).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("REPOSCORE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
