// SPDX-License-Identifier: Apache-2.0

//! Retry policy with exponential backoff for search page requests.
//!
//! Provides the per-page retry settings and the helpers that decide which
//! failures are transient. The retry loop itself lives in [`crate::search`].

use std::time::Duration;

use crate::error::RepoScoreError;

/// HTTP status the search API uses to signal rate limiting.
pub const RATE_LIMIT_STATUS: u16 = 403;

/// Per-page retry settings.
///
/// Defaults:
/// - Max attempts: 3
/// - Initial delay: 1 second
/// - Factor: 2 (doubled after every failed attempt)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts per page (including the first one).
    ///
    /// 0 is treated as 1: every page is requested at least once.
    pub max_retries: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the given attempt count and initial delay in milliseconds.
    #[must_use]
    pub fn new(max_retries: u32, initial_delay_ms: u64) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(initial_delay_ms),
        }
    }
}

/// Determines if a failure should consume an attempt and be retried.
///
/// Retryable failures are:
/// - Timeouts and I/O failures (`TransientNetwork`)
/// - HTTP 403 (`RateLimited`)
/// - Any other non-success HTTP status (`HttpStatus`)
///
/// Empty bodies and unexpected errors are terminal.
#[must_use]
pub fn is_retryable(e: &RepoScoreError) -> bool {
    matches!(
        e,
        RepoScoreError::TransientNetwork { .. }
            | RepoScoreError::RateLimited { .. }
            | RepoScoreError::HttpStatus { .. }
    )
}

/// Determines if a failure should amplify the backoff delay.
#[must_use]
pub fn is_rate_limited(e: &RepoScoreError) -> bool {
    matches!(e, RepoScoreError::RateLimited { .. })
}

/// Maps a non-success HTTP status and its body to a `RepoScoreError`.
#[must_use]
pub fn classify_status(status: u16, body: String) -> RepoScoreError {
    if status == RATE_LIMIT_STATUS {
        RepoScoreError::RateLimited { message: body }
    } else {
        RepoScoreError::HttpStatus {
            status,
            message: body,
        }
    }
}

/// Maps a `reqwest` error into the retry taxonomy.
///
/// Timeouts, connection failures and body read failures are transient;
/// everything else (builder, redirect, decode) is unexpected.
#[must_use]
pub fn classify_reqwest(e: &reqwest::Error) -> RepoScoreError {
    if e.is_timeout() {
        return RepoScoreError::TransientNetwork {
            message: format!("request timed out: {e}"),
        };
    }
    if e.is_connect() || e.is_request() || e.is_body() {
        return RepoScoreError::TransientNetwork {
            message: e.to_string(),
        };
    }
    RepoScoreError::Unexpected {
        message: e.to_string(),
    }
}
