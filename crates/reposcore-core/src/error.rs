// SPDX-License-Identifier: Apache-2.0

//! Error types for reposcore.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Errors that can occur while fetching or scoring repositories.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepoScoreError {
    /// The server answered with a success status but the payload was missing
    /// or could not be decoded.
    #[error("Empty response body for search page {page}")]
    EmptyResponseBody {
        /// Page number that produced the empty body.
        page: u32,
    },

    /// Timeout, connection or I/O failure while talking to the search API.
    #[error("Network error: {message}")]
    TransientNetwork {
        /// Error message.
        message: String,
    },

    /// The search API answered with HTTP 403 (rate limit).
    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        /// Error body returned by the server.
        message: String,
    },

    /// The search API answered with a non-success status other than 403.
    #[error("Search API error (HTTP {status}): {message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Error body returned by the server.
        message: String,
    },

    /// Any failure that is not known to be transient.
    #[error("Unexpected error: {message}")]
    Unexpected {
        /// Error message.
        message: String,
    },

    /// Every attempt for one page failed.
    #[error("Failed to fetch page {page} after {attempts} attempts: {last_error}")]
    PageExhausted {
        /// Page number that could not be fetched.
        page: u32,
        /// Number of attempts made.
        attempts: u32,
        /// The last failure.
        last_error: Box<RepoScoreError>,
    },

    /// Scoring weights are invalid.
    #[error("Invalid scoring weights: {message}")]
    InvalidWeights {
        /// Error message.
        message: String,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },
}

impl From<config::ConfigError> for RepoScoreError {
    fn from(err: config::ConfigError) -> Self {
        RepoScoreError::Config {
            message: err.to_string(),
        }
    }
}
