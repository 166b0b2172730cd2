// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction for credential resolution.
//!
//! The core never decides where credentials come from. Front ends implement
//! `TokenProvider` and hand it to [`crate::facade::top_repositories`].

use secrecy::SecretString;

/// Provides the GitHub credentials used for search requests.
///
/// Returning `None` is valid: the search endpoint is then queried
/// anonymously, with a lower rate limit.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    fn github_token(&self) -> Option<SecretString>;
}

/// Provider that never returns a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl TokenProvider for Anonymous {
    fn github_token(&self) -> Option<SecretString> {
        None
    }
}
