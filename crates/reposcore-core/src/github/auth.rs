// SPDX-License-Identifier: Apache-2.0

//! GitHub token resolution.
//!
//! Searching works anonymously, but an authenticated client gets a much
//! larger rate limit. Tokens are resolved with a priority chain:
//! 1. Environment variable (`GH_TOKEN` or `GITHUB_TOKEN`)
//! 2. GitHub CLI (`gh auth token`)

use std::process::Command;

use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, instrument};

/// Source of the GitHub authentication token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// Token from `GH_TOKEN` or `GITHUB_TOKEN` environment variable.
    Environment,
    /// Token from `gh auth token` command.
    GhCli,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::GhCli => write!(f, "GitHub CLI"),
        }
    }
}

/// Environment variables checked for a token, in priority order.
pub const TOKEN_ENV_VARS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];

/// Attempts to get a token from the GitHub CLI (`gh auth token`).
///
/// Returns `None` if `gh` is not installed, not authenticated, or fails.
#[instrument]
fn get_token_from_gh_cli() -> Option<SecretString> {
    debug!("Attempting to get token from gh CLI");

    let output = Command::new("gh").args(["auth", "token"]).output();

    match output {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if token.is_empty() {
                debug!("gh auth token returned empty output");
                None
            } else {
                debug!("Successfully retrieved token from gh CLI");
                Some(SecretString::from(token))
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                status = ?output.status,
                stderr = %stderr.trim(),
                "gh auth token failed"
            );
            None
        }
        Err(e) => {
            debug!(error = %e, "Failed to execute gh command");
            None
        }
    }
}

/// Looks for a non-empty token in the environment variables of [`TOKEN_ENV_VARS`].
#[must_use]
pub fn token_from_env() -> Option<SecretString> {
    TOKEN_ENV_VARS.iter().find_map(|name| match std::env::var(name) {
        Ok(token) if !token.is_empty() => {
            debug!(variable = name, "Using token from environment variable");
            Some(SecretString::from(token))
        }
        _ => None,
    })
}

/// Resolves a GitHub token using the priority chain.
///
/// Returns the token and its source, or `None` if no token is found.
#[instrument]
pub fn resolve_token() -> Option<(SecretString, TokenSource)> {
    if let Some(token) = token_from_env() {
        return Some((token, TokenSource::Environment));
    }

    if let Some(token) = get_token_from_gh_cli() {
        debug!("Using token from GitHub CLI");
        return Some((token, TokenSource::GhCli));
    }

    debug!("No token found in any source");
    None
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;
    use serial_test::serial;

    use super::*;

    struct EnvGuard(Vec<(&'static str, Option<String>)>);

    impl EnvGuard {
        fn clear() -> Self {
            let saved = TOKEN_ENV_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect();
            for name in TOKEN_ENV_VARS {
                // SAFETY: tests touching the environment are serialized.
                unsafe { std::env::remove_var(name) };
            }
            Self(saved)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (name, value) in &self.0 {
                // SAFETY: tests touching the environment are serialized.
                unsafe {
                    match value {
                        Some(v) => std::env::set_var(name, v),
                        None => std::env::remove_var(name),
                    }
                }
            }
        }
    }

    #[test]
    fn token_source_display() {
        assert_eq!(TokenSource::Environment.to_string(), "environment variable");
        assert_eq!(TokenSource::GhCli.to_string(), "GitHub CLI");
    }

    #[test]
    fn token_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TokenSource::GhCli).unwrap(),
            "\"gh_cli\""
        );
    }

    #[test]
    #[serial]
    fn gh_token_takes_priority() {
        let _guard = EnvGuard::clear();
        // SAFETY: serialized test.
        unsafe {
            std::env::set_var("GH_TOKEN", "from-gh-token");
            std::env::set_var("GITHUB_TOKEN", "from-github-token");
        }

        let token = token_from_env().unwrap();
        assert_eq!(token.expose_secret(), "from-gh-token");
    }

    #[test]
    #[serial]
    fn empty_variables_are_skipped() {
        let _guard = EnvGuard::clear();
        // SAFETY: serialized test.
        unsafe {
            std::env::set_var("GH_TOKEN", "");
            std::env::set_var("GITHUB_TOKEN", "from-github-token");
        }

        let token = token_from_env().unwrap();
        assert_eq!(token.expose_secret(), "from-github-token");
    }

    #[test]
    #[serial]
    fn no_variables_yields_none() {
        let _guard = EnvGuard::clear();
        assert!(token_from_env().is_none());
    }

    #[test]
    #[serial]
    fn resolve_token_reports_environment_source() {
        let _guard = EnvGuard::clear();
        // SAFETY: serialized test.
        unsafe { std::env::set_var("GITHUB_TOKEN", "abc") };

        let (_, source) = resolve_token().unwrap();
        assert_eq!(source, TokenSource::Environment);
    }
}
