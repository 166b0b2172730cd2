// SPDX-License-Identifier: Apache-2.0

//! HTTP page source for the GitHub REST search endpoint.
//!
//! Issues one `GET /search/repositories` request per call and maps the
//! outcome into the [`RepoScoreError`] taxonomy. Retries and pagination are
//! handled by [`crate::search::Fetcher`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::error::RepoScoreError;
use crate::retry::{classify_reqwest, classify_status};
use crate::search::{PER_PAGE, PageSource, SearchPage};

/// Default GitHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// GitHub REST API version header value.
pub const API_VERSION: &str = "2022-11-28";

/// Client for the repository search endpoint.
///
/// Holds the HTTP client, base URL and optional token for reuse across pages.
#[derive(Debug)]
pub struct GitHubSearchClient {
    /// HTTP client with configured timeouts.
    http: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Bearer token, if any.
    token: Option<SecretString>,
}

impl GitHubSearchClient {
    /// Creates a search client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base URL (e.g. `https://api.github.com`)
    /// * `token` - Optional bearer token sent as `Authorization: Bearer <token>`
    /// * `timeout` - Per-request timeout (whole request, including body)
    /// * `connect_timeout` - Connection establishment timeout
    ///
    /// # Errors
    ///
    /// Returns `RepoScoreError::Unexpected` if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        token: Option<SecretString>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("reposcore/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| RepoScoreError::Unexpected {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Returns the search endpoint URL.
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/search/repositories", self.base_url)
    }

    /// Returns true if requests carry an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl PageSource for GitHubSearchClient {
    #[instrument(skip(self), fields(url = %self.search_url()))]
    async fn fetch_page(&self, query: &str, page: u32) -> crate::Result<SearchPage> {
        let per_page = PER_PAGE.to_string();
        let page_param = page.to_string();
        let mut req = self.http.get(self.search_url()).query(&[
            ("q", query),
            ("sort", "stars"),
            ("order", "desc"),
            ("per_page", per_page.as_str()),
            ("page", page_param.as_str()),
        ]);

        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }

        let response = req.send().await.map_err(|e| classify_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|e| {
                debug!(error = %e, "Failed to read error response body");
                "Unknown error".to_string()
            });
            warn!(
                status = status.as_u16(),
                body = %error_body,
                "Search API request failed"
            );
            return Err(classify_status(status.as_u16(), error_body));
        }

        let body = response.text().await.map_err(|e| classify_reqwest(&e))?;
        if body.trim().is_empty() {
            warn!(page, "Response successful but body was empty");
            return Err(RepoScoreError::EmptyResponseBody { page });
        }

        let parsed: SearchPage = serde_json::from_str(&body).map_err(|e| {
            warn!(page, error = %e, "Response successful but body could not be parsed");
            RepoScoreError::EmptyResponseBody { page }
        })?;

        debug!(
            page,
            items = parsed.items.len(),
            total_count = parsed.total_count,
            "Received search page"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str, token: Option<&str>) -> GitHubSearchClient {
        GitHubSearchClient::new(
            base_url,
            token.map(|t| SecretString::from(t.to_string())),
            Duration::from_secs(30),
            Duration::from_secs(30),
        )
        .unwrap()
    }

    #[test]
    fn search_url_trims_trailing_slash() {
        let client = client("https://api.github.com/", None);
        assert_eq!(
            client.search_url(),
            "https://api.github.com/search/repositories"
        );
    }

    #[test]
    fn search_url_keeps_path_prefix() {
        let client = client("https://ghe.example.com/api/v3", None);
        assert_eq!(
            client.search_url(),
            "https://ghe.example.com/api/v3/search/repositories"
        );
    }

    #[test]
    fn is_authenticated_reflects_token() {
        assert!(!client(DEFAULT_BASE_URL, None).is_authenticated());
        assert!(client(DEFAULT_BASE_URL, Some("ghp_test")).is_authenticated());
    }

    #[test]
    fn debug_output_does_not_leak_token() {
        let client = client(DEFAULT_BASE_URL, Some("ghp_supersecret"));
        assert!(!format!("{client:?}").contains("ghp_supersecret"));
    }
}
