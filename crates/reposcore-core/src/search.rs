// SPDX-License-Identifier: Apache-2.0

//! Paginated repository search.
//!
//! The [`Fetcher`] walks the search endpoint page by page, retrying each page
//! with exponential backoff, and merges every page into one [`SearchPage`].
//! The network side is hidden behind the [`PageSource`] trait so the
//! pagination and retry logic can run against a scripted source in tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::error::RepoScoreError;
use crate::retry::{self, RetryPolicy};

/// Number of items requested per page.
pub const PER_PAGE: u32 = 100;

/// A repository as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bon::Builder)]
pub struct RepositorySummary {
    /// Numeric repository identifier.
    pub id: u64,
    /// Short repository name.
    pub name: String,
    /// Qualified name in "owner/name" format.
    pub full_name: String,
    /// Number of stars.
    pub stargazers_count: u64,
    /// Number of forks.
    pub forks_count: u64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Primary programming language.
    pub language: Option<String>,
}

/// One page of search results, or the merge of several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total number of matches reported by the server.
    pub total_count: u64,
    /// Whether the server flagged the results as partial.
    #[serde(default)]
    pub incomplete_results: bool,
    /// Repositories in server order.
    pub items: Vec<RepositorySummary>,
}

impl SearchPage {
    /// Returns an empty page with a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            incomplete_results: false,
            items: Vec::new(),
        }
    }
}

/// Issues a single search page request.
///
/// Implementations map transport failures into the [`RepoScoreError`]
/// taxonomy; the [`Fetcher`] decides what to retry.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches page `page` (1-based) for `query`.
    async fn fetch_page(&self, query: &str, page: u32) -> crate::Result<SearchPage>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for &S {
    async fn fetch_page(&self, query: &str, page: u32) -> crate::Result<SearchPage> {
        (**self).fetch_page(query, page).await
    }
}

/// Options controlling a multi-page fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Per-page retry settings.
    pub retry: RetryPolicy,
    /// Stop once this many items have been gathered (`None` = no cap).
    pub max_results: Option<u64>,
}

/// Build a search query from a language and a creation date lower bound.
///
/// Produces `language:<lang> created:><YYYY-MM-DD>`.
#[must_use]
pub fn build_search_query(language: &str, created_after: NaiveDate) -> String {
    format!(
        "language:{language} created:>{}",
        created_after.format("%Y-%m-%d")
    )
}

/// Fetches every page of a repository search.
#[derive(Debug)]
pub struct Fetcher<S> {
    source: S,
    options: FetchOptions,
}

impl<S> Fetcher<S> {
    /// Returns the underlying page source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the fetch options.
    #[must_use]
    pub fn options(&self) -> FetchOptions {
        self.options
    }
}

impl<S: PageSource> Fetcher<S> {
    /// Creates a fetcher with default options.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_options(source, FetchOptions::default())
    }

    /// Creates a fetcher with explicit options.
    #[must_use]
    pub fn with_options(source: S, options: FetchOptions) -> Self {
        Self { source, options }
    }

    /// Fetches and merges all result pages for the given filters.
    ///
    /// Pages are requested sequentially starting at 1. Fetching stops when the
    /// accumulated count reaches the reported total (or the configured cap),
    /// or when a page comes back empty.
    ///
    /// # Errors
    ///
    /// Returns the first unrecoverable page failure. Items gathered from
    /// earlier pages are discarded.
    #[instrument(skip(self), fields(max_results = ?self.options.max_results))]
    pub async fn fetch_all(
        &self,
        language: &str,
        created_after: NaiveDate,
    ) -> crate::Result<SearchPage> {
        let query = build_search_query(language, created_after);
        debug!(query = %query, "Searching repositories");

        let mut items: Vec<RepositorySummary> = Vec::new();
        let mut page = 1u32;

        let total_count = loop {
            let result = self.fetch_page_with_retry(&query, page).await?;
            let total_count = result.total_count;
            let page_len = result.items.len();
            items.extend(result.items);

            info!(
                page,
                fetched = items.len(),
                total_count,
                "Fetched search page"
            );

            let total = usize::try_from(total_count).unwrap_or(usize::MAX);
            if items.len() > total {
                warn!(
                    fetched = items.len(),
                    total_count, "Server returned more items than its total, truncating"
                );
                items.truncate(total);
            }

            let target = match self.options.max_results {
                Some(cap) => total.min(usize::try_from(cap).unwrap_or(usize::MAX)),
                None => total,
            };
            if items.len() > target {
                debug!(cap = target, "Result cap reached, truncating");
                items.truncate(target);
            }

            if page_len == 0 || items.len() >= target {
                break total_count;
            }
            page += 1;
        };

        Ok(SearchPage {
            total_count,
            incomplete_results: false,
            items,
        })
    }

    /// Fetches one page, retrying transient failures with exponential backoff.
    ///
    /// The delay doubles after every failed attempt. A rate-limited attempt
    /// doubles it once more before waiting.
    async fn fetch_page_with_retry(&self, query: &str, page: u32) -> crate::Result<SearchPage> {
        let policy = self.options.retry;
        let max_attempts = policy.max_retries.max(1);
        let mut delay = policy.initial_delay;
        let mut attempt = 1;

        loop {
            let err = match self.source.fetch_page(query, page).await {
                Ok(result) => return Ok(result),
                Err(e) if retry::is_retryable(&e) => e,
                Err(e) => {
                    error!(page, attempt, error = %e, "Search page request failed, not retrying");
                    return Err(e);
                }
            };

            warn!(page, attempt, error = %err, "Search page request failed");
            // TODO: confirm whether a 403 should compound with the regular doubling
            if retry::is_rate_limited(&err) {
                warn!(page, "Rate limit exceeded, waiting longer before retry");
                delay = delay.saturating_mul(2);
            }

            if attempt >= max_attempts {
                error!(page, attempts = attempt, "Search page retries exhausted");
                return Err(RepoScoreError::PageExhausted {
                    page,
                    attempts: attempt,
                    last_error: Box::new(err),
                });
            }

            debug!(page, delay = ?delay, "Retrying after backoff");
            tokio::time::sleep(delay).await;
            delay = delay.saturating_mul(2);
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::TimeZone;
    use tokio::time::Instant;

    use super::*;

    /// Scripted page source: each page has a queue of outcomes, consumed one
    /// per request. The last outcome is repeated once the queue runs dry.
    #[derive(Default)]
    struct ScriptedSource {
        script: Mutex<HashMap<u32, VecDeque<crate::Result<SearchPage>>>>,
        calls: Mutex<Vec<(u32, Instant)>>,
    }

    impl ScriptedSource {
        fn on_page(self, page: u32, outcomes: Vec<crate::Result<SearchPage>>) -> Self {
            self.script
                .lock()
                .unwrap()
                .insert(page, outcomes.into_iter().collect());
            self
        }

        fn calls_for(&self, page: u32) -> Vec<Instant> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(p, _)| *p == page)
                .map(|(_, at)| *at)
                .collect()
        }

        fn pages_requested(&self) -> Vec<u32> {
            self.calls.lock().unwrap().iter().map(|(p, _)| *p).collect()
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, query: &str, page: u32) -> crate::Result<SearchPage> {
            assert!(query.starts_with("language:kotlin created:>"));
            self.calls.lock().unwrap().push((page, Instant::now()));
            let mut script = self.script.lock().unwrap();
            let queue = script
                .get_mut(&page)
                .unwrap_or_else(|| panic!("unexpected request for page {page}"));
            if queue.len() > 1 {
                queue.pop_front().unwrap()
            } else {
                queue.front().cloned().unwrap()
            }
        }
    }

    fn repo(id: u64, name: &str, stars: u64) -> RepositorySummary {
        let ts = Utc.with_ymd_and_hms(2024, 2, 9, 12, 0, 0).unwrap();
        RepositorySummary::builder()
            .id(id)
            .name(name.to_string())
            .full_name(format!("test/{name}"))
            .stargazers_count(stars)
            .forks_count(stars / 2)
            .updated_at(ts)
            .created_at(ts)
            .language("kotlin".to_string())
            .build()
    }

    fn page(total: u64, items: Vec<RepositorySummary>) -> crate::Result<SearchPage> {
        Ok(SearchPage {
            total_count: total,
            incomplete_results: false,
            items,
        })
    }

    fn rate_limited() -> crate::Result<SearchPage> {
        Err(RepoScoreError::RateLimited {
            message: "API rate limit exceeded".to_string(),
        })
    }

    fn timeout() -> crate::Result<SearchPage> {
        Err(RepoScoreError::TransientNetwork {
            message: "request timed out".to_string(),
        })
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Timer deadlines round up to the next millisecond tick.
    fn assert_waited(actual: Duration, expected_ms: u64) {
        let expected = Duration::from_millis(expected_ms);
        assert!(
            actual >= expected && actual <= expected + Duration::from_millis(1),
            "waited {actual:?}, expected {expected:?}"
        );
    }

    fn fast_options(max_retries: u32) -> FetchOptions {
        FetchOptions {
            retry: RetryPolicy::new(max_retries, 100),
            max_results: None,
        }
    }

    #[test]
    fn build_search_query_combines_predicates() {
        let query = build_search_query("kotlin", date());
        assert_eq!(query, "language:kotlin created:>2024-01-01");
    }

    #[test]
    fn search_page_deserializes_api_payload() {
        let json = r#"{
            "total_count": 1,
            "incomplete_results": false,
            "items": [{
                "id": 7,
                "name": "repo1",
                "full_name": "test/repo1",
                "stargazers_count": 100,
                "forks_count": 50,
                "updated_at": "2024-02-09T12:00:00Z",
                "created_at": "2024-01-09T12:00:00Z",
                "language": null,
                "description": "ignored"
            }]
        }"#;
        let parsed: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.total_count, 1);
        assert_eq!(parsed.items[0].full_name, "test/repo1");
        assert_eq!(parsed.items[0].stargazers_count, 100);
        assert!(parsed.items[0].language.is_none());
    }

    #[tokio::test]
    async fn merges_results_from_multiple_pages() {
        let source = ScriptedSource::default()
            .on_page(1, vec![page(3, vec![repo(1, "repo1", 100), repo(2, "repo2", 90)])])
            .on_page(2, vec![page(3, vec![repo(3, "repo3", 80)])]);
        let fetcher = Fetcher::new(&source);

        let result = fetcher.fetch_all("kotlin", date()).await.unwrap();

        assert_eq!(result.total_count, 3);
        let names: Vec<_> = result.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["repo1", "repo2", "repo3"]);
        assert_eq!(source.pages_requested(), [1, 2]);
    }

    #[tokio::test]
    async fn zero_matches_is_an_empty_success() {
        let source = ScriptedSource::default().on_page(1, vec![page(0, vec![])]);
        let result = Fetcher::new(&source)
            .fetch_all("kotlin", date())
            .await
            .unwrap();

        assert_eq!(result, SearchPage::empty());
        assert_eq!(source.pages_requested(), [1]);
    }

    #[tokio::test]
    async fn empty_page_stops_pagination_before_total() {
        let source = ScriptedSource::default()
            .on_page(1, vec![page(10, vec![repo(1, "repo1", 100)])])
            .on_page(2, vec![page(10, vec![])]);
        let result = Fetcher::new(&source)
            .fetch_all("kotlin", date())
            .await
            .unwrap();

        assert_eq!(result.total_count, 10);
        assert_eq!(result.items.len(), 1);
        assert_eq!(source.pages_requested(), [1, 2]);
    }

    #[tokio::test]
    async fn accumulation_never_exceeds_reported_total() {
        let source = ScriptedSource::default().on_page(
            1,
            vec![page(1, vec![repo(1, "repo1", 100), repo(2, "repo2", 90)])],
        );
        let result = Fetcher::new(&source)
            .fetch_all("kotlin", date())
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "repo1");
    }

    #[tokio::test]
    async fn max_results_caps_pagination() {
        let source = ScriptedSource::default()
            .on_page(1, vec![page(5000, vec![repo(1, "repo1", 100), repo(2, "repo2", 90)])])
            .on_page(2, vec![page(5000, vec![repo(3, "repo3", 80), repo(4, "repo4", 70)])]);
        let options = FetchOptions {
            max_results: Some(3),
            ..FetchOptions::default()
        };
        let result = Fetcher::with_options(&source, options)
            .fetch_all("kotlin", date())
            .await
            .unwrap();

        assert_eq!(result.total_count, 5000);
        assert_eq!(result.items.len(), 3);
        assert_eq!(source.pages_requested(), [1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_page_is_retried_without_data_loss() {
        let source = ScriptedSource::default()
            .on_page(1, vec![page(2, vec![repo(1, "repo1", 100)])])
            .on_page(2, vec![rate_limited(), page(2, vec![repo(2, "repo2", 90)])]);
        let fetcher = Fetcher::with_options(&source, fast_options(3));

        let result = fetcher.fetch_all("kotlin", date()).await.unwrap();

        assert_eq!(result.total_count, 2);
        let names: Vec<_> = result.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["repo1", "repo2"]);
        assert_eq!(source.pages_requested(), [1, 2, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_amplifies_backoff() {
        let source = ScriptedSource::default().on_page(
            1,
            vec![rate_limited(), rate_limited(), page(0, vec![])],
        );
        Fetcher::with_options(&source, fast_options(3))
            .fetch_all("kotlin", date())
            .await
            .unwrap();

        let calls = source.calls_for(1);
        assert_eq!(calls.len(), 3);
        // 100ms doubled for the 403 -> wait 200ms, carry 400ms
        assert_waited(calls[1] - calls[0], 200);
        // 400ms doubled for the 403 -> wait 800ms
        assert_waited(calls[2] - calls[1], 800);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_back_off_exponentially() {
        let source = ScriptedSource::default().on_page(1, vec![timeout(), timeout(), page(0, vec![])]);
        Fetcher::with_options(&source, fast_options(3))
            .fetch_all("kotlin", date())
            .await
            .unwrap();

        let calls = source.calls_for(1);
        assert_waited(calls[1] - calls[0], 100);
        assert_waited(calls[2] - calls[1], 200);
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_timeout_fails_without_partial_results() {
        let source = ScriptedSource::default()
            .on_page(1, vec![page(2, vec![repo(1, "repo1", 100)])])
            .on_page(2, vec![timeout()]);

        let err = Fetcher::with_options(&source, fast_options(3))
            .fetch_all("kotlin", date())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RepoScoreError::PageExhausted {
                page: 2,
                attempts: 3,
                last_error: Box::new(RepoScoreError::TransientNetwork {
                    message: "request timed out".to_string(),
                }),
            }
        );
        assert_eq!(source.calls_for(2).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn no_sleep_after_final_attempt() {
        let source = ScriptedSource::default().on_page(1, vec![timeout()]);
        let start = Instant::now();

        Fetcher::with_options(&source, fast_options(2))
            .fetch_all("kotlin", date())
            .await
            .unwrap_err();

        assert_waited(start.elapsed(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn other_http_statuses_are_retried() {
        let source = ScriptedSource::default().on_page(
            1,
            vec![
                Err(RepoScoreError::HttpStatus {
                    status: 502,
                    message: "Bad Gateway".to_string(),
                }),
                page(1, vec![repo(1, "repo1", 100)]),
            ],
        );
        let result = Fetcher::with_options(&source, fast_options(3))
            .fetch_all("kotlin", date())
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(source.calls_for(1).len(), 2);
    }

    #[tokio::test]
    async fn empty_body_is_not_retried() {
        let source = ScriptedSource::default()
            .on_page(1, vec![Err(RepoScoreError::EmptyResponseBody { page: 1 })]);

        let err = Fetcher::with_options(&source, fast_options(3))
            .fetch_all("kotlin", date())
            .await
            .unwrap_err();

        assert_eq!(err, RepoScoreError::EmptyResponseBody { page: 1 });
        assert_eq!(source.calls_for(1).len(), 1);
    }

    #[tokio::test]
    async fn unexpected_error_aborts_immediately() {
        let source = ScriptedSource::default()
            .on_page(1, vec![page(2, vec![repo(1, "repo1", 100)])])
            .on_page(
                2,
                vec![Err(RepoScoreError::Unexpected {
                    message: "redirect loop".to_string(),
                })],
            );

        let err = Fetcher::with_options(&source, fast_options(3))
            .fetch_all("kotlin", date())
            .await
            .unwrap_err();

        assert!(matches!(err, RepoScoreError::Unexpected { .. }));
        assert_eq!(source.pages_requested(), [1, 2]);
    }

    #[tokio::test]
    async fn zero_retries_still_makes_one_attempt() {
        let source = ScriptedSource::default().on_page(1, vec![page(0, vec![])]);
        let result = Fetcher::with_options(&source, fast_options(0))
            .fetch_all("kotlin", date())
            .await;

        assert!(result.is_ok());
        assert_eq!(source.calls_for(1).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_failing_page_reports_one_attempt() {
        let source = ScriptedSource::default().on_page(1, vec![timeout()]);
        let err = Fetcher::with_options(&source, fast_options(0))
            .fetch_all("kotlin", date())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RepoScoreError::PageExhausted {
                page: 1,
                attempts: 1,
                ..
            }
        ));
        assert_eq!(source.calls_for(1).len(), 1);
    }
}
