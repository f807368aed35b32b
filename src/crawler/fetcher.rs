//! Page fetcher with bounded concurrency and retry
//!
//! All listing traffic funnels through [`PageFetcher::fetch_page`]: one GET
//! per call, gated by a shared semaphore so the total number of in-flight
//! requests against the rate-limited proxy stays bounded no matter how wide
//! the tree fans out.
//!
//! # Retry logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Network error / non-2xx | Retry same URL, linear backoff (1x, 2x, 3x unit) |
//! | Retry budget exhausted | Transport error with URL and status |
//! | HTTP 401 | One token-refresh + same-page retry, outside the budget |
//! | 2xx, no `Response`/empty `elements` | `Ok(None)` — valid empty page |

use crate::config::CrawlerConfig;
use crate::remote::{Envelope, PageResult, TokenRefresher};
use crate::MirrorError;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Fetches single listing pages through the proxy
pub struct PageFetcher {
    client: Client,
    limiter: Arc<Semaphore>,
    refresher: TokenRefresher,
    retry_limit: u32,
    backoff_unit: Duration,
}

enum FetchOutcome {
    Page(PageResult),
    Empty,
    AuthExpired,
}

impl PageFetcher {
    pub fn new(client: Client, config: &CrawlerConfig, refresher: TokenRefresher) -> Self {
        Self {
            client,
            limiter: Arc::new(Semaphore::new(config.max_concurrent_requests as usize)),
            refresher,
            retry_limit: config.retry_limit,
            backoff_unit: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Fetches one page of child elements.
    ///
    /// `Ok(None)` means the address holds no data (an empty folder), which is
    /// distinct from a transport failure.
    pub async fn fetch_page(&self, url: &str) -> Result<Option<PageResult>, MirrorError> {
        // Permits are acquired per attempt so a backoff sleep does not hold
        // a request slot.
        let mut refreshed = false;
        let mut attempt = 0u32;

        loop {
            let outcome = {
                let _permit =
                    self.limiter.acquire().await.map_err(|_| {
                        MirrorError::Task("request limiter closed".to_string())
                    })?;
                self.send(url).await
            };

            match outcome {
                Ok(FetchOutcome::Page(page)) => return Ok(Some(page)),
                Ok(FetchOutcome::Empty) => return Ok(None),
                Ok(FetchOutcome::AuthExpired) if !refreshed => {
                    // One refresh cycle per fetch, not counted against the
                    // retry budget; the original page URL is retried as-is.
                    refreshed = true;
                    self.refresher.refresh(&self.client).await?;
                }
                Ok(FetchOutcome::AuthExpired) => {
                    return Err(MirrorError::Transport {
                        url: url.to_string(),
                        status: Some(StatusCode::UNAUTHORIZED.as_u16()),
                        message: "credentials still stale after refresh".to_string(),
                    });
                }
                Err(error) => {
                    attempt += 1;
                    if attempt > self.retry_limit {
                        return Err(error);
                    }
                    let delay = self.backoff_unit * attempt;
                    tracing::warn!(
                        "Fetch attempt {} failed for {}: {}; retrying in {:?}",
                        attempt,
                        url,
                        error,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn send(&self, url: &str) -> Result<FetchOutcome, MirrorError> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| MirrorError::Transport {
                    url: url.to_string(),
                    status: e.status().map(|s| s.as_u16()),
                    message: e.to_string(),
                })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Ok(FetchOutcome::AuthExpired);
        }

        if !status.is_success() {
            return Err(MirrorError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("unexpected HTTP {}", status.as_u16()),
            });
        }

        let envelope: Envelope =
            response
                .json()
                .await
                .map_err(|e| MirrorError::Transport {
                    url: url.to_string(),
                    status: Some(status.as_u16()),
                    message: format!("malformed listing payload: {}", e),
                })?;

        Ok(match envelope.into_page() {
            Some(page) => FetchOutcome::Page(page),
            None => FetchOutcome::Empty,
        })
    }
}

/// Builds the HTTP client shared by all remote calls
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("treemirror/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }

    // Retry, backoff, and refresh behavior are exercised against mock
    // servers in tests/crawl_tests.rs.
}
