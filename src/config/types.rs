use serde::Deserialize;

/// Main configuration structure for treemirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    pub endpoints: EndpointConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches across the whole crawl
    #[serde(rename = "max-concurrent-requests", default = "default_concurrency")]
    pub max_concurrent_requests: u32,

    /// Page size the remote listing API serves (elements per page)
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Number of retries for a failed page fetch
    #[serde(rename = "retry-limit", default = "default_retry_limit")]
    pub retry_limit: u32,

    /// Backoff unit in milliseconds; retry n sleeps n times this long
    #[serde(rename = "retry-backoff-ms", default = "default_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_concurrency() -> u32 {
    8
}

fn default_page_size() -> u32 {
    1000
}

fn default_retry_limit() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    500
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_concurrency(),
            page_size: default_page_size(),
            retry_limit: default_retry_limit(),
            retry_backoff_ms: default_backoff_ms(),
        }
    }
}

/// External collaborator endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// Token-bearing proxy that forwards listing requests to the asset store
    #[serde(rename = "proxy-url")]
    pub proxy_url: String,

    /// Token refresh collaborator, invoked on stale credentials
    #[serde(rename = "token-service-url")]
    pub token_service_url: String,

    /// Endpoint that stores the final flat folder-record list
    #[serde(rename = "persistence-url")]
    pub persistence_url: String,
}
