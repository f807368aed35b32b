//! Crawler module for remote folder-tree discovery
//!
//! This module contains the core crawling logic, including:
//! - Single-page fetching with bounded concurrency and retry
//! - Multi-page aggregation driven by the first page's reported total
//! - Namespace root resolution
//! - Recursive fan-out with a wait-group completion barrier

mod aggregator;
mod coordinator;
mod fetcher;
mod roots;

pub use aggregator::{aggregate, page_count};
pub use coordinator::{CrawlOutcome, Crawler, FolderNode, NamespaceFailure};
pub use fetcher::{build_http_client, PageFetcher};
pub use roots::find_root;
