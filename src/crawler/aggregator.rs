//! Multi-page aggregation
//!
//! The first page of a listing reports the authoritative `total`; everything
//! past page 1 is fetched concurrently and merged. Order across pages is
//! irrelevant downstream (consumers group by type and parent, never by page
//! position), so results are taken in completion order.

use crate::crawler::fetcher::PageFetcher;
use crate::remote::{Element, PageResult, ProxyUrls};
use crate::MirrorError;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Number of pages a listing spans given its reported total
pub fn page_count(total: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Merges all pages of one listing into a single element set.
///
/// `target` is the page-less listing target the first page was fetched from;
/// pages `2..=page_count` are requested concurrently. A page that resolves to
/// no data is skipped; a transport failure on any page aborts the remaining
/// page fetches and propagates.
pub async fn aggregate(
    fetcher: &Arc<PageFetcher>,
    urls: &ProxyUrls,
    target: &str,
    first: PageResult,
    fallback_page_size: u32,
) -> Result<Vec<Element>, MirrorError> {
    let page_size = if first.page_size > 0 {
        first.page_size
    } else {
        fallback_page_size
    };
    let pages = page_count(first.total, page_size);

    let mut elements = first.elements;
    if pages <= 1 {
        return Ok(elements);
    }

    tracing::debug!(
        "Listing {} spans {} pages ({} elements total)",
        target,
        pages,
        first.total
    );

    let mut tasks = JoinSet::new();
    for page in 2..=pages {
        let fetcher = Arc::clone(fetcher);
        let url = urls.page_url(target, page);
        tasks.spawn(async move { fetcher.fetch_page(&url).await });
    }

    while let Some(joined) = tasks.join_next().await {
        let fetched = joined.map_err(|e| MirrorError::Task(e.to_string()))?;
        match fetched {
            Ok(Some(page)) => elements.extend(page.elements),
            Ok(None) => {} // a page that yielded nothing is not an error
            Err(error) => {
                tasks.abort_all();
                return Err(error);
            }
        }
    }

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_exact_multiple() {
        assert_eq!(page_count(1000, 1000), 1);
        assert_eq!(page_count(2000, 1000), 2);
    }

    #[test]
    fn test_page_count_with_remainder() {
        assert_eq!(page_count(2500, 1000), 3);
        assert_eq!(page_count(1001, 1000), 2);
        assert_eq!(page_count(1, 1000), 1);
    }

    #[test]
    fn test_page_count_empty() {
        assert_eq!(page_count(0, 1000), 0);
    }

    #[test]
    fn test_page_count_zero_page_size() {
        assert_eq!(page_count(2500, 0), 0);
    }
}
