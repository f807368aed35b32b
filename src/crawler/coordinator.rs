//! Tree crawl coordination
//!
//! Crawling is dynamic fan-out: processing one folder discovers child folders
//! whose own listings still have to be fetched, so the total amount of work
//! is unknown until a wave of fetches yields no new folders. Completion is
//! detected with a wait-group, not by polling a growing task list: every
//! discovered folder is spawned into a [`JoinSet`] *before* the node that
//! discovered it is recorded, and `join_next()` returning `None` is exactly
//! the zero-outstanding-work condition. A late arrival can therefore never
//! interleave with the completion check.

use crate::crawler::aggregator::aggregate;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::roots::find_root;
use crate::remote::{Element, ProxyUrls};
use crate::request::AssetTypeConfig;
use crate::MirrorError;
use std::sync::Arc;
use tokio::task::JoinSet;

/// One crawled folder with its fetched children
#[derive(Debug, Clone)]
pub struct FolderNode {
    pub root: Element,
    pub children: Vec<Element>,
    pub asset: AssetTypeConfig,
}

/// A namespace whose crawl did not complete
#[derive(Debug)]
pub struct NamespaceFailure {
    pub asset_type: String,
    pub error: MirrorError,
}

/// Result of crawling all configured namespaces
#[derive(Debug)]
pub struct CrawlOutcome {
    pub nodes: Vec<FolderNode>,
    pub failures: Vec<NamespaceFailure>,
}

/// Walks the folder forest of every configured namespace
pub struct Crawler {
    fetcher: Arc<PageFetcher>,
    urls: Arc<ProxyUrls>,
    page_size: u32,
}

impl Crawler {
    pub fn new(fetcher: PageFetcher, urls: ProxyUrls, page_size: u32) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            urls: Arc::new(urls),
            page_size,
        }
    }

    /// Crawls every namespace to quiescence.
    ///
    /// Namespaces run concurrently and fail independently: a transport
    /// failure aborts the outstanding work of its own namespace only, and is
    /// recorded while the siblings run to completion.
    pub async fn crawl(&self, namespaces: &[AssetTypeConfig]) -> CrawlOutcome {
        let mut tasks = JoinSet::new();

        for asset in namespaces {
            let fetcher = Arc::clone(&self.fetcher);
            let urls = Arc::clone(&self.urls);
            let asset = asset.clone();
            let page_size = self.page_size;
            tasks.spawn(async move {
                let result = crawl_namespace(&fetcher, &urls, &asset, page_size).await;
                (asset.asset_type, result)
            });
        }

        let mut nodes = Vec::new();
        let mut failures = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(mut namespace_nodes))) => nodes.append(&mut namespace_nodes),
                Ok((asset_type, Err(error))) => {
                    tracing::error!("Namespace {} failed: {}", asset_type, error);
                    failures.push(NamespaceFailure { asset_type, error });
                }
                Err(join_error) => failures.push(NamespaceFailure {
                    asset_type: "<unknown>".to_string(),
                    error: MirrorError::Task(join_error.to_string()),
                }),
            }
        }

        CrawlOutcome { nodes, failures }
    }
}

/// Crawls one namespace from its top-level listing down to quiescence
async fn crawl_namespace(
    fetcher: &Arc<PageFetcher>,
    urls: &Arc<ProxyUrls>,
    asset: &AssetTypeConfig,
    page_size: u32,
) -> Result<Vec<FolderNode>, MirrorError> {
    let listing = urls.folders_target(&asset.api_name);
    let first = fetcher.fetch_page(&urls.page_url(&listing, 1)).await?;

    let Some(first) = first else {
        tracing::info!("Namespace {} has no top-level listing", asset.asset_type);
        return Ok(Vec::new());
    };

    let elements = aggregate(fetcher, urls, &listing, first, page_size).await?;

    let Some(root) = find_root(&elements) else {
        tracing::info!("Namespace {} has no root folder", asset.asset_type);
        return Ok(Vec::new());
    };

    tracing::info!(
        "Crawling namespace {} from root {} ({})",
        asset.asset_type,
        root.id,
        root.name
    );

    let mut tasks: JoinSet<Result<FolderNode, MirrorError>> = JoinSet::new();
    spawn_work_item(&mut tasks, fetcher, urls, asset, root.clone(), page_size);

    let mut nodes = Vec::new();

    // Wait-group loop: children are spawned before the finished node is
    // recorded, so the set can only drain once the whole subtree is fetched.
    while let Some(joined) = tasks.join_next().await {
        let node = match joined {
            Ok(Ok(node)) => node,
            Ok(Err(error)) => {
                // Stop issuing requests for this namespace promptly instead
                // of draining its queue.
                tasks.abort_all();
                return Err(error);
            }
            Err(join_error) => {
                tasks.abort_all();
                return Err(MirrorError::Task(join_error.to_string()));
            }
        };

        for child in node.children.iter().filter(|el| el.is_folder()) {
            spawn_work_item(&mut tasks, fetcher, urls, asset, child.clone(), page_size);
        }

        nodes.push(node);
    }

    tracing::info!(
        "Namespace {} quiescent: {} folders crawled",
        asset.asset_type,
        nodes.len()
    );

    Ok(nodes)
}

fn spawn_work_item(
    tasks: &mut JoinSet<Result<FolderNode, MirrorError>>,
    fetcher: &Arc<PageFetcher>,
    urls: &Arc<ProxyUrls>,
    asset: &AssetTypeConfig,
    folder: Element,
    page_size: u32,
) {
    let fetcher = Arc::clone(fetcher);
    let urls = Arc::clone(urls);
    let asset = asset.clone();
    tasks.spawn(async move { fetch_children(&fetcher, &urls, &asset, folder, page_size).await });
}

/// Fetches and aggregates one folder's child listing
async fn fetch_children(
    fetcher: &Arc<PageFetcher>,
    urls: &Arc<ProxyUrls>,
    asset: &AssetTypeConfig,
    folder: Element,
    page_size: u32,
) -> Result<FolderNode, MirrorError> {
    let target = urls.contents_target(&asset.api_name, &folder.id);
    let first = fetcher.fetch_page(&urls.page_url(&target, 1)).await?;

    let children = match first {
        Some(first) => aggregate(fetcher, urls, &target, first, page_size).await?,
        None => Vec::new(),
    };

    tracing::debug!(
        "Folder {} ({}) has {} children",
        folder.id,
        folder.name,
        children.len()
    );

    Ok(FolderNode {
        root: folder,
        children,
        asset: asset.clone(),
    })
}
