//! Treemirror: a folder-tree replicator for paginated asset stores
//!
//! This crate crawls the folder hierarchy of a remote marketing-content
//! repository (exposed through a rate-limited REST proxy), reconstructs each
//! folder's absolute path, and submits the resulting flat record list to a
//! persistence endpoint.

pub mod config;
pub mod crawler;
pub mod handler;
pub mod output;
pub mod remote;
pub mod request;

use thiserror::Error;

/// Main error type for treemirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP-layer failure after the retry budget is exhausted. Carries the
    /// failing proxy URL and the status when one was received.
    #[error("Transport error for {url}: {message}")]
    Transport {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Token refresh failed for {url}: {message}")]
    TokenRefresh { url: String, message: String },

    #[error("Record submission failed for {url}: {message}")]
    Submit {
        url: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Folder {folder_id} ({asset_type}) references unknown parent {parent_id}")]
    OrphanFolder {
        asset_type: String,
        folder_id: String,
        parent_id: String,
    },

    #[error("Parent cycle detected at folder {folder_id} ({asset_type})")]
    ParentCycle {
        asset_type: String,
        folder_id: String,
    },

    #[error("Unknown folder {folder_id} ({asset_type})")]
    UnknownFolder {
        asset_type: String,
        folder_id: String,
    },

    #[error("Crawl task failed: {0}")]
    Task(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid request payload: {0}")]
    Request(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for treemirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, Crawler, FolderNode, NamespaceFailure};
pub use handler::{run_mirror, MirrorResponse};
pub use output::FolderRecord;
pub use remote::{Element, PageResult};
pub use request::{AssetTypeConfig, Authorization, MirrorRequest, UrlObject};
