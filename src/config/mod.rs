//! Configuration module for treemirror
//!
//! Handles loading, parsing, and validating the TOML service configuration:
//! crawler tuning (concurrency, retries, page size) and the URLs of the
//! external collaborators (proxy, token service, persistence endpoint).

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, EndpointConfig};
