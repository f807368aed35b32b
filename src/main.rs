//! Treemirror main entry point
//!
//! Command-line interface: loads the service configuration and a mirror
//! request, runs the crawl pipeline, and prints the caller-facing response.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use treemirror::config::load_config;
use treemirror::request::MirrorRequest;
use treemirror::run_mirror;
use tracing_subscriber::EnvFilter;

/// Treemirror: a folder-tree replicator for paginated asset stores
///
/// Crawls the folder hierarchy of each configured asset-type namespace,
/// reconstructs absolute paths, and submits the flat record list to the
/// persistence endpoint.
#[derive(Parser, Debug)]
#[command(name = "treemirror")]
#[command(version)]
#[command(about = "Mirror remote asset-store folder trees", long_about = None)]
struct Cli {
    /// Path to the TOML service configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Path to the JSON mirror request file
    #[arg(value_name = "REQUEST")]
    request: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate inputs and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    let request_raw = std::fs::read_to_string(&cli.request)
        .with_context(|| format!("failed to read request {}", cli.request.display()))?;
    let request: MirrorRequest =
        serde_json::from_str(&request_raw).context("failed to parse mirror request")?;

    if cli.dry_run {
        handle_dry_run(&config, &request);
        return Ok(());
    }

    tracing::info!(
        "Mirroring {} namespaces for site {}",
        request.asset_type_configs.len(),
        request.site_id
    );

    let response = run_mirror(&config, &request).await;

    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if response.status_code != 200 {
        std::process::exit(1);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("treemirror=info,warn"),
            1 => EnvFilter::new("treemirror=debug,info"),
            2 => EnvFilter::new("treemirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows what would be crawled
fn handle_dry_run(config: &treemirror::Config, request: &MirrorRequest) {
    println!("=== Treemirror Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!("  Page size: {}", config.crawler.page_size);
    println!("  Retry limit: {}", config.crawler.retry_limit);
    println!("  Retry backoff: {}ms", config.crawler.retry_backoff_ms);

    println!("\nEndpoints:");
    println!("  Proxy: {}", config.endpoints.proxy_url);
    println!("  Token service: {}", config.endpoints.token_service_url);
    println!("  Persistence: {}", config.endpoints.persistence_url);

    println!("\nSite: {}", request.site_id);
    println!(
        "Instance: {}{}",
        request.url_object.base_url, request.url_object.endpoint_url
    );

    println!("\nNamespaces ({}):", request.asset_type_configs.len());
    for asset in &request.asset_type_configs {
        println!("  - {} (api: {})", asset.asset_type, asset.api_name);
    }

    println!("\n✓ Configuration and request are valid");
}
