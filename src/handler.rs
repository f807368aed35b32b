//! End-to-end mirror pipeline
//!
//! Runs crawl, path reconstruction, and submission for one request, and maps
//! every outcome into the caller-facing response shape: `200` with a success
//! payload, or `422` with enough context (URL, status) to diagnose which
//! remote call failed. No error escapes this module unhandled.

use crate::config::Config;
use crate::crawler::{build_http_client, Crawler, PageFetcher};
use crate::output::{build_records, resolve_paths, submit_records};
use crate::remote::{ProxyUrls, TokenRefresher};
use crate::request::MirrorRequest;
use crate::MirrorError;
use serde_json::{json, Value};

/// Caller-facing response
#[derive(Debug)]
pub struct MirrorResponse {
    pub status_code: u16,
    pub body: Value,
}

impl MirrorResponse {
    fn success(folder_count: usize) -> Self {
        Self {
            status_code: 200,
            body: json!({ "status": "Success", "folderCount": folder_count }),
        }
    }

    fn unprocessable(body: Value) -> Self {
        Self {
            status_code: 422,
            body,
        }
    }
}

/// Runs the full mirror pipeline for one request
pub async fn run_mirror(config: &Config, request: &MirrorRequest) -> MirrorResponse {
    match mirror(config, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!("Mirror run failed: {}", error);
            MirrorResponse::unprocessable(error_payload(&error))
        }
    }
}

async fn mirror(config: &Config, request: &MirrorRequest) -> Result<MirrorResponse, MirrorError> {
    let client = build_http_client()?;

    let urls = ProxyUrls::new(
        &config.endpoints.proxy_url,
        &request.authorization,
        &request.url_object,
    );
    let refresher = TokenRefresher::new(
        &config.endpoints.token_service_url,
        &request.authorization,
        &request.site_id,
    );
    let fetcher = PageFetcher::new(client.clone(), &config.crawler, refresher);
    let crawler = Crawler::new(fetcher, urls, config.crawler.page_size);

    let outcome = crawler.crawl(&request.asset_type_configs).await;

    let mut records = build_records(&outcome.nodes);
    resolve_paths(&mut records)?;

    // Records from namespaces that did complete are still worth persisting
    // when a sibling namespace failed; the overall response stays 422 so the
    // caller never mistakes a partial run for a full one.
    if !records.is_empty() {
        submit_records(
            &client,
            &config.endpoints.persistence_url,
            &request.site_id,
            &records,
        )
        .await?;
    }

    if !outcome.failures.is_empty() {
        let failures: Vec<Value> = outcome
            .failures
            .iter()
            .map(|f| {
                let mut payload = error_payload(&f.error);
                payload["assetType"] = json!(f.asset_type);
                payload
            })
            .collect();

        return Ok(MirrorResponse::unprocessable(json!({
            "status": "Error",
            "message": "one or more namespaces failed to crawl",
            "submittedRecords": records.len(),
            "failures": failures,
        })));
    }

    Ok(MirrorResponse::success(records.len()))
}

/// Maps an error into the diagnostic payload shape
fn error_payload(error: &MirrorError) -> Value {
    let mut payload = json!({
        "status": "Error",
        "message": error.to_string(),
    });

    match error {
        MirrorError::Transport { url, status, .. } | MirrorError::Submit { url, status, .. } => {
            payload["url"] = json!(url);
            if let Some(status) = status {
                payload["statusCode"] = json!(status);
            }
        }
        MirrorError::TokenRefresh { url, .. } => {
            payload["url"] = json!(url);
        }
        _ => {}
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_payload_carries_url_and_status() {
        let error = MirrorError::Transport {
            url: "https://gateway.example.com/dev/request?page=2".to_string(),
            status: Some(503),
            message: "unexpected HTTP 503".to_string(),
        };

        let payload = error_payload(&error);
        assert_eq!(payload["status"], "Error");
        assert_eq!(payload["statusCode"], 503);
        assert_eq!(
            payload["url"],
            "https://gateway.example.com/dev/request?page=2"
        );
    }

    #[test]
    fn test_non_transport_error_payload_has_message_only() {
        let error = MirrorError::Task("worker panicked".to_string());
        let payload = error_payload(&error);

        assert_eq!(payload["status"], "Error");
        assert!(payload.get("url").is_none());
        assert!(payload.get("statusCode").is_none());
    }
}
