use crate::config::types::{Config, CrawlerConfig, EndpointConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_endpoint_config(&config.endpoints)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.page_size < 1 {
        return Err(ConfigError::Validation(
            "page_size must be >= 1".to_string(),
        ));
    }

    if config.retry_limit > 10 {
        return Err(ConfigError::Validation(format!(
            "retry_limit must be <= 10, got {}",
            config.retry_limit
        )));
    }

    if config.retry_backoff_ms < 1 {
        return Err(ConfigError::Validation(
            "retry_backoff_ms must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates endpoint configuration
fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    validate_endpoint_url("proxy-url", &config.proxy_url)?;
    validate_endpoint_url("token-service-url", &config.token_service_url)?;
    validate_endpoint_url("persistence-url", &config.persistence_url)?;
    Ok(())
}

fn validate_endpoint_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", name, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} must use an http or https scheme, got '{}'",
            name,
            url.scheme()
        )));
    }

    Ok(())
}
