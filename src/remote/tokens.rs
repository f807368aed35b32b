//! Token refresh collaborator
//!
//! When a listing call comes back with stale credentials, the token service
//! is asked to refresh them server-side; the proxy picks up the refreshed
//! pair on the next forwarded call, so the original listing URL can simply be
//! retried unchanged.

use crate::request::Authorization;
use crate::MirrorError;
use reqwest::Client;
use url::form_urlencoded;

/// Client for the token refresh service
#[derive(Debug, Clone)]
pub struct TokenRefresher {
    endpoint: String,
    access_token: String,
    refresh_token: String,
    site_id: String,
}

impl TokenRefresher {
    pub fn new(endpoint: &str, auth: &Authorization, site_id: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            access_token: auth.access_token.clone(),
            refresh_token: auth.refresh_token.clone(),
            site_id: site_id.to_string(),
        }
    }

    /// Asks the token service to refresh the stored credential pair
    pub async fn refresh(&self, client: &Client) -> Result<(), MirrorError> {
        let url = self.refresh_url();
        tracing::info!("Refreshing stale credentials via {}", self.endpoint);

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| MirrorError::TokenRefresh {
                url: self.endpoint.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::TokenRefresh {
                url: self.endpoint.clone(),
                message: format!("token service answered HTTP {}", status.as_u16()),
            });
        }

        Ok(())
    }

    fn refresh_url(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("AccessToken", &self.access_token)
            .append_pair("RefreshToken", &self.refresh_token)
            .append_pair("siteId", &self.site_id)
            .finish();

        format!("{}?{}", self.endpoint, query)
    }
}
