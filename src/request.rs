//! Inbound request types
//!
//! The invoking caller supplies the namespaces to crawl, the credentials the
//! proxy forwards to the underlying platform, and the target instance URLs.
//! Field names follow the caller's JSON wire format.

use serde::Deserialize;

/// A complete mirror request from the invoking caller
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorRequest {
    pub asset_type_configs: Vec<AssetTypeConfig>,
    pub authorization: Authorization,
    pub url_object: UrlObject,
    pub site_id: String,
}

/// One content namespace to crawl
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTypeConfig {
    /// Display name, e.g. "Email"
    pub asset_type: String,

    /// URL path segment for this namespace's listing routes, e.g. "email"
    pub api_name: String,
}

/// Credentials the proxy forwards to the underlying platform
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub access_token: String,
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Target instance URLs for listing calls
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlObject {
    pub base_url: String,
    pub endpoint_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_request() {
        let payload = r#"{
            "assetTypeConfigs": [
                {"assetType": "Email", "apiName": "email"},
                {"assetType": "Landing Page", "apiName": "landingPage"}
            ],
            "authorization": {
                "accessToken": "at",
                "refreshToken": "rt",
                "clientId": "cid",
                "clientSecret": "cs"
            },
            "urlObject": {
                "baseUrl": "https://app.example.com",
                "endpointUrl": "/api/rest/2.0/assets"
            },
            "siteId": "42"
        }"#;

        let request: MirrorRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(request.asset_type_configs.len(), 2);
        assert_eq!(request.asset_type_configs[1].api_name, "landingPage");
        assert_eq!(request.authorization.client_id, "cid");
        assert_eq!(request.url_object.base_url, "https://app.example.com");
        assert_eq!(request.site_id, "42");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let payload = r#"{
            "assetTypeConfigs": [],
            "urlObject": {"baseUrl": "", "endpointUrl": ""},
            "siteId": "42"
        }"#;

        assert!(serde_json::from_str::<MirrorRequest>(payload).is_err());
    }
}
