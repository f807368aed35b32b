//! Proxy URL construction
//!
//! Listing calls go through a token-bearing proxy: the real target URL is
//! percent-encoded into a `url` query parameter alongside the credentials the
//! proxy forwards. Targets end in `page=` so the page number can be appended,
//! which lets the aggregator address sibling pages of one listing uniformly.

use crate::request::{Authorization, UrlObject};
use url::form_urlencoded;

/// Builds proxy URLs for one mirror request
#[derive(Debug, Clone)]
pub struct ProxyUrls {
    proxy: String,
    auth: Authorization,
    instance_base: String,
}

impl ProxyUrls {
    pub fn new(proxy_url: &str, auth: &Authorization, urls: &UrlObject) -> Self {
        Self {
            proxy: proxy_url.to_string(),
            auth: auth.clone(),
            instance_base: format!("{}{}", urls.base_url, urls.endpoint_url),
        }
    }

    /// Target for a namespace's top-level folder listing, sans page number
    pub fn folders_target(&self, api_name: &str) -> String {
        format!("{}/{}/folders?page=", self.instance_base, api_name)
    }

    /// Target for one folder's child listing, sans page number
    pub fn contents_target(&self, api_name: &str, folder_id: &str) -> String {
        format!(
            "{}/{}/folder/{}/contents?page=",
            self.instance_base, api_name, folder_id
        )
    }

    /// Full proxy URL for one page of the given target
    pub fn page_url(&self, target: &str, page: u32) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("access_token", &self.auth.access_token)
            .append_pair("refresh_token", &self.auth.refresh_token)
            .append_pair("client_id", &self.auth.client_id)
            .append_pair("client_secret", &self.auth.client_secret)
            .append_pair("url", &format!("{}{}", target, page))
            .finish();

        format!("{}?{}", self.proxy, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_urls() -> ProxyUrls {
        ProxyUrls::new(
            "https://gateway.example.com/dev/request",
            &Authorization {
                access_token: "at".to_string(),
                refresh_token: "rt".to_string(),
                client_id: "cid".to_string(),
                client_secret: "cs".to_string(),
            },
            &UrlObject {
                base_url: "https://app.example.com".to_string(),
                endpoint_url: "/api/rest/2.0/assets".to_string(),
            },
        )
    }

    #[test]
    fn test_folders_target() {
        assert_eq!(
            test_urls().folders_target("email"),
            "https://app.example.com/api/rest/2.0/assets/email/folders?page="
        );
    }

    #[test]
    fn test_contents_target() {
        assert_eq!(
            test_urls().contents_target("email", "101"),
            "https://app.example.com/api/rest/2.0/assets/email/folder/101/contents?page="
        );
    }

    #[test]
    fn test_page_url_encodes_target() {
        let urls = test_urls();
        let page_url = urls.page_url(&urls.folders_target("email"), 2);

        assert!(page_url.starts_with("https://gateway.example.com/dev/request?"));
        assert!(page_url.contains("access_token=at"));
        assert!(page_url.contains("client_secret=cs"));
        // The embedded target must be percent-encoded, page number included
        assert!(page_url.contains(
            "url=https%3A%2F%2Fapp.example.com%2Fapi%2Frest%2F2.0%2Fassets%2Femail%2Ffolders%3Fpage%3D2"
        ));
    }
}
