//! Record submission
//!
//! Sends the complete record list to the persistence endpoint in one batch.
//! A submission failure is surfaced to the caller but leaves the in-memory
//! records intact so the submission can be retried independently.

use crate::output::records::FolderRecord;
use crate::MirrorError;
use reqwest::Client;
use serde::Serialize;
use url::form_urlencoded;

#[derive(Serialize)]
struct SubmitBody<'a> {
    #[serde(rename = "folderDetailsArr")]
    folder_details_arr: &'a [FolderRecord],
}

/// Submits the full record batch to the persistence endpoint
pub async fn submit_records(
    client: &Client,
    persistence_url: &str,
    site_id: &str,
    records: &[FolderRecord],
) -> Result<(), MirrorError> {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("siteId", site_id)
        .finish();
    let url = format!("{}?{}", persistence_url, query);

    tracing::info!("Submitting {} folder records to {}", records.len(), url);

    let response = client
        .post(&url)
        .json(&SubmitBody {
            folder_details_arr: records,
        })
        .send()
        .await
        .map_err(|e| MirrorError::Submit {
            url: url.clone(),
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MirrorError::Submit {
            url,
            status: Some(status.as_u16()),
            message: format!("persistence endpoint answered HTTP {}", status.as_u16()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_body_wire_shape() {
        let records = vec![FolderRecord {
            folder_id: "1".to_string(),
            folder_name: "Root".to_string(),
            parent_folder_id: None,
            asset_type: "Email".to_string(),
            absolute_path: "Root".to_string(),
        }];

        let body = serde_json::to_value(SubmitBody {
            folder_details_arr: &records,
        })
        .unwrap();

        assert!(body["folderDetailsArr"].is_array());
        assert_eq!(body["folderDetailsArr"][0]["folderId"], "1");
    }
}
