//! Wire envelope for the remote listing API
//!
//! Listing responses arrive as `{"Response": {elements, total, page,
//! pageSize}}`. An absent `Response`, or a present one with no elements, is a
//! valid empty page rather than an error.

use serde::{Deserialize, Deserializer};

/// A remote node: a folder or a leaf asset
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub id: String,

    /// Node type: "Folder" or one of the leaf asset kinds
    #[serde(rename = "type")]
    pub kind: String,

    pub name: String,

    /// Parent folder id; absent for a namespace root
    #[serde(rename = "folderId", default)]
    pub parent_folder_id: Option<String>,

    /// Marks the synthetic namespace root. The wire sends this as the
    /// string "true"/"false"; some endpoints send a real boolean.
    #[serde(rename = "isSystem", default, deserialize_with = "bool_from_flag")]
    pub is_system: bool,
}

impl Element {
    pub fn is_folder(&self) -> bool {
        self.kind == "Folder"
    }
}

/// One page of a listing
#[derive(Debug, Clone, Deserialize)]
pub struct PageResult {
    #[serde(default)]
    pub elements: Vec<Element>,

    #[serde(default)]
    pub total: u32,

    #[serde(default)]
    pub page: u32,

    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
}

/// Top-level response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(rename = "Response")]
    pub response: Option<PageResult>,
}

impl Envelope {
    /// Unwraps the envelope into a page, treating a missing `Response` or an
    /// empty element list as "no data at this address".
    pub fn into_page(self) -> Option<PageResult> {
        match self.response {
            Some(page) if !page.elements.is_empty() => Some(page),
            _ => None,
        }
    }
}

fn bool_from_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Text(value)) => Ok(value.eq_ignore_ascii_case("true")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_with_string_flags() {
        let element: Element = serde_json::from_str(
            r#"{"type": "Folder", "id": "101", "name": "Campaigns",
                "isSystem": "true"}"#,
        )
        .unwrap();

        assert!(element.is_system);
        assert!(element.is_folder());
        assert_eq!(element.parent_folder_id, None);
    }

    #[test]
    fn test_element_with_boolean_flag_and_parent() {
        let element: Element = serde_json::from_str(
            r#"{"type": "Email", "id": "7", "name": "Welcome",
                "isSystem": false, "folderId": "101"}"#,
        )
        .unwrap();

        assert!(!element.is_system);
        assert!(!element.is_folder());
        assert_eq!(element.parent_folder_id.as_deref(), Some("101"));
    }

    #[test]
    fn test_element_without_system_flag() {
        let element: Element =
            serde_json::from_str(r#"{"type": "Folder", "id": "8", "name": "Drafts"}"#).unwrap();
        assert!(!element.is_system);
    }

    #[test]
    fn test_envelope_with_page() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"Response": {"elements": [{"type": "Folder", "id": "1", "name": "Root"}],
                "total": 1, "page": 1, "pageSize": 1000}}"#,
        )
        .unwrap();

        let page = envelope.into_page().unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.page_size, 1000);
        assert_eq!(page.elements.len(), 1);
    }

    #[test]
    fn test_missing_response_is_empty() {
        let envelope: Envelope = serde_json::from_str(r#"{"status": "whatever"}"#).unwrap();
        assert!(envelope.into_page().is_none());
    }

    #[test]
    fn test_empty_elements_is_empty() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"Response": {"elements": [], "total": 0, "page": 1, "pageSize": 1000}}"#,
        )
        .unwrap();
        assert!(envelope.into_page().is_none());
    }
}
