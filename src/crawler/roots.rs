//! Root resolution
//!
//! Each namespace's top-level listing contains one synthetic, system-owned
//! folder with no parent; that element anchors the namespace's tree. A
//! listing without one yields no records, which is not an error — some
//! namespaces are legitimately empty on the remote side.

use crate::remote::Element;

/// Finds the synthetic root folder in a top-level listing
pub fn find_root(elements: &[Element]) -> Option<&Element> {
    elements
        .iter()
        .find(|el| el.is_system && el.is_folder() && el.parent_folder_id.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: &str, kind: &str, is_system: bool, parent: Option<&str>) -> Element {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "type": kind,
            "name": format!("node-{}", id),
            "isSystem": is_system.to_string(),
            "folderId": parent,
        }))
        .unwrap()
    }

    #[test]
    fn test_finds_system_root() {
        let elements = vec![
            element("1", "Email", false, Some("9")),
            element("9", "Folder", true, None),
            element("2", "Folder", false, Some("9")),
        ];

        let root = find_root(&elements).unwrap();
        assert_eq!(root.id, "9");
    }

    #[test]
    fn test_system_leaf_is_not_a_root() {
        let elements = vec![element("1", "Email", true, None)];
        assert!(find_root(&elements).is_none());
    }

    #[test]
    fn test_parented_system_folder_is_not_a_root() {
        let elements = vec![element("1", "Folder", true, Some("9"))];
        assert!(find_root(&elements).is_none());
    }

    #[test]
    fn test_empty_listing_has_no_root() {
        assert!(find_root(&[]).is_none());
    }
}
