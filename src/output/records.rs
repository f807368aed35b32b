//! Folder record construction
//!
//! Flattens the crawled forest into the external record schema. Every
//! reachable folder yields exactly one record: a node whose own root has no
//! parent contributes the namespace-root record, and each node contributes
//! one record per retained folder child. Non-folder children are dropped
//! here.

use crate::crawler::FolderNode;
use serde::Serialize;

/// Externally visible folder record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub folder_id: String,
    pub folder_name: String,
    /// `None` marks a namespace root
    pub parent_folder_id: Option<String>,
    pub asset_type: String,
    pub absolute_path: String,
}

/// Maps the crawled forest into folder records.
///
/// `absolute_path` is left empty; it is filled by
/// [`resolve_paths`](crate::output::resolve_paths) once the full record set
/// exists, because a node's ancestors may finish fetching after the node
/// itself.
pub fn build_records(nodes: &[FolderNode]) -> Vec<FolderRecord> {
    let mut records = Vec::new();

    for node in nodes {
        if node.root.parent_folder_id.is_none() {
            records.push(FolderRecord {
                folder_id: node.root.id.clone(),
                folder_name: node.root.name.clone(),
                parent_folder_id: None,
                asset_type: node.asset.asset_type.clone(),
                absolute_path: String::new(),
            });
        }

        for child in node.children.iter().filter(|el| el.is_folder()) {
            records.push(FolderRecord {
                folder_id: child.id.clone(),
                folder_name: child.name.clone(),
                parent_folder_id: Some(node.root.id.clone()),
                asset_type: node.asset.asset_type.clone(),
                absolute_path: String::new(),
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::Element;
    use crate::request::AssetTypeConfig;

    fn asset() -> AssetTypeConfig {
        AssetTypeConfig {
            asset_type: "Email".to_string(),
            api_name: "email".to_string(),
        }
    }

    fn element(id: &str, name: &str, kind: &str, parent: Option<&str>) -> Element {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "type": kind,
            "name": name,
            "isSystem": parent.is_none().to_string(),
            "folderId": parent,
        }))
        .unwrap()
    }

    #[test]
    fn test_forest_flattens_without_duplicates() {
        let root = element("r", "Root", "Folder", None);
        let child_a = element("a", "A", "Folder", Some("r"));
        let child_b = element("b", "B", "Folder", Some("r"));

        let nodes = vec![
            FolderNode {
                root: root.clone(),
                children: vec![child_a.clone(), child_b.clone()],
                asset: asset(),
            },
            FolderNode {
                root: child_a,
                children: vec![element("a1", "A1", "Folder", Some("a"))],
                asset: asset(),
            },
            FolderNode {
                root: child_b,
                children: vec![],
                asset: asset(),
            },
        ];

        let records = build_records(&nodes);
        assert_eq!(records.len(), 4);

        let mut ids: Vec<&str> = records.iter().map(|r| r.folder_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);

        let root_records: Vec<_> = records
            .iter()
            .filter(|r| r.parent_folder_id.is_none())
            .collect();
        assert_eq!(root_records.len(), 1);
        assert_eq!(root_records[0].folder_id, "r");
    }

    #[test]
    fn test_leaf_assets_are_dropped() {
        let root = element("r", "Root", "Folder", None);
        let nodes = vec![FolderNode {
            root,
            children: vec![
                element("f", "Subfolder", "Folder", Some("r")),
                element("e", "Welcome", "Email", Some("r")),
            ],
            asset: asset(),
        }];

        let records = build_records(&nodes);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.folder_id != "e"));
    }

    #[test]
    fn test_record_serializes_with_wire_names() {
        let record = FolderRecord {
            folder_id: "1".to_string(),
            folder_name: "Root".to_string(),
            parent_folder_id: None,
            asset_type: "Email".to_string(),
            absolute_path: "Root".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["folderId"], "1");
        assert_eq!(json["parentFolderId"], serde_json::Value::Null);
        assert_eq!(json["absolutePath"], "Root");
    }
}
