//! Absolute path reconstruction
//!
//! A pure pass over the fully materialized record set: discovery order is a
//! function of concurrent fetch completion order, not depth order, so paths
//! can only be computed once the crawl is quiescent and every ancestor is
//! present. A root's path is its own name; every other folder's path is its
//! parent's path plus its own name. Lookups are scoped per asset-type
//! namespace since ids are only unique within one.

use crate::output::records::FolderRecord;
use crate::MirrorError;
use std::collections::{HashMap, HashSet};

/// Resolves the absolute path of one folder by walking its parent chain
pub fn resolve_path(
    records: &[FolderRecord],
    asset_type: &str,
    folder_id: &str,
) -> Result<String, MirrorError> {
    let by_id: HashMap<&str, &FolderRecord> = records
        .iter()
        .filter(|r| r.asset_type == asset_type)
        .map(|r| (r.folder_id.as_str(), r))
        .collect();

    walk(&by_id, asset_type, folder_id)
}

/// Fills `absolute_path` on every record in place
pub fn resolve_paths(records: &mut [FolderRecord]) -> Result<(), MirrorError> {
    let paths = {
        let mut by_namespace: HashMap<&str, HashMap<&str, &FolderRecord>> = HashMap::new();
        for record in records.iter() {
            by_namespace
                .entry(record.asset_type.as_str())
                .or_default()
                .insert(record.folder_id.as_str(), record);
        }

        let mut paths = Vec::with_capacity(records.len());
        for record in records.iter() {
            let by_id = &by_namespace[record.asset_type.as_str()];
            paths.push(walk(by_id, &record.asset_type, &record.folder_id)?);
        }
        paths
    };

    for (record, path) in records.iter_mut().zip(paths) {
        record.absolute_path = path;
    }

    Ok(())
}

fn walk(
    by_id: &HashMap<&str, &FolderRecord>,
    asset_type: &str,
    folder_id: &str,
) -> Result<String, MirrorError> {
    let mut current = *by_id.get(folder_id).ok_or_else(|| MirrorError::UnknownFolder {
        asset_type: asset_type.to_string(),
        folder_id: folder_id.to_string(),
    })?;

    let mut segments = Vec::new();
    let mut seen = HashSet::new();

    loop {
        if !seen.insert(current.folder_id.as_str()) {
            return Err(MirrorError::ParentCycle {
                asset_type: asset_type.to_string(),
                folder_id: current.folder_id.clone(),
            });
        }

        segments.push(current.folder_name.as_str());

        match &current.parent_folder_id {
            None => break,
            Some(parent_id) => {
                current = *by_id.get(parent_id.as_str()).ok_or_else(|| {
                    MirrorError::OrphanFolder {
                        asset_type: asset_type.to_string(),
                        folder_id: current.folder_id.clone(),
                        parent_id: parent_id.clone(),
                    }
                })?;
            }
        }
    }

    segments.reverse();
    Ok(segments.join("/"))
}
