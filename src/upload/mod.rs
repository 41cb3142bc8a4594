//! Pushing generated rule groups into Grafana
//!
//! Folders are created first, one at a time, then rule groups are uploaded
//! with bounded concurrency. The first failing request aborts the upload.

mod client;
mod config;

pub use client::{Folder, GrafanaClient};
pub use config::GrafanaConfig;

use crate::error::Result;
use crate::generator::synthetic::FOLDER_UID_PREFIX;
use crate::models::AlertRuleGroup;
use futures::{StreamExt as _, TryStreamExt as _, stream};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Options controlling an upload run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    /// Delete previously generated folders before uploading
    pub nuke: bool,
    /// Maximum number of rule group requests in flight
    pub concurrency: usize,
    /// Existing folders to spread groups over instead of generated ones
    pub folder_uids: Vec<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            nuke: false,
            concurrency: 10,
            folder_uids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub folders_deleted: usize,
    pub folders_created: usize,
    pub groups_uploaded: usize,
}

/// Delete every folder whose UID starts with `prefix`, returning how many
/// were removed.
pub async fn nuke(client: &GrafanaClient, prefix: &str) -> Result<usize> {
    let folders = client.list_folders().await?;
    let mut deleted = 0;

    for folder in folders.iter().filter(|f| f.uid.starts_with(prefix)) {
        client.delete_folder(&folder.uid).await?;
        tracing::info!(folder = %folder.uid, "Deleted generated folder");
        deleted += 1;
    }

    Ok(deleted)
}

/// Upload `groups` to Grafana, creating their folders on the way.
pub async fn upload_groups(
    client: &GrafanaClient,
    groups: &[AlertRuleGroup],
    options: &UploadOptions,
) -> Result<UploadSummary> {
    let mut summary = UploadSummary::default();

    if options.nuke {
        summary.folders_deleted = nuke(client, FOLDER_UID_PREFIX).await?;
    }

    let groups = assign_folders(groups, &options.folder_uids);

    let folder_uids: IndexSet<&str> = groups.iter().map(|g| g.folder_uid.as_str()).collect();
    for uid in folder_uids {
        if client.ensure_folder(uid, uid).await? {
            summary.folders_created += 1;
        }
    }

    let uploaded: Vec<()> = stream::iter(groups.iter().map(|group| client.put_rule_group(group)))
        .buffer_unordered(options.concurrency.max(1))
        .try_collect()
        .await?;
    summary.groups_uploaded = uploaded.len();

    tracing::info!(
        folders_created = summary.folders_created,
        groups_uploaded = summary.groups_uploaded,
        "Upload complete"
    );

    Ok(summary)
}

/// Move groups onto the caller's folders, keeping generated folders
/// together: generated folder `n` maps to `folder_uids[n % len]`.
fn assign_folders(groups: &[AlertRuleGroup], folder_uids: &[String]) -> Vec<AlertRuleGroup> {
    if folder_uids.is_empty() {
        return groups.to_vec();
    }

    let mut generated: IndexSet<&str> = IndexSet::new();
    groups
        .iter()
        .map(|group| {
            let (index, _) = generated.insert_full(group.folder_uid.as_str());
            let target = &folder_uids[index % folder_uids.len()];

            let mut group = group.clone();
            group.folder_uid = target.clone();
            for rule in &mut group.rules {
                rule.folder_uid = target.clone();
            }
            group
        })
        .collect()
}
