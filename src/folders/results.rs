//! Result types for folder operations

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::access::types::Permission;
use crate::folders::types::Folder;

/// Per-target outcome of a share call.
#[derive(Debug, Clone, Serialize)]
pub struct ShareOutcome {
    pub user_id: u64,
    pub email: String,
    pub folder_id: u64,
    pub message: String,
}

/// Partitioned result of `share_folder`: individual target conflicts land in
/// `skipped` and never fail the call.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ShareReport {
    pub succeeded: Vec<ShareOutcome>,
    pub skipped: Vec<ShareOutcome>,
}

/// Result of a folder removal.
#[derive(Debug, Clone, Serialize)]
pub struct FolderRemoval {
    pub folder_id: u64,
    pub path: String,
    pub grants_removed: usize,
    pub files_removed: usize,
}

/// One grantee of a folder, as seen by its owner.
#[derive(Debug, Clone, Serialize)]
pub struct GranteeView {
    pub user_id: u64,
    pub email: String,
    pub permission: Permission,
    pub granted_at: DateTime<Utc>,
}

/// A folder listed together with the caller's relation to it.
#[derive(Debug, Clone, Serialize)]
pub struct SharedFolderView {
    pub folder: Folder,
    pub permission: Permission,
}
