//! Physical path layout
//!
//! Pure computation of on-disk locations from entity state. The layout is
//! `<root>/<owner_id>/<visibility>/<sanitized_folder>/<original_file_name>`:
//! shared folders keep one physical location under the owner's namespace no
//! matter who uploads.

use std::path::{Path, PathBuf};

use crate::folders::types::Visibility;

/// Logical folder path persisted on the entity, e.g. `/private/reports`.
pub fn visibility_path(visibility: Visibility, sanitized_name: &str) -> String {
    format!("/{}/{}", visibility.as_str(), sanitized_name)
}

/// On-disk directory of a folder: `<root>/<owner_id>` joined with the
/// folder's logical path.
pub fn folder_disk_path(root: &Path, owner_id: u64, folder_path: &str) -> PathBuf {
    root.join(owner_id.to_string())
        .join(folder_path.trim_start_matches('/'))
}

/// On-disk location of a file inside its folder.
pub fn file_disk_path(root: &Path, owner_id: u64, folder_path: &str, file_path: &str) -> PathBuf {
    folder_disk_path(root, owner_id, folder_path).join(file_path)
}
