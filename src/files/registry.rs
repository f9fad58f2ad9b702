//! File registry
//!
//! In-memory file store. The stored `path` (original file name) is unique
//! within a folder; the duplicate check before an upload relies on that.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use chrono::Utc;

use crate::files::types::{File, FileType};

/// Thread-safe in-memory file store.
pub struct FileRegistry {
    files: RwLock<HashMap<u64, File>>,
    next_id: AtomicU64,
}

impl Default for FileRegistry {
    fn default() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new file row.
    pub async fn create(
        &self,
        name: &str,
        path: &str,
        file_type: FileType,
        size: u64,
        folder_id: u64,
        creator_id: u64,
    ) -> File {
        let now = Utc::now();
        let file = File {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            path: path.to_string(),
            file_type,
            size,
            folder_id,
            creator_id,
            created_at: now,
            updated_at: now,
        };

        let mut files = self.files.write().await;
        files.insert(file.id, file.clone());
        file
    }

    pub async fn find_by_id(&self, id: u64) -> Option<File> {
        let files = self.files.read().await;
        files.get(&id).cloned()
    }

    /// Find a file by its stored path within a folder.
    pub async fn find_by_path_in_folder(&self, folder_id: u64, path: &str) -> Option<File> {
        let files = self.files.read().await;
        files
            .values()
            .find(|f| f.folder_id == folder_id && f.path == path)
            .cloned()
    }

    /// All files in a folder.
    pub async fn find_by_folder(&self, folder_id: u64) -> Vec<File> {
        let files = self.files.read().await;
        let mut found: Vec<File> = files
            .values()
            .filter(|f| f.folder_id == folder_id)
            .cloned()
            .collect();
        found.sort_by_key(|f| f.id);
        found
    }

    /// All files created by a user.
    pub async fn find_by_creator(&self, creator_id: u64) -> Vec<File> {
        let files = self.files.read().await;
        let mut found: Vec<File> = files
            .values()
            .filter(|f| f.creator_id == creator_id)
            .cloned()
            .collect();
        found.sort_by_key(|f| f.id);
        found
    }

    /// Persist file mutations, refreshing `updated_at`.
    pub async fn save(&self, mut file: File) -> File {
        file.updated_at = Utc::now();
        let mut files = self.files.write().await;
        files.insert(file.id, file.clone());
        file
    }

    /// Remove one file row.
    pub async fn remove(&self, id: u64) -> Option<File> {
        let mut files = self.files.write().await;
        files.remove(&id)
    }

    /// Remove every file row in a folder, returning how many were dropped.
    pub async fn remove_all_for_folder(&self, folder_id: u64) -> usize {
        let mut files = self.files.write().await;
        let before = files.len();
        files.retain(|_, f| f.folder_id != folder_id);
        before - files.len()
    }
}
