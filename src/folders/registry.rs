//! Folder registry
//!
//! In-memory folder store. Lookups used by the manager: by id, by logical
//! path (the uniqueness scope is global per visibility), and by owner.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use chrono::Utc;

use crate::folders::types::{Folder, Visibility};

/// Thread-safe in-memory folder store.
pub struct FolderRegistry {
    folders: RwLock<HashMap<u64, Folder>>,
    next_id: AtomicU64,
}

impl Default for FolderRegistry {
    fn default() -> Self {
        Self {
            folders: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl FolderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new folder row.
    pub async fn create(
        &self,
        name: &str,
        path: &str,
        visibility: Visibility,
        owner_id: u64,
    ) -> Folder {
        let now = Utc::now();
        let folder = Folder {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            path: path.to_string(),
            visibility,
            is_shared: false,
            owner_id,
            created_at: now,
            updated_at: now,
        };

        let mut folders = self.folders.write().await;
        folders.insert(folder.id, folder.clone());
        folder
    }

    pub async fn find_by_id(&self, id: u64) -> Option<Folder> {
        let folders = self.folders.read().await;
        folders.get(&id).cloned()
    }

    /// Find a folder by its logical path. Paths are unique across all owners
    /// within a visibility scope, so the path alone identifies the folder.
    pub async fn find_by_path(&self, path: &str) -> Option<Folder> {
        let folders = self.folders.read().await;
        folders.values().find(|f| f.path == path).cloned()
    }

    pub async fn find_by_owner(&self, owner_id: u64) -> Vec<Folder> {
        let folders = self.folders.read().await;
        let mut owned: Vec<Folder> = folders
            .values()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|f| f.id);
        owned
    }

    pub async fn find_public_by_owner(&self, owner_id: u64) -> Vec<Folder> {
        let folders = self.folders.read().await;
        let mut found: Vec<Folder> = folders
            .values()
            .filter(|f| f.owner_id == owner_id && f.visibility.is_public())
            .cloned()
            .collect();
        found.sort_by_key(|f| f.id);
        found
    }

    /// Persist folder mutations, refreshing `updated_at`.
    pub async fn save(&self, mut folder: Folder) -> Folder {
        folder.updated_at = Utc::now();
        let mut folders = self.folders.write().await;
        folders.insert(folder.id, folder.clone());
        folder
    }

    /// Remove a folder row.
    pub async fn remove(&self, id: u64) -> Option<Folder> {
        let mut folders = self.folders.write().await;
        folders.remove(&id)
    }
}
