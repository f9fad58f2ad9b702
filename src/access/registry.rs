//! Grant registry
//!
//! In-memory store of sharing grants, one row per user/folder pair.
//! The `is_shared` flag on folders is always re-derived from the live count
//! held here, never trusted from a cached value.

use log::info;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use chrono::Utc;

use crate::access::types::{Grant, Permission};

/// Thread-safe in-memory grant store.
pub struct GrantRegistry {
    grants: RwLock<HashMap<u64, Grant>>,
    next_id: AtomicU64,
}

impl Default for GrantRegistry {
    fn default() -> Self {
        Self {
            grants: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl GrantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a grant for a user/folder pair.
    pub async fn create(&self, user_id: u64, folder_id: u64, permission: Permission) -> Grant {
        let now = Utc::now();
        let grant = Grant {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            user_id,
            folder_id,
            permission,
            created_at: now,
            updated_at: now,
        };

        let mut grants = self.grants.write().await;
        grants.insert(grant.id, grant.clone());
        info!(
            "Grant {} created: user {} -> folder {} ({})",
            grant.id,
            user_id,
            folder_id,
            permission.as_str()
        );
        grant
    }

    /// Find the grant for a user on a folder, if any.
    pub async fn find_by_user_and_folder(&self, user_id: u64, folder_id: u64) -> Option<Grant> {
        let grants = self.grants.read().await;
        grants
            .values()
            .find(|g| g.user_id == user_id && g.folder_id == folder_id)
            .cloned()
    }

    /// All grants on a folder.
    pub async fn find_by_folder(&self, folder_id: u64) -> Vec<Grant> {
        let grants = self.grants.read().await;
        grants
            .values()
            .filter(|g| g.folder_id == folder_id)
            .cloned()
            .collect()
    }

    /// All grants held by a user.
    pub async fn find_by_user(&self, user_id: u64) -> Vec<Grant> {
        let grants = self.grants.read().await;
        grants
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Live number of grants on a folder.
    pub async fn count_for_folder(&self, folder_id: u64) -> usize {
        let grants = self.grants.read().await;
        grants.values().filter(|g| g.folder_id == folder_id).count()
    }

    /// Update the permission level of an existing grant.
    pub async fn save_permission(&self, grant_id: u64, permission: Permission) -> Option<Grant> {
        let mut grants = self.grants.write().await;
        let grant = grants.get_mut(&grant_id)?;
        grant.permission = permission;
        grant.updated_at = Utc::now();
        Some(grant.clone())
    }

    /// Remove one grant by id.
    pub async fn remove(&self, grant_id: u64) -> Option<Grant> {
        let mut grants = self.grants.write().await;
        grants.remove(&grant_id)
    }

    /// Remove every grant on a folder, returning how many were dropped.
    pub async fn remove_all_for_folder(&self, folder_id: u64) -> usize {
        let mut grants = self.grants.write().await;
        let before = grants.len();
        grants.retain(|_, g| g.folder_id != folder_id);
        before - grants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_row_per_user_folder_pair() {
        let registry = GrantRegistry::new();
        registry.create(2, 10, Permission::Read).await;

        let found = registry.find_by_user_and_folder(2, 10).await.unwrap();
        assert_eq!(found.permission, Permission::Read);
        assert!(registry.find_by_user_and_folder(2, 11).await.is_none());
        assert_eq!(registry.count_for_folder(10).await, 1);
    }

    #[tokio::test]
    async fn permission_update_keeps_row() {
        let registry = GrantRegistry::new();
        let grant = registry.create(2, 10, Permission::Read).await;

        let updated = registry
            .save_permission(grant.id, Permission::Edit)
            .await
            .unwrap();
        assert_eq!(updated.permission, Permission::Edit);
        assert_eq!(registry.count_for_folder(10).await, 1);
    }

    #[tokio::test]
    async fn remove_all_clears_the_folder() {
        let registry = GrantRegistry::new();
        registry.create(2, 10, Permission::Read).await;
        registry.create(3, 10, Permission::Edit).await;
        registry.create(2, 11, Permission::Read).await;

        assert_eq!(registry.remove_all_for_folder(10).await, 2);
        assert_eq!(registry.count_for_folder(10).await, 0);
        assert_eq!(registry.count_for_folder(11).await, 1);
    }
}
