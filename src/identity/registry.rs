//! User registry
//!
//! In-memory user store standing in for the external identity collaborator.
//! Soft-deleted users stay in the map but resolve as absent everywhere except
//! explicit with-deleted lookups; soft deletion never cascades to folders.

use log::info;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use chrono::Utc;

use crate::error::IdentityError;
use crate::identity::types::{Role, User};

/// Thread-safe in-memory user store.
pub struct UserRegistry {
    users: RwLock<HashMap<u64, User>>,
    next_id: AtomicU64,
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user. Emails are unique across live and deleted users.
    pub async fn register(
        &self,
        name: &str,
        last_name: &str,
        email: &str,
        role: Role,
    ) -> Result<User, IdentityError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == email) {
            return Err(IdentityError::EmailAlreadyRegistered(email.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_string(),
            role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        users.insert(user.id, user.clone());
        info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Find a live user by id.
    pub async fn find_by_id(&self, id: u64) -> Option<User> {
        let users = self.users.read().await;
        users.get(&id).filter(|u| !u.is_deleted()).cloned()
    }

    /// Find a user by id, including soft-deleted ones.
    pub async fn find_by_id_with_deleted(&self, id: u64) -> Option<User> {
        let users = self.users.read().await;
        users.get(&id).cloned()
    }

    /// Find a live user by email.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email && !u.is_deleted())
            .cloned()
    }

    /// Resolve several user ids at once. Soft-deleted users resolve as absent,
    /// so the returned list may be shorter than the input.
    pub async fn resolve_many(&self, ids: &[u64]) -> Vec<User> {
        let users = self.users.read().await;
        ids.iter()
            .filter_map(|id| users.get(id).filter(|u| !u.is_deleted()).cloned())
            .collect()
    }

    /// Soft-delete a user. Folders they own are untouched.
    pub async fn soft_delete(&self, id: u64) -> Result<User, IdentityError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .filter(|u| !u.is_deleted())
            .ok_or(IdentityError::UserNotFound(id))?;

        user.deleted_at = Some(Utc::now());
        user.updated_at = Utc::now();
        info!("Soft-deleted user {}", id);
        Ok(user.clone())
    }
}
