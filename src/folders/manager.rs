//! Folder manager
//!
//! Lifecycle and sharing orchestration for folders. Every mutating operation
//! takes the folder's lock for its whole span, and physical effects always
//! land before the metadata that describes them.

use log::{error, info};
use std::sync::Arc;

use crate::access::evaluator::can_mutate_folder;
use crate::access::registry::GrantRegistry;
use crate::access::types::{FolderAction, Grant, Permission};
use crate::config::ServiceConfig;
use crate::error::{DriveError, FolderError, IdentityError, StorageError};
use crate::files::registry::FileRegistry;
use crate::folders::registry::FolderRegistry;
use crate::folders::results::{FolderRemoval, GranteeView, ShareOutcome, ShareReport, SharedFolderView};
use crate::folders::types::{Folder, ShareTarget, Visibility};
use crate::identity::registry::UserRegistry;
use crate::identity::types::Principal;
use crate::service::locks::FolderLocks;
use crate::storage::filesystem::DiskStorage;
use crate::storage::layout::{folder_disk_path, visibility_path};
use crate::storage::validation::sanitize_folder_name;

/// Orchestrates folder lifecycle, sharing, and the read projections.
pub struct FolderManager {
    config: Arc<ServiceConfig>,
    users: Arc<UserRegistry>,
    folders: Arc<FolderRegistry>,
    grants: Arc<GrantRegistry>,
    files: Arc<FileRegistry>,
    storage: Arc<DiskStorage>,
    locks: Arc<FolderLocks>,
}

impl FolderManager {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Arc<ServiceConfig>,
        users: Arc<UserRegistry>,
        folders: Arc<FolderRegistry>,
        grants: Arc<GrantRegistry>,
        files: Arc<FileRegistry>,
        storage: Arc<DiskStorage>,
        locks: Arc<FolderLocks>,
    ) -> Self {
        Self {
            config,
            users,
            folders,
            grants,
            files,
            storage,
            locks,
        }
    }

    /// Create a folder owned by the caller.
    ///
    /// The sanitized path is unique per visibility scope across all owners;
    /// a clash is a Conflict. No physical directory is created yet: it
    /// materializes on first upload.
    pub async fn create_folder(
        &self,
        name: &str,
        visibility: Visibility,
        principal: &Principal,
    ) -> Result<Folder, DriveError> {
        let sanitized = sanitize_folder_name(name);
        if sanitized.is_empty() || name.len() > self.config.max_folder_name_length {
            return Err(StorageError::InvalidName(name.to_string()).into());
        }

        let path = visibility_path(visibility, &sanitized);

        if self.folders.find_by_path(&path).await.is_some() {
            error!(
                "User {} tried to create a folder {} that already exists",
                principal.id, name
            );
            return Err(FolderError::PathAlreadyExists(path).into());
        }

        if self.users.find_by_id(principal.id).await.is_none() {
            return Err(IdentityError::UserNotFound(principal.id).into());
        }

        let folder = self
            .folders
            .create(name.trim(), &path, visibility, principal.id)
            .await;
        info!("New folder {} created by user {}", folder.id, principal.id);

        Ok(folder)
    }

    /// Share a folder with a batch of users.
    ///
    /// Owner-gated. All targets must resolve or the whole call fails; after
    /// that, each target succeeds or is skipped on its own (already shared,
    /// or target is the requester) without affecting the rest.
    pub async fn share_folder(
        &self,
        folder_id: u64,
        targets: &[ShareTarget],
        principal: &Principal,
    ) -> Result<ShareReport, DriveError> {
        let _guard = self.locks.acquire(folder_id).await;

        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .ok_or(FolderError::NotFound(folder_id))?;

        if !folder.is_owned_by(principal.id) {
            error!(
                "User {} tried to share folder {} that does not belong to them",
                principal.id, folder_id
            );
            return Err(FolderError::NotOwner {
                folder_id,
                user_id: principal.id,
            }
            .into());
        }

        let ids: Vec<u64> = targets.iter().map(|t| t.user_id).collect();
        let resolved = self.users.resolve_many(&ids).await;
        if resolved.len() != targets.len() {
            let missing = ids
                .iter()
                .find(|id| !resolved.iter().any(|u| u.id == **id))
                .copied()
                .unwrap_or_default();
            error!(
                "While sharing folder {} some target users were not found",
                folder_id
            );
            return Err(IdentityError::UserNotFound(missing).into());
        }

        let mut report = ShareReport::default();

        for target in targets {
            let Some(user) = resolved.iter().find(|u| u.id == target.user_id) else {
                continue;
            };

            let existing = self
                .grants
                .find_by_user_and_folder(user.id, folder_id)
                .await;
            if existing.is_some() {
                report.skipped.push(ShareOutcome {
                    user_id: user.id,
                    email: user.email.clone(),
                    folder_id,
                    message: format!("User {} already has access to this folder", user.email),
                });
                continue;
            }

            if user.id == principal.id {
                report.skipped.push(ShareOutcome {
                    user_id: user.id,
                    email: user.email.clone(),
                    folder_id,
                    message: "You cannot share this folder with yourself".to_string(),
                });
                continue;
            }

            self.grants
                .create(user.id, folder_id, target.permission)
                .await;
            report.succeeded.push(ShareOutcome {
                user_id: user.id,
                email: user.email.clone(),
                folder_id,
                message: format!("Folder {} shared with user {}", folder_id, user.email),
            });
        }

        self.refresh_is_shared(folder).await;

        Ok(report)
    }

    /// Update the permission level of an existing grant.
    ///
    /// The authorization check compares the requester against the grant's
    /// holder, not the folder owner. This mirrors the long-standing observed
    /// behavior of the share-update endpoint; see DESIGN.md before changing.
    pub async fn update_grant_permission(
        &self,
        folder_id: u64,
        target_user_id: u64,
        new_permission: Permission,
        principal: &Principal,
    ) -> Result<Grant, DriveError> {
        let _guard = self.locks.acquire(folder_id).await;

        let grant = self
            .grants
            .find_by_user_and_folder(target_user_id, folder_id)
            .await
            .ok_or(FolderError::GrantNotFound {
                folder_id,
                user_id: target_user_id,
            })?;

        if principal.id != grant.user_id {
            error!(
                "User {} tried to update a grant on folder {} held by user {}",
                principal.id, folder_id, grant.user_id
            );
            return Err(FolderError::ShareUpdateDenied {
                folder_id,
                user_id: principal.id,
            }
            .into());
        }

        let updated = self
            .grants
            .save_permission(grant.id, new_permission)
            .await
            .ok_or(FolderError::GrantNotFound {
                folder_id,
                user_id: target_user_id,
            })?;

        info!(
            "Grant on folder {} for user {} updated to {}",
            folder_id,
            target_user_id,
            new_permission.as_str()
        );
        Ok(updated)
    }

    /// Revoke a user's grant on a folder. Owner-gated; clears `is_shared`
    /// when the last grant goes.
    pub async fn remove_grant(
        &self,
        folder_id: u64,
        target_user_id: u64,
        principal: &Principal,
    ) -> Result<(), DriveError> {
        let _guard = self.locks.acquire(folder_id).await;

        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .ok_or(FolderError::NotFound(folder_id))?;

        if !folder.is_owned_by(principal.id) {
            error!(
                "User {} tried to revoke access on folder {} that does not belong to them",
                principal.id, folder_id
            );
            return Err(FolderError::NotOwner {
                folder_id,
                user_id: principal.id,
            }
            .into());
        }

        let grant = self
            .grants
            .find_by_user_and_folder(target_user_id, folder_id)
            .await
            .ok_or(FolderError::GrantNotFound {
                folder_id,
                user_id: target_user_id,
            })?;

        self.grants.remove(grant.id).await;
        info!(
            "Grant on folder {} revoked for user {} by owner {}",
            folder_id, target_user_id, principal.id
        );

        self.refresh_is_shared(folder).await;

        Ok(())
    }

    /// Rename a folder. Owner or edit-grant holders only.
    ///
    /// The physical directory is renamed first; name and path are persisted
    /// only once the disk rename has succeeded, so a storage failure leaves
    /// the metadata untouched.
    pub async fn rename_folder(
        &self,
        folder_id: u64,
        new_name: &str,
        principal: &Principal,
    ) -> Result<Folder, DriveError> {
        let _guard = self.locks.acquire(folder_id).await;

        let mut folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .ok_or(FolderError::NotFound(folder_id))?;

        let grant = self
            .grants
            .find_by_user_and_folder(principal.id, folder_id)
            .await;

        if !can_mutate_folder(principal.id, &folder, grant.as_ref(), FolderAction::Rename) {
            error!(
                "User {} tried to rename folder {} without access permission",
                principal.id, folder_id
            );
            return Err(FolderError::RenameDenied {
                folder_id,
                user_id: principal.id,
            }
            .into());
        }

        let sanitized = sanitize_folder_name(new_name);
        if sanitized.is_empty() || new_name.len() > self.config.max_folder_name_length {
            return Err(StorageError::InvalidName(new_name.to_string()).into());
        }

        let new_path = visibility_path(folder.visibility, &sanitized);
        let root = self.config.storage_root_path();
        let old_disk = folder_disk_path(&root, folder.owner_id, &folder.path);
        let new_disk = folder_disk_path(&root, folder.owner_id, &new_path);

        if self.storage.exists(&new_disk) {
            return Err(FolderError::DestinationExists(new_path).into());
        }

        // A folder nothing was uploaded to has no tree yet; only then is the
        // physical rename skippable.
        if self.storage.exists(&old_disk) {
            self.storage
                .rename(&old_disk, &new_disk)
                .map_err(FolderError::from)?;
        }

        folder.name = new_name.trim().to_string();
        folder.path = new_path;
        let folder = self.folders.save(folder).await;
        info!("Folder {} renamed by user {}", folder_id, principal.id);

        Ok(folder)
    }

    /// Delete a folder and everything it carries.
    ///
    /// Ordered cascade: grants first, then the physical tree, then the file
    /// rows and the folder row. A tree-delete failure aborts before any row
    /// is removed, so metadata is never orphaned from surviving bytes.
    pub async fn remove_folder(
        &self,
        folder_id: u64,
        principal: &Principal,
    ) -> Result<FolderRemoval, DriveError> {
        let _guard = self.locks.acquire(folder_id).await;

        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .ok_or(FolderError::NotFound(folder_id))?;

        if !folder.is_owned_by(principal.id) {
            error!(
                "User {} tried to delete folder {} without access permission",
                principal.id, folder_id
            );
            return Err(FolderError::NotOwner {
                folder_id,
                user_id: principal.id,
            }
            .into());
        }

        let grants_removed = self.grants.remove_all_for_folder(folder_id).await;

        let root = self.config.storage_root_path();
        let disk = folder_disk_path(&root, folder.owner_id, &folder.path);
        self.storage.delete_tree(&disk).map_err(FolderError::from)?;

        let files_removed = self.files.remove_all_for_folder(folder_id).await;
        self.folders.remove(folder_id).await;
        info!("Folder {} removed by user {}", folder_id, principal.id);

        Ok(FolderRemoval {
            folder_id,
            path: folder.path,
            grants_removed,
            files_removed,
        })
    }

    /// Folders owned by the caller.
    pub async fn list_owned(&self, principal: &Principal) -> Result<Vec<Folder>, DriveError> {
        Ok(self.folders.find_by_owner(principal.id).await)
    }

    /// Folders shared with the caller, with the permission each grant carries.
    pub async fn list_shared_with_me(
        &self,
        principal: &Principal,
    ) -> Result<Vec<SharedFolderView>, DriveError> {
        let grants = self.grants.find_by_user(principal.id).await;
        let mut views = Vec::with_capacity(grants.len());

        for grant in grants {
            if let Some(folder) = self.folders.find_by_id(grant.folder_id).await {
                views.push(SharedFolderView {
                    folder,
                    permission: grant.permission,
                });
            }
        }

        views.sort_by_key(|v| v.folder.id);
        Ok(views)
    }

    /// Public folders of the user registered under the given email.
    pub async fn list_public_by_owner_email(
        &self,
        email: &str,
    ) -> Result<Vec<Folder>, DriveError> {
        let owner = self
            .users
            .find_by_email(email)
            .await
            .ok_or_else(|| IdentityError::EmailNotFound(email.to_string()))?;

        Ok(self.folders.find_public_by_owner(owner.id).await)
    }

    /// The caller's own folders that currently carry at least one grant.
    ///
    /// Derived from the live grant count rather than the stored flag.
    pub async fn list_folders_i_share_out(
        &self,
        principal: &Principal,
    ) -> Result<Vec<Folder>, DriveError> {
        let owned = self.folders.find_by_owner(principal.id).await;
        let mut shared = Vec::new();

        for folder in owned {
            if self.grants.count_for_folder(folder.id).await > 0 {
                shared.push(folder);
            }
        }

        Ok(shared)
    }

    /// Users a folder is shared with. Owner-gated.
    pub async fn list_grantees(
        &self,
        folder_id: u64,
        principal: &Principal,
    ) -> Result<Vec<GranteeView>, DriveError> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .ok_or(FolderError::NotFound(folder_id))?;

        if !folder.is_owned_by(principal.id) {
            error!(
                "User {} tried to list grantees of folder {} without permission",
                principal.id, folder_id
            );
            return Err(FolderError::ViewDenied {
                folder_id,
                user_id: principal.id,
            }
            .into());
        }

        let grants = self.grants.find_by_folder(folder_id).await;
        let mut grantees = Vec::with_capacity(grants.len());

        for grant in grants {
            let email = self
                .users
                .find_by_id_with_deleted(grant.user_id)
                .await
                .map(|u| u.email)
                .unwrap_or_default();
            grantees.push(GranteeView {
                user_id: grant.user_id,
                email,
                permission: grant.permission,
                granted_at: grant.created_at,
            });
        }

        grantees.sort_by_key(|g| g.user_id);
        Ok(grantees)
    }

    /// Re-derive `is_shared` from the live grant count and persist it.
    /// Callers hold the folder lock.
    async fn refresh_is_shared(&self, mut folder: Folder) {
        let shared = self.grants.count_for_folder(folder.id).await > 0;
        if folder.is_shared != shared {
            folder.is_shared = shared;
            self.folders.save(folder).await;
        }
    }
}
