//! File manager
//!
//! File lifecycle within folders. Authorization funnels through the pure
//! evaluator; bytes always move before the rows that describe them.

use log::{error, info};
use std::path::Path;
use std::sync::Arc;

use crate::access::evaluator::{can_list_private, can_mutate_folder, can_touch_file, can_view};
use crate::access::registry::GrantRegistry;
use crate::access::types::FolderAction;
use crate::config::ServiceConfig;
use crate::error::{DriveError, FileError};
use crate::files::registry::FileRegistry;
use crate::files::results::{FileDownload, FileRename, UploadRejection, UploadReport};
use crate::files::types::{File, FileType, IncomingFile};
use crate::folders::registry::FolderRegistry;
use crate::identity::types::Principal;
use crate::service::locks::FolderLocks;
use crate::storage::filesystem::DiskStorage;
use crate::storage::layout::{file_disk_path, folder_disk_path};
use crate::storage::validation::sanitize_file_name;

/// Orchestrates upload, rename, removal, download, and folder listings.
pub struct FileManager {
    config: Arc<ServiceConfig>,
    folders: Arc<FolderRegistry>,
    grants: Arc<GrantRegistry>,
    files: Arc<FileRegistry>,
    storage: Arc<DiskStorage>,
    locks: Arc<FolderLocks>,
}

impl FileManager {
    pub fn new(
        config: Arc<ServiceConfig>,
        folders: Arc<FolderRegistry>,
        grants: Arc<GrantRegistry>,
        files: Arc<FileRegistry>,
        storage: Arc<DiskStorage>,
        locks: Arc<FolderLocks>,
    ) -> Self {
        Self {
            config,
            folders,
            grants,
            files,
            storage,
            locks,
        }
    }

    /// Upload a batch of staged files into a folder.
    ///
    /// Folder resolution and the uploader's permission are decided before any
    /// file is touched and fail the whole batch; after that each file stands
    /// alone, and a duplicate name only skips that file. Bytes land under the
    /// folder owner's namespace no matter who uploads: shared folders keep
    /// one physical location.
    pub async fn upload(
        &self,
        folder_id: u64,
        uploads: Vec<IncomingFile>,
        principal: &Principal,
    ) -> Result<UploadReport, DriveError> {
        let _guard = self.locks.acquire(folder_id).await;

        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .ok_or(FileError::FolderNotFound(folder_id))?;

        let grant = self
            .grants
            .find_by_user_and_folder(principal.id, folder_id)
            .await;

        if !can_mutate_folder(principal.id, &folder, grant.as_ref(), FolderAction::Upload) {
            error!(
                "User {} tried to upload into folder {} without access",
                principal.id, folder_id
            );
            return Err(FileError::UploadDenied {
                folder_id,
                user_id: principal.id,
            }
            .into());
        }

        let root = self.config.storage_root_path();
        let target_dir = folder_disk_path(&root, folder.owner_id, &folder.path);
        let mut report = UploadReport::default();

        for upload in uploads {
            let name = match sanitize_file_name(&upload.original_name) {
                Ok(name) if name.len() <= self.config.max_file_name_length => name,
                _ => {
                    report.errors.push(UploadRejection {
                        file: upload.original_name.clone(),
                        message: "Invalid file name".to_string(),
                    });
                    continue;
                }
            };

            if upload.size > self.config.max_file_size_bytes() {
                report.errors.push(UploadRejection {
                    file: name,
                    message: format!(
                        "File exceeds the {} MB upload limit",
                        self.config.max_file_size_mb
                    ),
                });
                continue;
            }

            if self
                .files
                .find_by_path_in_folder(folder_id, &name)
                .await
                .is_some()
            {
                report.errors.push(UploadRejection {
                    file: name,
                    message: "File already exists".to_string(),
                });
                continue;
            }

            if let Err(e) = self
                .storage
                .move_file(&upload.staged_path, &target_dir.join(&name))
            {
                report.errors.push(UploadRejection {
                    file: name,
                    message: e.to_string(),
                });
                continue;
            }

            let stem = Path::new(&name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.clone());

            let file = self
                .files
                .create(
                    &stem,
                    &name,
                    FileType::from_mime(&upload.mime_type),
                    upload.size,
                    folder_id,
                    principal.id,
                )
                .await;

            info!(
                "File {} uploaded by {} into folder {}",
                file.path, principal.email, folder_id
            );
            report.success.push(file);
        }

        Ok(report)
    }

    /// Delete a file. The bytes go before the row; a storage failure leaves
    /// the row in place.
    pub async fn remove(&self, file_id: u64, principal: &Principal) -> Result<(), DriveError> {
        let file = self
            .files
            .find_by_id(file_id)
            .await
            .ok_or(FileError::NotFound(file_id))?;

        let _guard = self.locks.acquire(file.folder_id).await;

        let folder = self
            .folders
            .find_by_id(file.folder_id)
            .await
            .ok_or(FileError::FolderNotFound(file.folder_id))?;

        let grant = self
            .grants
            .find_by_user_and_folder(principal.id, folder.id)
            .await;

        if !can_touch_file(principal.id, &folder, grant.as_ref(), file.creator_id) {
            error!(
                "User {} tried to delete file {} in folder {} without access",
                principal.id, file_id, folder.id
            );
            return Err(FileError::TouchDenied {
                file_id,
                user_id: principal.id,
            }
            .into());
        }

        let root = self.config.storage_root_path();
        let disk = file_disk_path(&root, folder.owner_id, &folder.path, &file.path);
        self.storage.delete_file(&disk).map_err(FileError::from)?;

        self.files.remove(file_id).await;
        info!("File {} deleted by user {}", file_id, principal.id);
        Ok(())
    }

    /// Rename a file, preserving its extension. The physical rename must
    /// succeed before name and path are persisted.
    pub async fn rename(
        &self,
        file_id: u64,
        new_name: &str,
        principal: &Principal,
    ) -> Result<FileRename, DriveError> {
        let mut file = self
            .files
            .find_by_id(file_id)
            .await
            .ok_or(FileError::NotFound(file_id))?;

        let _guard = self.locks.acquire(file.folder_id).await;

        let folder = self
            .folders
            .find_by_id(file.folder_id)
            .await
            .ok_or(FileError::FolderNotFound(file.folder_id))?;

        let grant = self
            .grants
            .find_by_user_and_folder(principal.id, folder.id)
            .await;

        if !can_touch_file(principal.id, &folder, grant.as_ref(), file.creator_id) {
            error!(
                "User {} tried to rename file {} in folder {} without access",
                principal.id, file_id, folder.id
            );
            return Err(FileError::TouchDenied {
                file_id,
                user_id: principal.id,
            }
            .into());
        }

        let name = sanitize_file_name(new_name)
            .map_err(|_| FileError::InvalidName(new_name.to_string()))?;
        if name.len() > self.config.max_file_name_length {
            return Err(FileError::InvalidName(new_name.to_string()).into());
        }

        let new_path = match Path::new(&file.path).extension() {
            Some(ext) => format!("{}.{}", name, ext.to_string_lossy()),
            None => name.clone(),
        };

        let clash = self
            .files
            .find_by_path_in_folder(folder.id, &new_path)
            .await;
        if clash.is_some_and(|c| c.id != file_id) {
            return Err(FileError::NameTaken(new_path).into());
        }

        let root = self.config.storage_root_path();
        let old_disk = file_disk_path(&root, folder.owner_id, &folder.path, &file.path);
        let new_disk = file_disk_path(&root, folder.owner_id, &folder.path, &new_path);
        self.storage
            .rename(&old_disk, &new_disk)
            .map_err(FileError::from)?;

        file.name = name;
        file.path = new_path;
        let file = self.files.save(file).await;
        info!("File {} renamed by user {}", file_id, principal.id);

        Ok(FileRename {
            file_id: file.id,
            path: file.path,
            folder_id: folder.id,
        })
    }

    /// Open a file for download.
    ///
    /// View-level authorization applies: owner, any grant holder, or anyone
    /// when the folder is public. A row whose bytes are gone is NotFound.
    pub async fn download(
        &self,
        file_id: u64,
        principal: &Principal,
    ) -> Result<FileDownload, DriveError> {
        let file = self
            .files
            .find_by_id(file_id)
            .await
            .ok_or(FileError::NotFound(file_id))?;

        let folder = self
            .folders
            .find_by_id(file.folder_id)
            .await
            .ok_or(FileError::FolderNotFound(file.folder_id))?;

        let grant = self
            .grants
            .find_by_user_and_folder(principal.id, folder.id)
            .await;

        if !can_view(principal.id, &folder, grant.as_ref()) {
            error!(
                "User {} tried to download file {} in folder {} without access",
                principal.id, file_id, folder.id
            );
            return Err(FileError::ViewDenied {
                file_id,
                user_id: principal.id,
            }
            .into());
        }

        let root = self.config.storage_root_path();
        let disk = file_disk_path(&root, folder.owner_id, &folder.path, &file.path);
        if !self.storage.exists(&disk) {
            error!(
                "File {} has a row but no bytes at {}",
                file_id,
                disk.display()
            );
            return Err(FileError::MissingOnDisk(file_id).into());
        }

        let reader = self.storage.open_read(&disk).map_err(FileError::from)?;
        Ok(FileDownload {
            reader,
            file_name: file.path,
            size: file.size,
        })
    }

    /// Fetch one file's metadata under the view rule.
    pub async fn get_file(&self, file_id: u64, principal: &Principal) -> Result<File, DriveError> {
        let file = self
            .files
            .find_by_id(file_id)
            .await
            .ok_or(FileError::NotFound(file_id))?;

        let folder = self
            .folders
            .find_by_id(file.folder_id)
            .await
            .ok_or(FileError::FolderNotFound(file.folder_id))?;

        let grant = self
            .grants
            .find_by_user_and_folder(principal.id, folder.id)
            .await;

        if !can_view(principal.id, &folder, grant.as_ref()) {
            error!(
                "User {} tried to access file {} in folder {} without access",
                principal.id, file_id, folder.id
            );
            return Err(FileError::ViewDenied {
                file_id,
                user_id: principal.id,
            }
            .into());
        }

        Ok(file)
    }

    /// List a folder's files through the private entry point.
    ///
    /// Owner or any grant holder only; public visibility does not open this
    /// path, the public listing below is the distinct route for that.
    pub async fn list_in_folder(
        &self,
        folder_id: u64,
        principal: &Principal,
    ) -> Result<Vec<File>, DriveError> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .ok_or(FileError::FolderNotFound(folder_id))?;

        let grant = self
            .grants
            .find_by_user_and_folder(principal.id, folder_id)
            .await;

        if !can_list_private(principal.id, &folder, grant.as_ref()) {
            error!(
                "INVALID REQUEST: {} tried to list folder {} owned by user {} via the private path",
                principal.email, folder_id, folder.owner_id
            );
            return Err(FileError::FolderViewDenied {
                folder_id,
                user_id: principal.id,
            }
            .into());
        }

        Ok(self.files.find_by_folder(folder_id).await)
    }

    /// List a public folder's files without a principal.
    ///
    /// Fails hard on private folders for any caller, so this entry point
    /// cannot be used to probe private contents.
    pub async fn list_in_public_folder(&self, folder_id: u64) -> Result<Vec<File>, DriveError> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await
            .ok_or(FileError::FolderNotFound(folder_id))?;

        if !folder.visibility.is_public() {
            error!(
                "INVALID REQUEST: anonymous listing of private folder {} owned by user {}",
                folder_id, folder.owner_id
            );
            return Err(FileError::PrivateFolder(folder_id).into());
        }

        Ok(self.files.find_by_folder(folder_id).await)
    }

    /// Files the caller created, across all folders.
    pub async fn list_created_by(&self, principal: &Principal) -> Result<Vec<File>, DriveError> {
        Ok(self.files.find_by_creator(principal.id).await)
    }
}
