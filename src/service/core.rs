//! Service construction
//!
//! Builds the shared state behind the folder and file managers. One
//! `DriveService` owns everything; managers are cheap handles over it.

use log::info;
use std::sync::Arc;

use crate::access::registry::GrantRegistry;
use crate::config::ServiceConfig;
use crate::files::manager::FileManager;
use crate::files::registry::FileRegistry;
use crate::folders::manager::FolderManager;
use crate::folders::registry::FolderRegistry;
use crate::identity::registry::UserRegistry;
use crate::service::locks::FolderLocks;
use crate::storage::filesystem::DiskStorage;

/// The assembled file service.
pub struct DriveService {
    config: Arc<ServiceConfig>,
    users: Arc<UserRegistry>,
    folders: Arc<FolderRegistry>,
    grants: Arc<GrantRegistry>,
    files: Arc<FileRegistry>,
    storage: Arc<DiskStorage>,
    locks: Arc<FolderLocks>,
}

impl DriveService {
    /// Build a service over the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        info!("File service rooted at {}", config.storage_root);

        Self {
            config: Arc::new(config),
            users: Arc::new(UserRegistry::new()),
            folders: Arc::new(FolderRegistry::new()),
            grants: Arc::new(GrantRegistry::new()),
            files: Arc::new(FileRegistry::new()),
            storage: Arc::new(DiskStorage::new()),
            locks: Arc::new(FolderLocks::new()),
        }
    }

    /// Build a service with configuration loaded from disk/environment.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Ok(Self::new(ServiceConfig::load()?))
    }

    /// The user registry standing in for the identity collaborator.
    pub fn users(&self) -> Arc<UserRegistry> {
        Arc::clone(&self.users)
    }

    /// Folder lifecycle and sharing operations.
    pub fn folder_manager(&self) -> FolderManager {
        FolderManager::new(
            Arc::clone(&self.config),
            Arc::clone(&self.users),
            Arc::clone(&self.folders),
            Arc::clone(&self.grants),
            Arc::clone(&self.files),
            Arc::clone(&self.storage),
            Arc::clone(&self.locks),
        )
    }

    /// File lifecycle operations.
    pub fn file_manager(&self) -> FileManager {
        FileManager::new(
            Arc::clone(&self.config),
            Arc::clone(&self.folders),
            Arc::clone(&self.grants),
            Arc::clone(&self.files),
            Arc::clone(&self.storage),
            Arc::clone(&self.locks),
        )
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
