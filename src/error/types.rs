//! Error types
//!
//! Defines domain-specific error types for each module of the file service,
//! the closed failure taxonomy they map onto, and the tagged failure shape
//! handed to the transport boundary.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;

/// Closed failure taxonomy exposed to the transport layer.
///
/// Every error in the crate maps onto exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    Conflict,
    Invalid,
    StorageFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Invalid => "invalid",
            ErrorKind::StorageFailure => "storage_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tagged failure payload returned across the service boundary.
///
/// Operations never surface an unstructured fault; any error renders to this.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Identity module errors
#[derive(Debug)]
pub enum IdentityError {
    UserNotFound(u64),
    EmailNotFound(String),
    EmailAlreadyRegistered(String),
    UnknownRole(String),
    UnknownPermission(String),
}

impl IdentityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::UserNotFound(_) => ErrorKind::NotFound,
            IdentityError::EmailNotFound(_) => ErrorKind::NotFound,
            IdentityError::EmailAlreadyRegistered(_) => ErrorKind::Conflict,
            IdentityError::UnknownRole(_) => ErrorKind::Invalid,
            IdentityError::UnknownPermission(_) => ErrorKind::Invalid,
        }
    }
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::UserNotFound(id) => write!(f, "User {} not found", id),
            IdentityError::EmailNotFound(email) => write!(f, "User {} not found", email),
            IdentityError::EmailAlreadyRegistered(email) => {
                write!(f, "User {} already exists", email)
            }
            IdentityError::UnknownRole(role) => write!(f, "Unknown role: {}", role),
            IdentityError::UnknownPermission(p) => write!(f, "Unknown permission: {}", p),
        }
    }
}

impl std::error::Error for IdentityError {}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    PathNotFound(PathBuf),
    AlreadyExists(PathBuf),
    InvalidName(String),
    Io(io::Error),
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::PathNotFound(_) => ErrorKind::NotFound,
            StorageError::AlreadyExists(_) => ErrorKind::Conflict,
            StorageError::InvalidName(_) => ErrorKind::Invalid,
            StorageError::Io(_) => ErrorKind::StorageFailure,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PathNotFound(p) => write!(f, "Path not found: {}", p.display()),
            StorageError::AlreadyExists(p) => write!(f, "Path already exists: {}", p.display()),
            StorageError::InvalidName(n) => write!(f, "Invalid name: {}", n),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Folder module errors
#[derive(Debug)]
pub enum FolderError {
    NotFound(u64),
    PathAlreadyExists(String),
    DestinationExists(String),
    NotOwner { folder_id: u64, user_id: u64 },
    ShareUpdateDenied { folder_id: u64, user_id: u64 },
    RenameDenied { folder_id: u64, user_id: u64 },
    ViewDenied { folder_id: u64, user_id: u64 },
    GrantNotFound { folder_id: u64, user_id: u64 },
    Storage(StorageError),
}

impl FolderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FolderError::NotFound(_) => ErrorKind::NotFound,
            FolderError::PathAlreadyExists(_) => ErrorKind::Conflict,
            FolderError::DestinationExists(_) => ErrorKind::Conflict,
            FolderError::NotOwner { .. } => ErrorKind::PermissionDenied,
            FolderError::ShareUpdateDenied { .. } => ErrorKind::PermissionDenied,
            FolderError::RenameDenied { .. } => ErrorKind::PermissionDenied,
            FolderError::ViewDenied { .. } => ErrorKind::PermissionDenied,
            FolderError::GrantNotFound { .. } => ErrorKind::NotFound,
            FolderError::Storage(e) => e.kind(),
        }
    }
}

impl fmt::Display for FolderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderError::NotFound(id) => write!(f, "Folder {} not found", id),
            FolderError::PathAlreadyExists(path) => {
                write!(f, "A folder with path {} already exists", path)
            }
            FolderError::DestinationExists(path) => {
                write!(f, "Destination {} already exists on storage", path)
            }
            FolderError::NotOwner { folder_id, user_id } => {
                write!(f, "User {} does not own folder {}", user_id, folder_id)
            }
            FolderError::ShareUpdateDenied { folder_id, user_id } => write!(
                f,
                "User {} has no permission to update sharing on folder {}",
                user_id, folder_id
            ),
            FolderError::RenameDenied { folder_id, user_id } => write!(
                f,
                "User {} has no permission to rename folder {}",
                user_id, folder_id
            ),
            FolderError::ViewDenied { folder_id, user_id } => write!(
                f,
                "User {} has no permission to view folder {}",
                user_id, folder_id
            ),
            FolderError::GrantNotFound { folder_id, user_id } => {
                write!(f, "User {} has no access to folder {}", user_id, folder_id)
            }
            FolderError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for FolderError {}

impl From<StorageError> for FolderError {
    fn from(error: StorageError) -> Self {
        FolderError::Storage(error)
    }
}

/// File module errors
#[derive(Debug)]
pub enum FileError {
    NotFound(u64),
    MissingOnDisk(u64),
    FolderNotFound(u64),
    UploadDenied { folder_id: u64, user_id: u64 },
    TouchDenied { file_id: u64, user_id: u64 },
    ViewDenied { file_id: u64, user_id: u64 },
    FolderViewDenied { folder_id: u64, user_id: u64 },
    PrivateFolder(u64),
    InvalidName(String),
    NameTaken(String),
    Storage(StorageError),
}

impl FileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FileError::NotFound(_) => ErrorKind::NotFound,
            FileError::MissingOnDisk(_) => ErrorKind::NotFound,
            FileError::FolderNotFound(_) => ErrorKind::NotFound,
            FileError::UploadDenied { .. } => ErrorKind::PermissionDenied,
            FileError::TouchDenied { .. } => ErrorKind::PermissionDenied,
            FileError::ViewDenied { .. } => ErrorKind::PermissionDenied,
            FileError::FolderViewDenied { .. } => ErrorKind::PermissionDenied,
            FileError::PrivateFolder(_) => ErrorKind::PermissionDenied,
            FileError::InvalidName(_) => ErrorKind::Invalid,
            FileError::NameTaken(_) => ErrorKind::Conflict,
            FileError::Storage(e) => e.kind(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound(id) => write!(f, "File {} not found", id),
            FileError::MissingOnDisk(id) => write!(f, "File {} is missing from storage", id),
            FileError::FolderNotFound(id) => write!(f, "Folder {} not found", id),
            FileError::UploadDenied { folder_id, user_id } => write!(
                f,
                "User {} has no permission to upload to folder {}",
                user_id, folder_id
            ),
            FileError::TouchDenied { file_id, user_id } => write!(
                f,
                "User {} has no permission to modify file {}",
                user_id, file_id
            ),
            FileError::ViewDenied { file_id, user_id } => write!(
                f,
                "User {} has no permission to access file {}",
                user_id, file_id
            ),
            FileError::FolderViewDenied { folder_id, user_id } => write!(
                f,
                "User {} has no permission to view folder {}",
                user_id, folder_id
            ),
            FileError::PrivateFolder(id) => {
                write!(f, "Folder {} is private. Contact the owner to get access", id)
            }
            FileError::InvalidName(name) => write!(f, "Invalid file name: {}", name),
            FileError::NameTaken(name) => write!(f, "File {} already exists", name),
            FileError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for FileError {}

impl From<StorageError> for FileError {
    fn from(error: StorageError) -> Self {
        FileError::Storage(error)
    }
}

/// General service error that encompasses all module error types
#[derive(Debug)]
pub enum DriveError {
    Identity(IdentityError),
    Folder(FolderError),
    File(FileError),
    Storage(StorageError),
}

impl DriveError {
    /// Taxonomy kind of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DriveError::Identity(e) => e.kind(),
            DriveError::Folder(e) => e.kind(),
            DriveError::File(e) => e.kind(),
            DriveError::Storage(e) => e.kind(),
        }
    }

    /// Render into the tagged failure payload for the transport boundary.
    pub fn to_failure(&self) -> Failure {
        Failure {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveError::Identity(e) => write!(f, "{}", e),
            DriveError::Folder(e) => write!(f, "{}", e),
            DriveError::File(e) => write!(f, "{}", e),
            DriveError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DriveError {}

impl From<IdentityError> for DriveError {
    fn from(error: IdentityError) -> Self {
        DriveError::Identity(error)
    }
}

impl From<FolderError> for DriveError {
    fn from(error: FolderError) -> Self {
        DriveError::Folder(error)
    }
}

impl From<FileError> for DriveError {
    fn from(error: FileError) -> Self {
        DriveError::File(error)
    }
}

impl From<StorageError> for DriveError {
    fn from(error: StorageError) -> Self {
        DriveError::Storage(error)
    }
}
