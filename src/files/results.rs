//! Result types for file operations

use serde::Serialize;
use std::fs;

use crate::files::types::File;

/// One rejected file from an upload batch.
#[derive(Debug, Clone, Serialize)]
pub struct UploadRejection {
    pub file: String,
    pub message: String,
}

/// Outcome of an upload batch. Per-file conflicts land in `errors` and never
/// cancel the remainder of the batch.
#[derive(Debug, Serialize, Default)]
pub struct UploadReport {
    pub success: Vec<File>,
    pub errors: Vec<UploadRejection>,
}

/// Open handle for a download: the byte stream plus what the transport needs
/// to describe it.
#[derive(Debug)]
pub struct FileDownload {
    pub reader: fs::File,
    pub file_name: String,
    pub size: u64,
}

/// Result of a file rename.
#[derive(Debug, Clone, Serialize)]
pub struct FileRename {
    pub file_id: u64,
    pub path: String,
    pub folder_id: u64,
}
