//! File types
//!
//! Defines the `File` entity, the closed type classification derived from a
//! declared MIME type, and the staged upload input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Closed classification of a file, derived from its declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Pdf,
    Doc,
    Xls,
    Ppt,
    Txt,
    Zip,
    Other,
}

impl FileType {
    /// Classify a declared MIME type. Unknown types land in `Other`.
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            "image/jpeg" | "image/png" | "image/gif" => FileType::Image,
            "application/pdf" => FileType::Pdf,
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                FileType::Doc
            }
            "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => FileType::Xls,
            "application/vnd.ms-powerpoint"
            | "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                FileType::Ppt
            }
            "text/plain" => FileType::Txt,
            "application/zip" | "application/x-zip-compressed" => FileType::Zip,
            _ => FileType::Other,
        }
    }
}

/// A stored file inside a folder.
///
/// `name` is the stem without extension; `path` is the original file name,
/// unique within the folder and used as the on-disk name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    pub id: u64,
    pub name: String,
    pub path: String,
    pub file_type: FileType,
    pub size: u64,
    pub folder_id: u64,
    pub creator_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One staged upload handed over by the transport layer.
///
/// The bytes already sit at `staged_path` (the transport's staging area);
/// the upload operation moves them into the folder's physical directory.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub staged_path: PathBuf,
}
