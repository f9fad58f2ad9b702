//! Access control types
//!
//! Defines the `Grant` record persisted per user/folder pair and the
//! permission levels it can carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::IdentityError;

/// Permission level carried by a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Read,
    Edit,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Edit => "edit",
        }
    }
}

impl FromStr for Permission {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Permission::Read),
            "edit" => Ok(Permission::Edit),
            other => Err(IdentityError::UnknownPermission(other.to_string())),
        }
    }
}

/// Folder-level mutating action checked by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderAction {
    Upload,
    Rename,
}

/// Persisted record authorizing one user to read or edit one folder.
///
/// Never references the folder's owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    pub id: u64,
    pub user_id: u64,
    pub folder_id: u64,
    pub permission: Permission,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
