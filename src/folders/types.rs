//! Folder types
//!
//! Defines the `Folder` entity and its visibility switch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default view policy for non-owners without a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// An owned folder.
///
/// `path` is the sanitized logical path (`/<visibility>/<sanitized-name>`);
/// `is_shared` is derived from the live grant count and flipped only under
/// the folder's lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: u64,
    pub name: String,
    pub path: String,
    pub visibility: Visibility,
    pub is_shared: bool,
    pub owner_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Whether the given user owns this folder.
    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.owner_id == user_id
    }
}

/// One recipient of a share call.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareTarget {
    pub user_id: u64,
    pub permission: crate::access::types::Permission,
}
