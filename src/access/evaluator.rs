//! Permission evaluator
//!
//! Pure decision functions over (principal, folder, grant-lookup-result).
//! No registry lookups happen here; callers resolve the grant first and pass
//! the result in, so every rule is checkable in isolation.

use crate::access::types::{FolderAction, Grant, Permission};
use crate::folders::types::Folder;

/// View-level check used by download and metadata reads.
///
/// Owner and any grant holder may view; everyone may view a public folder.
pub fn can_view(principal_id: u64, folder: &Folder, grant: Option<&Grant>) -> bool {
    folder.owner_id == principal_id || grant.is_some() || folder.visibility.is_public()
}

/// Private-listing check. Public visibility does not help here: the public
/// listing entry point is a separate path with its own rule.
pub fn can_list_private(principal_id: u64, folder: &Folder, grant: Option<&Grant>) -> bool {
    folder.owner_id == principal_id || grant.is_some()
}

/// Folder-level mutation check (upload into, rename the folder).
///
/// Owner always; edit grant holders too; read grant holders never.
pub fn can_mutate_folder(
    principal_id: u64,
    folder: &Folder,
    grant: Option<&Grant>,
    _action: FolderAction,
) -> bool {
    if folder.owner_id == principal_id {
        return true;
    }
    matches!(grant, Some(g) if g.permission == Permission::Edit)
}

/// Per-file mutation check (delete or rename one file).
///
/// Owner and edit grant holders may touch any file; a read grant holder only
/// files they personally created.
pub fn can_touch_file(
    principal_id: u64,
    folder: &Folder,
    grant: Option<&Grant>,
    file_creator_id: u64,
) -> bool {
    if folder.owner_id == principal_id {
        return true;
    }
    match grant {
        Some(g) if g.permission == Permission::Edit => true,
        Some(_) => file_creator_id == principal_id,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folders::types::{Folder, Visibility};
    use chrono::Utc;

    const OWNER: u64 = 1;
    const GRANTEE: u64 = 2;
    const STRANGER: u64 = 3;

    fn folder(visibility: Visibility) -> Folder {
        let now = Utc::now();
        Folder {
            id: 10,
            name: "Reports".to_string(),
            path: "/private/reports".to_string(),
            visibility,
            is_shared: false,
            owner_id: OWNER,
            created_at: now,
            updated_at: now,
        }
    }

    fn grant(permission: Permission) -> Grant {
        let now = Utc::now();
        Grant {
            id: 1,
            user_id: GRANTEE,
            folder_id: 10,
            permission,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_is_always_allowed() {
        let f = folder(Visibility::Private);
        assert!(can_view(OWNER, &f, None));
        assert!(can_list_private(OWNER, &f, None));
        assert!(can_mutate_folder(OWNER, &f, None, FolderAction::Upload));
        assert!(can_mutate_folder(OWNER, &f, None, FolderAction::Rename));
        assert!(can_touch_file(OWNER, &f, None, GRANTEE));
    }

    #[test]
    fn edit_grant_allows_every_folder_mutation() {
        let f = folder(Visibility::Private);
        let g = grant(Permission::Edit);
        assert!(can_view(GRANTEE, &f, Some(&g)));
        assert!(can_mutate_folder(GRANTEE, &f, Some(&g), FolderAction::Upload));
        assert!(can_mutate_folder(GRANTEE, &f, Some(&g), FolderAction::Rename));
        // any file, not just self-created
        assert!(can_touch_file(GRANTEE, &f, Some(&g), OWNER));
    }

    #[test]
    fn read_grant_is_view_only() {
        let f = folder(Visibility::Private);
        let g = grant(Permission::Read);
        assert!(can_view(GRANTEE, &f, Some(&g)));
        assert!(can_list_private(GRANTEE, &f, Some(&g)));
        assert!(!can_mutate_folder(GRANTEE, &f, Some(&g), FolderAction::Upload));
        assert!(!can_mutate_folder(GRANTEE, &f, Some(&g), FolderAction::Rename));
    }

    #[test]
    fn read_grant_touches_only_self_created_files() {
        let f = folder(Visibility::Private);
        let g = grant(Permission::Read);
        assert!(can_touch_file(GRANTEE, &f, Some(&g), GRANTEE));
        assert!(!can_touch_file(GRANTEE, &f, Some(&g), OWNER));
    }

    #[test]
    fn stranger_is_denied_on_private_folders() {
        let f = folder(Visibility::Private);
        assert!(!can_view(STRANGER, &f, None));
        assert!(!can_list_private(STRANGER, &f, None));
        assert!(!can_mutate_folder(STRANGER, &f, None, FolderAction::Upload));
        assert!(!can_touch_file(STRANGER, &f, None, STRANGER));
    }

    #[test]
    fn stranger_views_public_folders_but_private_listing_still_denies() {
        let f = folder(Visibility::Public);
        assert!(can_view(STRANGER, &f, None));
        assert!(!can_list_private(STRANGER, &f, None));
        assert!(!can_mutate_folder(STRANGER, &f, None, FolderAction::Upload));
    }
}
