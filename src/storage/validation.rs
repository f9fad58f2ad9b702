//! Name sanitizing and validation
//!
//! Pure normalization of folder names into storage path segments, plus the
//! safety checks applied to client-supplied file names.

use crate::error::StorageError;

/// Normalize a folder display name into its storage path segment.
///
/// Trims the name, collapses every internal whitespace run into a single
/// underscore, and lowercases. Deterministic; feeds both the persisted
/// `Folder.path` and the physical directory name.
pub fn sanitize_folder_name(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Validate a client-supplied file name before it touches a path.
///
/// Rejects empty names, path separators, and parent-directory components.
pub fn sanitize_file_name(name: &str) -> Result<String, StorageError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(StorageError::InvalidName("empty file name".into()));
    }

    if trimmed.contains(['/', '\\']) || trimmed.contains("..") {
        return Err(StorageError::InvalidName(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_names_are_trimmed_collapsed_and_lowercased() {
        assert_eq!(sanitize_folder_name("My Folder"), "my_folder");
        assert_eq!(sanitize_folder_name("  Quarterly   Reports "), "quarterly_reports");
        assert_eq!(sanitize_folder_name("already_clean"), "already_clean");
        assert_eq!(sanitize_folder_name("Tabs\tand\nnewlines"), "tabs_and_newlines");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_folder_name("A  B  C");
        assert_eq!(sanitize_folder_name(&once), once);
    }

    #[test]
    fn file_names_reject_traversal() {
        assert!(sanitize_file_name("../etc/passwd").is_err());
        assert!(sanitize_file_name("a/b.txt").is_err());
        assert!(sanitize_file_name("a\\b.txt").is_err());
        assert!(sanitize_file_name("").is_err());
        assert!(sanitize_file_name("   ").is_err());
    }

    #[test]
    fn file_names_pass_through_when_safe() {
        assert_eq!(sanitize_file_name(" q1.pdf ").unwrap(), "q1.pdf");
    }
}
