//! Folder system
//!
//! Folder lifecycle and sharing orchestration: creation, renaming, removal
//! with its ordered cascade, grant management, and the read projections.

pub mod manager;
pub mod registry;
pub mod results;
pub mod types;

pub use manager::FolderManager;
pub use registry::FolderRegistry;
pub use results::{FolderRemoval, GranteeView, ShareOutcome, ShareReport, SharedFolderView};
pub use types::{Folder, ShareTarget, Visibility};
