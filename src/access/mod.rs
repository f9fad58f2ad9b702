//! Access control system
//!
//! Holds sharing grants, the permission levels they carry, and the pure
//! evaluator that turns (principal, folder, grant) into an allow/deny decision.

pub mod evaluator;
pub mod registry;
pub mod types;

pub use evaluator::{can_list_private, can_mutate_folder, can_touch_file, can_view};
pub use registry::GrantRegistry;
pub use types::{FolderAction, Grant, Permission};
