//! Service core
//!
//! Wires the registries, the storage adapter, and the per-folder locks into
//! the two managers exposed to the transport layer.

pub mod core;
pub mod locks;

pub use core::DriveService;
pub use locks::FolderLocks;
