//! filedock - multi-user file storage with per-folder sharing
//!
//! Manages owned folders and the files inside them for multiple users, with
//! two-level sharing grants (read/edit), a public/private visibility switch,
//! and a physical storage layout kept consistent with the ownership and
//! access-control records.

pub mod access;
pub mod config;
pub mod error;
pub mod files;
pub mod folders;
pub mod identity;
pub mod service;
pub mod storage;

pub use config::ServiceConfig;
pub use error::{DriveError, ErrorKind, Failure};
pub use service::DriveService;
