//! Identity system
//!
//! Holds the verified principal type consumed by every operation and an
//! in-memory user registry standing in for the external identity service.

pub mod registry;
pub mod types;

pub use registry::UserRegistry;
pub use types::{Principal, Role, User};
