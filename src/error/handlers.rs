//! Error handlers
//!
//! Maps service errors onto the tagged failure shape for the transport layer.

use log::error;

use crate::error::types::{DriveError, Failure};

/// Log a service error at the boundary.
pub fn handle_error(err: &DriveError) {
    error!("Service error: {}", err);
}

/// Convert any service error into the transport failure payload.
pub fn error_to_failure(err: &DriveError) -> Failure {
    err.to_failure()
}
