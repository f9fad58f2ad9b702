//! File system (logical files)
//!
//! File lifecycle within folders: batch upload, rename, removal, download,
//! and the folder listing entry points.

pub mod manager;
pub mod registry;
pub mod results;
pub mod types;

pub use manager::FileManager;
pub use registry::FileRegistry;
pub use results::{FileDownload, FileRename, UploadRejection, UploadReport};
pub use types::{File, FileType, IncomingFile};
