//! Output module.
//!
//! - Paths: group key to nested, filesystem-safe chart path
//! - Writer: directories, chart images and the snapshot file

pub mod paths;
pub mod writer;

pub use paths::{build_path, sanitize_filename, OutputPath, FORBIDDEN_CHARS, MAX_SEGMENT_LEN};
pub use writer::{ensure_dir, snapshot_json, write_image, write_snapshot};
