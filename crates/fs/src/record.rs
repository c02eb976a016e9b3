use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate statistics for one matched directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryRecord {
    /// Absolute path of the aggregated directory
    pub path: PathBuf,
    /// Total length of every regular file in the subtree
    pub size_bytes: u64,
    /// Regular files anywhere in the subtree
    pub file_count: u64,
    /// Directories in the subtree, not counting `path` itself
    pub subdir_count: u64,
    /// Modification time of the directory entry itself
    pub last_modified: DateTime<Utc>,
}
