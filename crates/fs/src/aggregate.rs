use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use log::trace;

use crate::{error::AggregateError, record::DirectoryRecord, walker::plain_walk};

#[derive(Debug, Default)]
struct Totals {
    size_bytes: u64,
    file_count: u64,
    subdir_count: u64,
}

/// Walk the whole subtree under `path` and summarize it.
///
/// The directory itself is visited first (depth 0) and is never counted as
/// one of its own subdirectories. Only regular files contribute to size and
/// file count; symlinks are neither followed nor counted. Any error aborts
/// the aggregation, so a returned record always reflects a complete walk.
pub fn aggregate(path: &Path) -> Result<DirectoryRecord, AggregateError> {
    let stat_err = |source| AggregateError::Stat {
        path: path.to_path_buf(),
        source,
    };
    let walk_err = |source| AggregateError::Walk {
        path: path.to_path_buf(),
        source,
    };

    let meta = fs::metadata(path).map_err(stat_err)?;
    let last_modified: DateTime<Utc> = meta.modified().map_err(stat_err)?.into();

    let mut totals = Totals::default();

    for entry in plain_walk(path) {
        let entry = entry.map_err(walk_err)?;

        if entry.depth() == 0 {
            continue;
        }

        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            totals.subdir_count += 1;
        } else if file_type.is_file() {
            let meta = entry.metadata().map_err(walk_err)?;
            totals.size_bytes += meta.len();
            totals.file_count += 1;
        }
    }

    trace!("[aggregate] {:?}: {:?}", path, totals);

    Ok(DirectoryRecord {
        path: path.to_path_buf(),
        size_bytes: totals.size_bytes,
        file_count: totals.file_count,
        subdir_count: totals.subdir_count,
        last_modified,
    })
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
