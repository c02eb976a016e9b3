use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::record::DirectoryRecord;

/// Fatal failures: the scan produced nothing usable.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root does not exist or cannot be stat'ed.
    #[error("invalid root {}: {source}", .path.display())]
    InvalidRoot { path: PathBuf, source: io::Error },

    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// The discovery walk could not list part of the tree, so the set of
    /// matches is incomplete.
    #[error("discovery walk of {} failed: {source}", .root.display())]
    Discovery {
        root: PathBuf,
        source: ignore::Error,
    },
}

/// One matched directory that could not be fully aggregated.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("{}: cannot stat directory: {source}", .path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("{}: walk failed: {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: ignore::Error,
    },
}

impl AggregateError {
    /// The dispatched directory whose aggregation failed.
    pub fn path(&self) -> &Path {
        match self {
            AggregateError::Stat { path, .. } | AggregateError::Walk { path, .. } => path,
        }
    }
}

/// Aggregation failures in the order they were collected.
#[derive(Debug, Default)]
pub struct ErrorList(Vec<AggregateError>);

impl ErrorList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AggregateError> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, err: AggregateError) {
        self.0.push(err);
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        writeln!(f, "{} errors occurred:", self.0.len())?;
        for err in &self.0 {
            writeln!(f, "\t- {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorList {}

impl IntoIterator for ErrorList {
    type Item = AggregateError;
    type IntoIter = std::vec::IntoIter<AggregateError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a AggregateError;
    type IntoIter = std::slice::Iter<'a, AggregateError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<AggregateError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = AggregateError>>(iter: I) -> Self {
        ErrorList(iter.into_iter().collect())
    }
}

/// Records that did aggregate, returned together with the failures of the
/// ones that did not.
#[derive(Debug, Error)]
#[error("{errors}")]
pub struct PartialScan {
    pub records: Vec<DirectoryRecord>,
    pub errors: ErrorList,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
