mod aggregate;
mod config;
mod error;
mod matcher;
mod record;
mod report;
mod walker;

pub use aggregate::aggregate;
pub use config::ScanOptions;
pub use error::{AggregateError, ErrorList, PartialScan, ScanError};
pub use matcher::MatchCriterion;
pub use record::DirectoryRecord;
pub use report::ScanReport;
pub use walker::{scan, scan_with};
