use crate::{
    error::{ErrorList, PartialScan},
    record::DirectoryRecord,
};

/// Outcome of a scan whose discovery walk completed.
///
/// `records` are in completion order, which varies between runs. `errors`
/// holds every matched directory that failed to aggregate.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub records: Vec<DirectoryRecord>,
    pub errors: ErrorList,
}

impl ScanReport {
    /// True when every dispatched directory produced a record.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self) -> Option<&ErrorList> {
        (!self.errors.is_empty()).then_some(&self.errors)
    }

    /// Records on a complete scan, otherwise the records and failures together.
    pub fn into_result(self) -> Result<Vec<DirectoryRecord>, PartialScan> {
        if self.errors.is_empty() {
            Ok(self.records)
        } else {
            Err(PartialScan {
                records: self.records,
                errors: self.errors,
            })
        }
    }
}
