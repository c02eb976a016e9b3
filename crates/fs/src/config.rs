use dirstat_runtime::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS, workers_from_env};

/// Tuning knobs for [`scan_with`](crate::scan_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Number of aggregation worker threads.
    pub workers: usize,
    /// How many matched directories may wait for a worker before discovery blocks.
    pub queue_capacity: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl ScanOptions {
    /// Defaults, with the worker count taken from `DIRSTAT_WORKERS` when set.
    pub fn from_env() -> Self {
        Self {
            workers: workers_from_env(),
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
