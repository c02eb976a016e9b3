pub const PROGRAM_NAME: &str = "dirstat";
pub const PROGRAM_LOG_LEVEL: &str = "DIRSTAT_LOG_LEVEL";
pub const PROGRAM_WORKERS: &str = "DIRSTAT_WORKERS";

/// Number of aggregation workers when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 8;

/// Capacity of the dispatch queue between discovery and the workers.
/// Discovery blocks once this many matched directories are waiting.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Worker count from `DIRSTAT_WORKERS`, falling back to [`DEFAULT_WORKERS`]
/// when unset, unparsable or zero.
pub fn workers_from_env() -> usize {
    std::env::var(PROGRAM_WORKERS)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_WORKERS)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
