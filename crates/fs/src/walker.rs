use std::{
    ffi::OsStr,
    fs,
    path::{self, Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use crossbeam::channel::{self, Receiver, Sender};
use ignore::{Walk, WalkBuilder};
use log::{debug, error, trace, warn};

use crate::{
    aggregate::aggregate,
    config::ScanOptions,
    error::{AggregateError, ScanError},
    matcher::MatchCriterion,
    record::DirectoryRecord,
    report::ScanReport,
};

type Outcome = Result<DirectoryRecord, AggregateError>;

/// Sequential walk over every entry under `root`, root included.
///
/// No ignore files, no hidden-file filtering, symlinks are not followed.
pub(crate) fn plain_walk(root: &Path) -> Walk {
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build()
}

/// Scan `root` with the default options.
///
/// See [`scan_with`].
pub fn scan<P, I, S>(root: P, keywords: I) -> Result<ScanReport, ScanError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    scan_with(root, keywords, &ScanOptions::default())
}

/// Find every directory under `root` (root included) whose name is one of
/// `keywords`, or every directory when `keywords` is empty, and aggregate
/// each one on a pool of worker threads.
///
/// Matched directories are still descended into, so nested matches get their
/// own records. A discovery failure is fatal and discards all results; a
/// failed aggregation only lands in [`ScanReport::errors`]. Every worker has
/// finished by the time this returns.
pub fn scan_with<P, I, S>(
    root: P,
    keywords: I,
    opts: &ScanOptions,
) -> Result<ScanReport, ScanError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let root = validate_root(root.as_ref())?;
    let criterion = MatchCriterion::new(keywords);
    let workers = opts.workers.max(1);

    debug!(
        "[scan] {:?}: {} keyword(s), {} workers, queue capacity {}",
        root,
        criterion.len(),
        workers,
        opts.queue_capacity
    );

    let (work_tx, work_rx) = channel::bounded::<PathBuf>(opts.queue_capacity.max(1));
    let (result_tx, result_rx) = channel::unbounded::<Outcome>();
    let aborted = AtomicBool::new(false);

    let (discovered, report) = thread::scope(|s| {
        for _ in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let aborted = &aborted;

            s.spawn(move || worker_loop(work_rx, result_tx, aborted));
        }
        // Workers hold the only copies now, so the result channel closes
        // once the last of them exits.
        drop(work_rx);
        drop(result_tx);

        let discovery = {
            let root = root.as_path();
            let criterion = &criterion;
            let aborted = &aborted;

            s.spawn(move || {
                let res = discover(root, criterion, &work_tx);
                if res.is_err() {
                    aborted.store(true, Ordering::Release);
                }
                res
            })
        };

        let report = collect(result_rx);
        let discovered = discovery
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));

        (discovered, report)
    });

    match discovered {
        Ok(dispatched) => {
            debug!(
                "[scan] {:?}: {} dispatched, {} aggregated, {} failed",
                root,
                dispatched,
                report.records.len(),
                report.errors.len()
            );
            Ok(report)
        }
        Err(source) => {
            error!("[scan] discovery walk of {:?} failed: {source}", root);
            Err(ScanError::Discovery { root, source })
        }
    }
}

/// Stat the root and return it as an absolute path.
fn validate_root(root: &Path) -> Result<PathBuf, ScanError> {
    let invalid = |source| ScanError::InvalidRoot {
        path: root.to_path_buf(),
        source,
    };

    let meta = fs::metadata(root).map_err(invalid)?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    path::absolute(root).map_err(invalid)
}

/// Walk the tree once and queue every matching directory.
///
/// Blocks only when the work queue is full. Stops at the first walk error.
fn discover(
    root: &Path,
    criterion: &MatchCriterion,
    work_tx: &Sender<PathBuf>,
) -> Result<usize, ignore::Error> {
    let mut dispatched = 0;

    for entry in plain_walk(root) {
        let entry = entry?;

        // The root was stat'ed through symlinks in `validate_root`, so it is a
        // directory even when the entry itself is a link.
        let is_dir = entry.depth() == 0 || entry.file_type().is_some_and(|ft| ft.is_dir());
        if !is_dir || !criterion.matches(entry.file_name()) {
            continue;
        }

        trace!("[discover] dispatching {:?}", entry.path());
        if work_tx.send(entry.into_path()).is_err() {
            // Every worker is gone; nothing left to hand work to.
            warn!("[discover] work queue closed early");
            break;
        }
        dispatched += 1;
    }

    Ok(dispatched)
}

/// Pull directories off the queue and aggregate them until the queue closes.
///
/// Once discovery has failed, the remaining queued paths are drained without
/// being aggregated.
fn worker_loop(work_rx: Receiver<PathBuf>, result_tx: Sender<Outcome>, aborted: &AtomicBool) {
    for dir in work_rx {
        if aborted.load(Ordering::Acquire) {
            continue;
        }

        if result_tx.send(aggregate(&dir)).is_err() {
            return;
        }
    }
}

/// Single owner of the result lists. Returns once every worker has exited.
fn collect(result_rx: Receiver<Outcome>) -> ScanReport {
    let mut report = ScanReport::default();

    for outcome in result_rx {
        match outcome {
            Ok(record) => {
                trace!("[collect] {:?}", record.path);
                report.records.push(record);
            }
            Err(e) => {
                warn!("[collect] {e}");
                report.errors.push(e);
            }
        }
    }

    report
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
