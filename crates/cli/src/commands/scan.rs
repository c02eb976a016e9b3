use std::{cmp::Reverse, ffi::OsString, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, ValueEnum};
use dirstat_fs::{DirectoryRecord, ScanOptions, ScanReport, scan_with};
use log::{Level, error, info};

use crate::printer::{
    ColorChoice, HumanPrinter, JsonPrinter, OutputFormat, PrinterConfig, RecordPrinter,
    ScanSummary,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Lexicographic by path
    #[default]
    Path,
    /// Largest total size first
    Size,
    /// Most files first
    Files,
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output records as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn config(&self) -> PrinterConfig {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        PrinterConfig {
            format,
            color,
            show_summary: !self.quiet,
        }
    }

    /// Create a stdout/stderr printer based on the output options.
    pub fn make_printer(&self) -> Box<dyn RecordPrinter> {
        let cfg = self.config();
        match cfg.format {
            OutputFormat::Human => Box::new(HumanPrinter::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::stdout(cfg)),
        }
    }
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan
    pub path: PathBuf,

    /// Directory names to aggregate; every directory when omitted
    pub keywords: Vec<OsString>,

    /// Number of aggregation workers (default: $DIRSTAT_WORKERS or 8)
    #[arg(long, short = 'j', value_name = "N")]
    pub workers: Option<usize>,

    /// Output order; scan order itself is not deterministic
    #[arg(long, value_enum, default_value_t = SortKey::Path)]
    pub sort: SortKey,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl ScanArgs {
    /// Explicit log level from `-v` flags, if any were given.
    pub fn log_level(&self) -> Option<Level> {
        match self.verbose {
            0 => None,
            1 => Some(Level::Info),
            2 => Some(Level::Debug),
            _ => Some(Level::Trace),
        }
    }

    fn options(&self) -> ScanOptions {
        let opts = ScanOptions::from_env();
        match self.workers {
            Some(n) => opts.with_workers(n),
            None => opts,
        }
    }
}

/// Whether every matched directory produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Complete,
    Partial,
}

impl From<ScanStatus> for ExitCode {
    fn from(status: ScanStatus) -> Self {
        match status {
            ScanStatus::Complete => ExitCode::SUCCESS,
            ScanStatus::Partial => ExitCode::from(1),
        }
    }
}

pub fn run(args: ScanArgs) -> ExitCode {
    let mut printer = args.output.make_printer();

    match execute(&args, printer.as_mut()) {
        Ok(status) => status.into(),
        Err(e) => {
            error!("[scan] {e:#}");
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Scan and print. Fatal scan errors are returned; aggregation failures are
/// printed and reported as [`ScanStatus::Partial`].
fn execute(args: &ScanArgs, printer: &mut dyn RecordPrinter) -> Result<ScanStatus> {
    let started = Instant::now();

    let ScanReport {
        mut records,
        errors,
    } = scan_with(&args.path, &args.keywords, &args.options())
        .with_context(|| format!("scan of {} failed", args.path.display()))?;

    sort_records(&mut records, args.sort);

    for record in &records {
        printer.print_record(record)?;
    }
    for err in &errors {
        printer.print_error(err)?;
    }

    let summary = ScanSummary {
        records: records.len(),
        failed: errors.len(),
        total_bytes: records.iter().map(|r| r.size_bytes).sum(),
        elapsed: started.elapsed(),
    };
    info!(
        "[scan] {} records, {} failures in {:?}",
        summary.records, summary.failed, summary.elapsed
    );
    printer.finish(&summary)?;

    if errors.is_empty() {
        Ok(ScanStatus::Complete)
    } else {
        Ok(ScanStatus::Partial)
    }
}

fn sort_records(records: &mut [DirectoryRecord], key: SortKey) {
    match key {
        SortKey::Path => records.sort_by(|a, b| a.path.cmp(&b.path)),
        SortKey::Size => records.sort_by(|a, b| {
            Reverse(a.size_bytes)
                .cmp(&Reverse(b.size_bytes))
                .then_with(|| a.path.cmp(&b.path))
        }),
        SortKey::Files => records.sort_by(|a, b| {
            Reverse(a.file_count)
                .cmp(&Reverse(b.file_count))
                .then_with(|| a.path.cmp(&b.path))
        }),
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
