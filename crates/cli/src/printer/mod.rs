use std::{
    io::{self, Write},
    time::Duration,
};

use chrono::Local;
use dirstat_fs::{AggregateError, DirectoryRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Whether to print the trailing summary.
    pub show_summary: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: ColorChoice::Auto,
            show_summary: true,
        }
    }
}

/// Totals reported once all records are printed.
#[derive(Debug, Clone, Copy)]
pub struct ScanSummary {
    pub records: usize,
    pub failed: usize,
    pub total_bytes: u64,
    pub elapsed: Duration,
}

/// Sink for scan results. Records go to the output stream, failures and the
/// summary to the error stream.
pub trait RecordPrinter {
    fn print_record(&mut self, record: &DirectoryRecord) -> io::Result<()>;

    fn print_error(&mut self, err: &AggregateError) -> io::Result<()>;

    fn finish(&mut self, summary: &ScanSummary) -> io::Result<()>;
}

/// Binary-prefixed size, e.g. `1.5 KiB`. Plain bytes below 1 KiB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// Auto color resolves to no color for arbitrary writers.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;

        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn format_path(&self, record: &DirectoryRecord) -> String {
        let path = record.path.display();
        if self.use_color {
            format!("\x1b[32m{path}\x1b[0m")
        } else {
            path.to_string()
        }
    }
}

impl HumanPrinter<io::Stdout, io::Stderr> {
    /// Printer on stdout/stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> Self {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            use_color,
            ..HumanPrinter::new(io::stdout(), io::stderr(), cfg)
        }
    }
}

impl<W: Write, E: Write> RecordPrinter for HumanPrinter<W, E> {
    fn print_record(&mut self, record: &DirectoryRecord) -> io::Result<()> {
        let modified = record
            .last_modified
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");
        let path = self.format_path(record);

        writeln!(
            self.out,
            "{:>10}  {:>8} files  {:>6} dirs  {}  {}",
            format_size(record.size_bytes),
            record.file_count,
            record.subdir_count,
            modified,
            path
        )
    }

    fn print_error(&mut self, err: &AggregateError) -> io::Result<()> {
        writeln!(self.err, "[error] {err}")
    }

    fn finish(&mut self, summary: &ScanSummary) -> io::Result<()> {
        if !self.cfg.show_summary {
            return Ok(());
        }

        write!(
            self.err,
            "\n[scan] {} directories, {} total in {:.2}ms",
            summary.records,
            format_size(summary.total_bytes),
            summary.elapsed.as_secs_f64() * 1000.0,
        )?;
        if summary.failed > 0 {
            write!(self.err, " ({} failed)", summary.failed)?;
        }
        writeln!(self.err)
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl JsonPrinter<io::Stdout, io::Stderr> {
    pub fn stdout(cfg: PrinterConfig) -> Self {
        JsonPrinter::new(io::stdout(), io::stderr(), cfg)
    }
}

impl<W: Write, E: Write> RecordPrinter for JsonPrinter<W, E> {
    fn print_record(&mut self, record: &DirectoryRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)
    }

    fn print_error(&mut self, err: &AggregateError) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "error",
            "path": err.path().display().to_string(),
            "error": err.to_string(),
        });
        writeln!(self.err, "{}", obj)
    }

    fn finish(&mut self, summary: &ScanSummary) -> io::Result<()> {
        if !self.cfg.show_summary {
            return Ok(());
        }

        let obj = serde_json::json!({
            "type": "summary",
            "records": summary.records,
            "failed": summary.failed,
            "total_bytes": summary.total_bytes,
            "elapsed_ms": summary.elapsed.as_secs_f64() * 1000.0,
        });
        writeln!(self.err, "{}", obj)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
