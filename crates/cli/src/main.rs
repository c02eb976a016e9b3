use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::ScanArgs;
use dirstat_runtime::{PROGRAM_NAME, logging};

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Size, file and subdirectory counts for matching directories"
)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.scan.log_level() {
        Some(level) => logging::init_with_level(level).ok(),
        None => logging::init().ok(),
    };

    commands::scan::run(cli.scan)
}
