use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use jpegmarkers::logging::init_logger;
use jpegmarkers::{drive, Reporter};

/// Print every marker in a JPEG or raw Motion-JPEG file.
///
/// M-JPEG inside AVI or QuickTime containers isn't supported.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the JPEG or raw M-JPEG file to trace
    path: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let file = File::open(&args.path)
        .with_context(|| format!("Can't open input file {}", args.path.display()))?;
    let cursor = BufReader::new(file);

    let stdout = std::io::stdout();
    let frames = drive(cursor, Reporter::new(BufWriter::new(stdout.lock())))
        .with_context(|| format!("Failed to trace {}", args.path.display()))?;
    log::debug!("traced {} frame(s)", frames);

    Ok(())
}
