use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use jpegmarkers::logging::init_logger;
use jpegmarkers::{drive, index_path, Indexer};

/// Build an index of all frames in a raw Motion-JPEG file.
///
/// The index is written next to the input with ".index" appended to its name,
/// replacing any existing file. A plain JPEG is indexed as a single frame.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the raw M-JPEG file to index
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

    let output = index_path(&args.path);

    let input = File::open(&args.path)
        .with_context(|| format!("Can't open input file {}", args.path.display()))?;
    let index = File::create(&output)
        .with_context(|| format!("Can't create index file {}", output.display()))?;

    let indexer = Indexer::new(BufWriter::new(index))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    let frames = drive(BufReader::new(input), indexer)
        .with_context(|| format!("Failed to index {}", args.path.display()))?;

    log::info!("wrote {} frame(s) to {}", frames, output.display());

    Ok(())
}
