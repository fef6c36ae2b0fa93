use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use jpegmarkers::logging::init_logger;
use jpegmarkers::{index_path, FrameIndex};

/// Copy one frame out of a raw Motion-JPEG file using its index.
///
/// The index must have been built with mjpg_index.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the raw M-JPEG file
    path: PathBuf,

    /// Zero-based number of the frame to extract
    frame: usize,

    /// Write the frame to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

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

    let index_file = index_path(&args.path);
    let index = File::open(&index_file)
        .with_context(|| format!("Can't open index file {}", index_file.display()))?;
    let index = FrameIndex::read_from(BufReader::new(index))
        .with_context(|| format!("Invalid index file {}", index_file.display()))?;

    let mut input = File::open(&args.path)
        .with_context(|| format!("Can't open input file {}", args.path.display()))?;
    let source_len = input.metadata()?.len();
    index
        .validate(source_len)
        .with_context(|| format!("{} doesn't match {}", index_file.display(), args.path.display()))?;

    let copied = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Can't create output file {}", path.display()))?;
            index.copy_frame(&mut input, source_len, args.frame, &mut BufWriter::new(file))?
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            index.copy_frame(&mut input, source_len, args.frame, &mut out)?
        }
    };
    log::info!("copied frame {} ({} bytes)", args.frame, copied);

    Ok(())
}
