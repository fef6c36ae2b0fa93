//! Logger setup shared by the command-line tools.

/// Initialize `env_logger` at `info`, or `debug` when `verbose` is set.
/// `RUST_LOG` still applies on top.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::from_default_env()
        .filter_level(level(verbose))
        .init();
}

fn level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}
