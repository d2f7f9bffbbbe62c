#![forbid(unsafe_code)]

//! Treasure Map terminal binary entry point.

use std::path::Path;

use treasure_tui::{app, cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = opts.page.validate() {
        eprintln!("Invalid options: {e}");
        std::process::exit(1);
    }

    if let Some(path) = opts.log_file.as_deref()
        && let Err(e) = logging::init_file(Path::new(path))
    {
        eprintln!("Failed to open log file {path}: {e}");
        std::process::exit(1);
    }

    if let Err(e) = app::run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
