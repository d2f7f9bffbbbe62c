#![forbid(unsafe_code)]

//! File logging.
//!
//! The terminal belongs to the page, so logs only go to a file named by
//! `TREASURE_MAP_LOG`. `RUST_LOG` filters as usual; the default level is
//! `info`.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber writing to `path`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_file(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    Ok(())
}
