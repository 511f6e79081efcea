use std::fs::{self, File};
use std::io;
use std::path::Path;

use simplelog::{Config, LevelFilter, WriteLogger};

/// Routes `log` records to `path`; the terminal itself belongs to the game.
pub fn init(path: &Path, verbose: bool) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    WriteLogger::init(level, Config::default(), File::create(path)?).map_err(io::Error::other)
}
