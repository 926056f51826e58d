//! Command-line configuration. The library itself is never persisted, so the
//! only setting worth exposing is where diagnostic logs go.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".personal-library";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "library.log";

/// Personal Library - keep track of the books you own and have read
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Write logs to this file instead of ~/.personal-library/library.log
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The log destination, falling back to the per-user default.
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => default_log_path(),
        }
    }
}

/// Resolve the default log file inside the user's home.
pub fn default_log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
