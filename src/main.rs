//! Binary entry point: parse the command line, route logs to a file (the
//! terminal belongs to the UI), open a session with an empty library and drive
//! the Ratatui event loop until the user exits.
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use personal_library::config::Cli;
use personal_library::{run_app, App, Library};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.log_path().and_then(|path| open_log_file(&path)) {
        Ok(file) => init_tracing(file),
        Err(err) => eprintln!("Logging disabled: {err:#}"),
    }

    info!(version = env!("CARGO_PKG_VERSION"), "starting session");
    let mut app = App::new(Library::new());
    let result = run_app(&mut app);
    info!(books = app.library().len(), "session ended");
    result
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

fn init_tracing(file: File) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
