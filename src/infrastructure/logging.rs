use crate::infrastructure::Settings;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Installs a file-backed tracing subscriber.
///
/// The terminal belongs to the UI, so events go to `<data_dir>/tasklist.log`
/// only. When the log file cannot be opened, a single line goes to stderr
/// (the terminal is not taken over yet) and events are dropped.
pub fn init_logging(settings: &Settings) {
    if let Err(e) = fs::create_dir_all(&settings.data_dir) {
        eprintln!(
            "tasklist: logging disabled, cannot create {}: {e}",
            settings.data_dir.display()
        );
        return;
    }
    let log_path = settings.log_path();
    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("tasklist: logging disabled, cannot open {}: {e}", log_path.display());
            return;
        }
    };

    let filter =
        EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    tracing::info!(path = %log_path.display(), "tracing initialized");
}
