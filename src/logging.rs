use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `KEYSPRINT_LOG=debug`
pub const LOG_ENV: &str = "KEYSPRINT_LOG";

/// Send tracing output to `path`. The terminal is in raw mode while a test runs,
/// so nothing is written to stderr.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(io::Error::other)
}

/// One line for stderr when `init` fails, printed before raw mode starts
pub fn failure_notice(path: &Path, err: &io::Error) -> String {
    format!("keysprint: logging disabled, cannot write {}: {err}", path.display())
}
