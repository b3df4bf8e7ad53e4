//! Environment-gated logging.
//!
//! stdout belongs to the menu, so development logs go to a file through a
//! `tracing` subscriber. In production nothing is installed and the
//! [`Logger`] collaborator short-circuits before building any event.

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Default log file name, placed in the system temp dir.
pub const LOG_FILE_NAME: &str = "weather-menu.log";

/// Deployment environment. Logging is silent in `Prod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Dev,
    Prod,
}

/// Default path of the development log.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Install the file subscriber for `Dev`. A no-op in `Prod`.
///
/// `RUST_LOG` overrides the default `debug` level. Installing twice keeps
/// the first subscriber.
pub fn init_tracing(env: Env, path: &Path) -> io::Result<()> {
    if env == Env::Prod {
        return Ok(());
    }

    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Logging collaborator: single messages or indexed collections.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    env: Env,
}

impl Logger {
    pub fn new(env: Env) -> Self {
        Logger { env }
    }

    pub fn log(&self, message: &str) {
        if self.env == Env::Prod {
            return;
        }
        tracing::info!("LOG: {}", message);
    }

    /// Log every item on its own line, prefixed with its index.
    pub fn log_collection<T: Display>(&self, items: &[T]) {
        if self.env == Env::Prod {
            return;
        }
        for (i, item) in items.iter().enumerate() {
            tracing::info!("LOG COLLECTION: EL NO. {}. {}", i, item);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture_with(f: impl FnOnce()) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        capture.text()
    }

    #[test]
    fn dev_logger_writes_message() {
        let out = capture_with(|| Logger::new(Env::Dev).log("screen changed"));
        assert!(out.contains("LOG: screen changed"), "got: {out}");
    }

    #[test]
    fn dev_logger_indexes_collection_items() {
        let out = capture_with(|| Logger::new(Env::Dev).log_collection(&["alpha", "beta"]));
        assert!(out.contains("EL NO. 0. alpha"));
        assert!(out.contains("EL NO. 1. beta"));
    }

    #[test]
    fn prod_logger_is_silent() {
        let out = capture_with(|| {
            let logger = Logger::new(Env::Prod);
            logger.log("hidden");
            logger.log_collection(&[1, 2, 3]);
        });
        assert!(out.is_empty(), "got: {out}");
    }

    #[test]
    fn prod_init_does_not_create_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(LOG_FILE_NAME);
        init_tracing(Env::Prod, &path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn default_log_path_is_in_temp_dir() {
        let path = default_log_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with(LOG_FILE_NAME));
    }
}
