//! Logging bridge for glyphmint
//!
//! Routes every `log::info!()` / `log::warn!()` etc. from all workspace
//! crates to stderr, and optionally to a log file, as
//! `[timestamp] [LEVEL] [target] message`.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the
//! configuration file (applied after the config has been loaded).

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use glyphmint_config::LogLevel;
use log::{LevelFilter, Log, Metadata, Record};

struct BridgeLogger {
    file: Mutex<Option<File>>,
    stderr: Mutex<()>,
    /// Level came from the CLI or `RUST_LOG`; config must not override it.
    pinned: AtomicBool,
}

impl BridgeLogger {
    fn write_line(&self, line: &str) {
        {
            let _guard = self.stderr.lock();
            let _ = std::io::stderr().write_all(line.as_bytes());
        }
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

impl Log for BridgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_line(&format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(ref mut file) = *self.file.lock() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<BridgeLogger> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn rust_log_level() -> Option<LevelFilter> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|val| val.trim().parse::<LevelFilter>().ok())
}

/// Install the bridge as the global `log` backend.
///
/// Safe to call more than once; later calls only adjust the level.
pub fn init_log_bridge(cli_level: Option<LogLevel>, log_file: Option<&Path>) {
    let (level, pinned) = match (cli_level, rust_log_level()) {
        (Some(level), _) => (level.to_level_filter(), true),
        (None, Some(filter)) => (filter, true),
        (None, None) => (LogLevel::default().to_level_filter(), false),
    };

    let file = log_file.and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("glyphmint: cannot open log file {}: {e}", path.display()))
            .ok()
    });

    let logger = LOGGER.get_or_init(|| BridgeLogger {
        file: Mutex::new(None),
        stderr: Mutex::new(()),
        pinned: AtomicBool::new(false),
    });
    if file.is_some() {
        *logger.file.lock() = file;
    }
    logger.pinned.store(pinned, Ordering::Relaxed);

    // Fails only if another logger is already installed.
    let _ = log::set_logger(logger);
    log::set_max_level(level);
}

/// Apply the configured level unless the CLI or `RUST_LOG` already chose one.
pub fn apply_config_level(level: LogLevel) {
    let pinned = LOGGER
        .get()
        .is_some_and(|logger| logger.pinned.load(Ordering::Relaxed));
    if !pinned {
        log::set_max_level(level.to_level_filter());
    }
}
