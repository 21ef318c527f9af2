//! Debug log output for par-canvas.
//!
//! Installs a `log` backend that writes every record to
//! `/tmp/par_canvas_debug.log` on Unix/macOS or `%TEMP%\par_canvas_debug.log`
//! on Windows. Keeping output out of stdout lets `par-canvas replay` print
//! clean JSON. Records are mirrored to stderr when `RUST_LOG` is set.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

/// File name of the debug log inside the temp directory
pub const LOG_FILE_NAME: &str = "par_canvas_debug.log";

/// Global debug logger
struct DebugLogger {
    file: Mutex<Option<File>>,
    mirror_to_stderr: bool,
}

impl Log for DebugLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            Local::now().format("%H:%M:%S%.6f"),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_to_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<DebugLogger> = OnceLock::new();

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Level from `RUST_LOG`, when set to a plain level name
fn env_level() -> Option<LevelFilter> {
    std::env::var("RUST_LOG").ok()?.trim().parse().ok()
}

/// Install the log bridge.
///
/// `level` comes from the command line and wins over `RUST_LOG`; callers
/// fall back to the config `log_level` by passing it here when no flag was
/// given. Calling this more than once only adjusts the max level.
pub fn init_log_bridge(level: Option<LevelFilter>) {
    let level = level.or_else(env_level).unwrap_or(LevelFilter::Info);

    let logger = LOGGER.get_or_init(|| {
        // Silently run without a file if it can't be opened
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        DebugLogger {
            file: Mutex::new(file),
            mirror_to_stderr: std::env::var_os("RUST_LOG").is_some(),
        }
    });

    if log::set_logger(logger).is_ok() {
        log::info!(
            "par-canvas debug session started at {} (level={})",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level
        );
    }
    log::set_max_level(level);
}

/// Apply the config `log_level` unless the command line or `RUST_LOG`
/// already chose a level
pub fn apply_config_level(cli_level: Option<LevelFilter>, config_level: LevelFilter) {
    if cli_level.is_none() && env_level().is_none() {
        log::set_max_level(config_level);
    }
}
