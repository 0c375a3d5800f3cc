//! Unified logging for vistext.
//!
//! Every `log::` record goes to `vistext_debug.log` in the temp directory
//! (`/tmp` on Unix/macOS, `%TEMP%` on Windows). When `RUST_LOG` is set the
//! records are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then the
//! config file's `log_level`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use vistext_config::LogLevel;

struct FileLogger {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Location of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp/vistext_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("vistext_debug.log");
    path
}

/// Pick the effective level from the three sources.
///
/// A `RUST_LOG` value that is not a plain level name (e.g. a per-module
/// filter) counts as `info`.
pub fn resolve_level(
    cli: Option<LogLevel>,
    rust_log: Option<&str>,
    config: LogLevel,
) -> LevelFilter {
    if let Some(level) = cli {
        return level.to_level_filter();
    }
    if let Some(value) = rust_log.filter(|v| !v.trim().is_empty()) {
        return LevelFilter::from_str(value.trim()).unwrap_or(LevelFilter::Info);
    }
    config.to_level_filter()
}

/// Install the logger. Safe to call more than once; later calls only adjust
/// the level.
pub fn init_log_bridge(cli: Option<LogLevel>, config: LogLevel) -> LevelFilter {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli, rust_log.as_deref(), config);

    let logger = LOGGER.get_or_init(|| {
        let file = if level == LevelFilter::Off {
            None
        } else {
            // An unwritable log file only disables file output.
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok()
        };
        FileLogger {
            file: Mutex::new(file),
            mirror_stderr: rust_log.is_some(),
        }
    });
    // Already installed on a repeat call.
    let _ = log::set_logger(logger);
    log::set_max_level(level);
    level
}
