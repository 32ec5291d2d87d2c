//! Core logging bootstrap.
//!
//! # Responsibility
//! - Initialize file-based rolling logs at most once per process.
//! - Emit metadata-only diagnostic events (counts and IDs, never item names).
//!
//! # Invariants
//! - Init is idempotent for an identical level and directory.
//! - Re-initialization with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "shoplist";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogConfig {
    level: &'static str,
    log_dir: PathBuf,
}

struct ActiveLogger {
    config: LogConfig,
    _handle: LoggerHandle,
}

/// Initializes rolling file logging under `log_dir` at `level`.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error`.
/// - `log_dir` is empty, relative, or cannot be created.
/// - Logging is already active with a different level or directory.
/// - The logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogConfig {
        level: parse_level(level)?,
        log_dir: parse_log_dir(log_dir)?,
    };
    let active = LOGGER.get_or_try_init(|| start_logger(requested.clone()))?;
    active.config.accepts(&requested)
}

/// Default level: `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

impl LogConfig {
    fn accepts(&self, requested: &LogConfig) -> Result<(), String> {
        if self == requested {
            return Ok(());
        }
        Err(format!(
            "logging already initialized with level `{}` at `{}`; refusing to switch to level `{}` at `{}`",
            self.level,
            self.log_dir.display(),
            requested.level,
            requested.log_dir.display()
        ))
    }
}

fn start_logger(config: LogConfig) -> Result<ActiveLogger, String> {
    let LogConfig { level, log_dir } = &config;
    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(*level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();
    info!(
        "event=logging_init module=core status=ok version={} platform={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        level,
        log_dir.display()
    );

    Ok(ActiveLogger {
        config,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    let lowered = level.trim().to_ascii_lowercase();
    let wanted = if lowered == "warning" { "warn" } else { lowered.as_str() };
    LEVELS
        .into_iter()
        .find(|known| *known == wanted)
        .ok_or_else(|| format!("unsupported log level `{lowered}`; expected {}", LEVELS.join("|")))
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(log_dir.trim());
    if path.as_os_str().is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    if path.is_relative() {
        return Err(format!("log_dir must be absolute, got `{}`", path.display()));
    }
    Ok(path)
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            one_line_summary(panic_info.payload(), MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

/// Flattens a panic payload to one bounded line; payloads may echo item names.
fn one_line_summary(payload: &(dyn Any + Send), max_chars: usize) -> String {
    let text = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    let mut chars = text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c });
    let mut summary: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        summary.push_str("...");
    }
    summary
}
