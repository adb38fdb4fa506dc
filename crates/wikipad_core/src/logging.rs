//! Rolling file logging for the wiki core.
//!
//! # Responsibility
//! - Start the file logger at most once per process.
//! - Record panics as one-line log events.
//!
//! # Invariants
//! - Repeated init with an identical `LoggingConfig` succeeds silently.
//! - Init with any other config is refused, never applied.
//! - Log lines carry ids and counters only, never page titles or content.

use crate::config::WikiConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "wikipad";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;
const PANIC_MESSAGE_LIMIT: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Log verbosity accepted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a level name, case-insensitively. `warning` is accepted.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unsupported log level `{other}`; expected trace|debug|info|warn|error"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated logging parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Absolute directory receiving `wikipad*.log` files.
    pub log_dir: PathBuf,
}

impl LoggingConfig {
    /// Validates raw level and directory strings.
    ///
    /// # Errors
    /// - Unknown level name.
    /// - Blank or relative directory.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = LogLevel::parse(level)?;
        let log_dir = log_dir.trim();
        if log_dir.is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        let log_dir = PathBuf::from(log_dir);
        if !log_dir.is_absolute() {
            return Err(format!(
                "log_dir must be an absolute path, got `{}`",
                log_dir.display()
            ));
        }
        Ok(Self { level, log_dir })
    }

    fn conflict_with(&self, requested: &Self) -> Option<String> {
        if self.log_dir != requested.log_dir {
            return Some(format!(
                "logging already writes to `{}`; refusing to switch to `{}`",
                self.log_dir.display(),
                requested.log_dir.display()
            ));
        }
        if self.level != requested.level {
            return Some(format!(
                "logging already runs at `{}`; refusing to switch to `{}`",
                self.level, requested.level
            ));
        }
        None
    }
}

struct ActiveLogger {
    config: LoggingConfig,
    _handle: LoggerHandle,
}

/// Starts rolling file logging under `log_dir`.
///
/// # Errors
/// - Invalid level or directory (see `LoggingConfig::new`).
/// - Logging is already active with another config.
/// - The directory cannot be created or the backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LoggingConfig::new(level, log_dir)?;
    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(requested.clone()))?;
    match active.config.conflict_with(&requested) {
        Some(conflict) => Err(conflict),
        None => Ok(()),
    }
}

/// Starts logging from configuration.
///
/// Returns `Ok(false)` when the config has no log directory.
pub fn init_logging_from_config(config: &WikiConfig) -> Result<bool, String> {
    let Some(log_dir) = config.log_dir.as_deref() else {
        return Ok(false);
    };
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
    init_logging(config.effective_log_level(), log_dir)?;
    Ok(true)
}

/// Returns `(level, log_dir)` when logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.config.level.as_str(), active.config.log_dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        LogLevel::Debug.as_str()
    } else {
        LogLevel::Info.as_str()
    }
}

fn start_logger(config: LoggingConfig) -> Result<ActiveLogger, String> {
    let dir: &Path = config.log_dir.as_path();
    std::fs::create_dir_all(dir)
        .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

    let handle = Logger::try_with_str(config.level.as_str())
        .map_err(|err| format!("invalid log spec `{}`: {err}", config.level))?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("logger backend failed to start: {err}"))?;

    if PANIC_HOOK.set(()).is_ok() {
        install_panic_hook();
    }

    info!(
        "event=logging_start module=core status=ok platform={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        config.level,
        dir.display()
    );

    Ok(ActiveLogger {
        config,
        _handle: handle,
    })
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            panic_message(panic_info.payload())
        );
        previous(panic_info);
    }));
}

/// One-line, length-capped panic message.
///
/// Payloads may echo page text, so control characters are blanked and the
/// result is capped at `PANIC_MESSAGE_LIMIT` chars.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    let borrowed: Option<&str> = payload.downcast_ref::<&str>().copied();
    let raw = borrowed
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    one_line(raw, PANIC_MESSAGE_LIMIT)
}

fn one_line(value: &str, limit: usize) -> String {
    let mut chars = value
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch });
    let mut line = chars.by_ref().take(limit).collect::<String>();
    if chars.next().is_some() {
        line.push_str("...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, init_logging_from_config, logging_status, one_line, panic_message,
        LogLevel, LoggingConfig,
    };
    use crate::config::WikiConfig;

    #[test]
    fn level_parse_accepts_case_and_aliases() {
        assert_eq!(LogLevel::parse("INFO"), Ok(LogLevel::Info));
        assert_eq!(LogLevel::parse(" warning "), Ok(LogLevel::Warn));
        assert!(LogLevel::parse("verbose").is_err());
    }

    #[test]
    fn logging_config_rejects_relative_or_blank_dir() {
        let error = LoggingConfig::new("info", "logs/dev").expect_err("relative dir");
        assert!(error.contains("absolute"));
        assert!(LoggingConfig::new("info", "  ").is_err());
    }

    #[test]
    fn one_line_blanks_control_chars_and_caps_length() {
        assert_eq!(one_line("a\nb\rc\td", 10), "a b c d");
        assert_eq!(one_line("abcdefgh", 3), "abc...");
        assert_eq!(one_line("abc", 3), "abc");
    }

    #[test]
    fn panic_message_handles_each_payload_kind() {
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("boom\nnow"));
        assert_eq!(panic_message(owned.as_ref()), "boom now");
        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn config_without_log_dir_skips_logging() {
        let started = init_logging_from_config(&WikiConfig::default())
            .expect("missing log_dir is not an error");
        assert!(!started);
    }

    #[test]
    fn init_is_idempotent_and_rejects_reconfiguration() {
        let first = tempfile::tempdir().expect("temp dir should be created");
        let second = tempfile::tempdir().expect("temp dir should be created");
        let first_dir = first.path().join("logs");
        let first_str = first_dir.to_str().expect("temp dir should be UTF-8");
        let second_str = second.path().to_str().expect("temp dir should be UTF-8");

        init_logging("info", first_str).expect("first init should succeed");
        init_logging("INFO", first_str).expect("same config should be idempotent");

        let level_error = init_logging("debug", first_str).expect_err("level conflict");
        assert!(level_error.contains("refusing to switch"));
        let dir_error = init_logging("info", second_str).expect_err("directory conflict");
        assert!(dir_error.contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(dir, first_dir);
    }
}
