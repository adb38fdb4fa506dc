//! Runtime configuration for the wiki core.
//!
//! # Responsibility
//! - Describe seed content for the root page and logging preferences.
//! - Load configuration from JSON with defaults for every missing field.
//!
//! # Invariants
//! - An empty JSON object yields the same values as `WikiConfig::default()`.

use crate::logging::default_log_level;
use crate::store::page_store::{DEFAULT_ROOT_CONTENT, DEFAULT_ROOT_TITLE};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config content is not valid JSON for `WikiConfig`.
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Wiki core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Title of the seeded root page.
    pub root_title: String,
    /// Content of the seeded root page.
    pub root_content: String,
    /// Log level; `None` falls back to `default_log_level()`.
    pub log_level: Option<String>,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            root_title: DEFAULT_ROOT_TITLE.to_string(),
            root_content: DEFAULT_ROOT_CONTENT.to_string(),
            log_level: None,
            log_dir: None,
        }
    }
}

impl WikiConfig {
    /// Parses configuration from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Effective log level.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}
