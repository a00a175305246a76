//! Application configuration.
//!
//! # Responsibility
//! - Load `config.toml` into [`AppConfig`].
//! - Apply `MDNOTE_*` environment overrides on top of file values.
//!
//! # Invariants
//! - Precedence is defaults < file < environment; CLI flags are applied by
//!   the caller afterwards.
//! - A loaded config always carries a normalized log level.

use crate::editor::page::{Locale, Presentation};
use crate::logging::normalize_level;
use crate::markdown::style::Theme;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "MDNOTE_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "MDNOTE_LOG_LEVEL";
const DEFAULT_DB_FILE_NAME: &str = "mdnote.sqlite3";

/// Configuration load/validation failure.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// `[presentation]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub theme: Theme,
    pub locale: Locale,
}

impl PresentationConfig {
    pub fn resolve(&self) -> Presentation {
        Presentation::new(self.theme, self.locale)
    }
}

/// Effective application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Rolling log directory; logs go to stderr when unset.
    pub log_dir: Option<PathBuf>,
    pub presentation: PresentationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
            presentation: PresentationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads defaults, the optional config file, then process env overrides.
    ///
    /// # Errors
    /// - `Io` when `path` is given but cannot be read.
    /// - `Parse` when the file is not valid TOML for this schema.
    /// - `Invalid` when a value fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses one config file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Overrides values from `lookup` (normally the process environment).
    ///
    /// Blank values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(db_path) = non_blank(DB_PATH_ENV) {
            self.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = non_blank(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
    }

    /// Normalizes the log level and checks path values.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.log_level = normalize_level(&self.log_level)
            .map_err(ConfigError::Invalid)?
            .to_string();

        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("db_path cannot be empty".to_string()));
        }
        if let Some(log_dir) = self.log_dir.as_ref() {
            if !log_dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    log_dir.display()
                )));
            }
        }
        Ok(())
    }
}
