//! Runtime settings.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables and command-line flags (clap resolves those two).

use crate::domain::DateFormatter;
use crate::domain::DEFAULT_DATE_FORMAT;
use crate::infrastructure::FileStore;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "todoData";
pub const LOG_FILE_NAME: &str = "tasklist.log";

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "A task list for the terminal")]
pub struct Cli {
    /// Directory holding the snapshot and the log file
    #[arg(long, env = "TASKLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage key the snapshot is saved under
    #[arg(long, env = "TASKLIST_KEY")]
    pub key: Option<String>,

    /// strftime pattern for creation dates
    #[arg(long)]
    pub date_format: Option<String>,

    /// Settings file (defaults to the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `tasklist=trace`
    #[arg(long, env = "TASKLIST_LOG")]
    pub log: Option<String>,

    /// Shorthand for `--log debug`
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid date format `{0}`")]
    InvalidDateFormat(String),
    #[error("storage key must not be empty")]
    EmptyStorageKey,
    #[error("invalid storage key `{0}`: use letters, digits, `-`, `_` or `.`")]
    InvalidStorageKey(String),
}

/// Contents of `config.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub data_dir: Option<PathBuf>,
    pub storage_key: Option<String>,
    pub date_format: Option<String>,
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub date_format: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("tasklist"))
        .unwrap_or_else(|| PathBuf::from(".tasklist"))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasklist").join("config.toml"))
}

impl Settings {
    /// Resolves settings from every layer and validates the result.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => Some(read_file_settings(path)?),
            None => match default_config_path() {
                Some(path) => read_optional_file_settings(&path)?,
                None => None,
            },
        };

        let mut settings = Settings::default();
        if let Some(file) = file {
            settings.apply_file(file);
        }
        settings.apply_cli(cli);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_file(&mut self, file: FileSettings) {
        if let Some(v) = file.data_dir {
            self.data_dir = v;
        }
        if let Some(v) = file.storage_key {
            self.storage_key = v;
        }
        if let Some(v) = file.date_format {
            self.date_format = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = &cli.data_dir {
            self.data_dir = v.clone();
        }
        if let Some(v) = &cli.key {
            self.storage_key = v.clone();
        }
        if let Some(v) = &cli.date_format {
            self.date_format = v.clone();
        }
        if let Some(v) = &cli.log {
            self.log_filter = v.clone();
        }
        if cli.verbose {
            self.log_filter = "debug".to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if FileStore::validate_key(&self.storage_key).is_err() {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }
        if !DateFormatter::is_valid_pattern(&self.date_format) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        Ok(())
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

fn read_file_settings(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file_settings(path, &raw)
}

fn read_optional_file_settings(path: &Path) -> Result<Option<FileSettings>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(raw) => parse_file_settings(path, &raw).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_file_settings(path: &Path, raw: &str) -> Result<FileSettings, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
