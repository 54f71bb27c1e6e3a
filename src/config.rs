//! Service configuration loaded from a TOML file.
//!
//! Every key has a default, so a partial file (or no file at all) is valid.
//! The file path is taken from `WEATHER_CONFIG` when set, falling back to
//! `weather.toml` in the working directory.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::ingest::CsvLayout;
use crate::logging::{self, Component, LogLevel};

pub const DEFAULT_CONFIG_PATH: &str = "weather.toml";
pub const CONFIG_PATH_ENV: &str = "WEATHER_CONFIG";

// ============================================================================
// Config Structures
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ingest: IngestConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Text file listing one data file per line.
    pub source_list: PathBuf,
    /// Whether the first non-empty line of each data file is a header.
    pub skip_header: bool,
    pub layout: CsvLayout,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_list: PathBuf::from("data/data_source.txt"),
            skip_header: true,
            layout: CsvLayout::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output: PathBuf,
    pub json_output: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("WindTempSolar.csv"),
            json_output: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: None,
            timestamps: false,
        }
    }
}

impl LoggingConfig {
    pub fn init(&self) {
        logging::init_logger(self.level, self.file.as_deref(), self.timestamps);
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: std::io::Error },
    Parse { path: String, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "Failed to read config {}: {}", path, source),
            ConfigError::Parse { path, source } => write!(f, "Invalid config {}: {}", path, source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl Config {
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        if !path.exists() {
            logging::debug(Component::Config, Some(&origin), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: origin.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &origin)
    }

    /// Resolve the config path from the environment (after reading `.env`)
    /// and load it.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(Path::new(&path))
    }
}
