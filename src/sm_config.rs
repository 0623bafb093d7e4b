//! Configuration for a stability run

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;

use crate::sm_analyzer::PairMode;
use crate::sm_loader::MalformedLinePolicy;

/// Input file used when nothing else is given
pub const DEFAULT_INPUT: &str = "testesis.txt";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Verbosity for the process logger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Run configuration (all keys optional in YAML)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Snapshot file to load
    pub input_path: PathBuf,

    /// Handling of lines with non-integer tokens
    pub malformed_lines: MalformedLinePolicy,

    /// Pair enumeration for the analyzer
    pub pair_mode: PairMode,

    pub log_level: LogLevel,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            malformed_lines: MalformedLinePolicy::default(),
            pair_mode: PairMode::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl StabilityConfig {
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        // an empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: origin.clone(),
            source,
        })?;
        Self::from_yaml_str(&yaml, &origin)
    }
}
