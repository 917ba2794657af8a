use std::env;
use std::path::PathBuf;

use crate::errors::{ConfigError, DataTokenError};

pub const DEFAULT_DATA_FILE: &str = "data.json";
pub const DEFAULT_TIME_START: &str = "2023-09-01_0000_00";
pub const DEFAULT_TIME_END: &str = "2024-09-01_0000_00";
pub const DEFAULT_LOOKUP_FIELD: &str = "time_start";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings for a demonstration run.
///
/// Defaults reproduce the stock demonstration; every field can be
/// overridden from the environment and, in the binary, from flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTokenConfig {
    pub data_file: PathBuf,
    pub time_start: String,
    pub time_end: String,
    pub lookup_field: String,
    pub seed: Option<u64>,
    pub atomic_writes: bool,
    pub log_level: String,
}

impl Default for DataTokenConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            time_start: DEFAULT_TIME_START.to_string(),
            time_end: DEFAULT_TIME_END.to_string(),
            lookup_field: DEFAULT_LOOKUP_FIELD.to_string(),
            seed: None,
            atomic_writes: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl DataTokenConfig {
    /// Loads configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_with_prefix("DATATOKEN_")
    }

    /// Loads configuration from env vars prefixed with the provided value.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(|suffix| {
            let key = format!("{}{}", prefix, suffix);
            match env::var(&key) {
                Ok(value) => Ok(Some(value)),
                Err(env::VarError::NotPresent) => Ok(None),
                Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { key }),
            }
        })
        .map_err(|err| match err {
            ConfigError::InvalidEnvVar { key, value } => ConfigError::InvalidEnvVar {
                key: format!("{}{}", prefix, key),
                value,
            },
            other => other,
        })
    }

    /// Builds a configuration from an arbitrary key lookup. Keys are passed
    /// without prefix (`FILE`, `TIME_START`, ...).
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Result<Option<String>, ConfigError>,
    {
        let mut cfg = Self::default();

        if let Some(file) = lookup("FILE")? {
            cfg.data_file = PathBuf::from(file);
        }
        if let Some(start) = lookup("TIME_START")? {
            cfg.time_start = start;
        }
        if let Some(end) = lookup("TIME_END")? {
            cfg.time_end = end;
        }
        if let Some(field) = lookup("LOOKUP_FIELD")? {
            cfg.lookup_field = field;
        }
        if let Some(raw) = lookup("SEED")? {
            let seed = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvVar {
                key: "SEED".into(),
                value: raw.clone(),
            })?;
            cfg.seed = Some(seed);
        }
        if let Some(raw) = lookup("ATOMIC_WRITES")? {
            cfg.atomic_writes = parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                key: "ATOMIC_WRITES".into(),
                value: raw.clone(),
            })?;
        }
        if let Some(level) = lookup("LOG")? {
            cfg.log_level = level;
        }

        Ok(cfg)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Helper that loads config and converts to the canonical error type.
pub fn load_config() -> Result<DataTokenConfig, DataTokenError> {
    Ok(DataTokenConfig::from_env()?)
}
