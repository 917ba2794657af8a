use std::io;

use thiserror::Error;

/// Result type used across the datatoken crates.
pub type Result<T> = std::result::Result<T, DataTokenError>;

/// Canonical error representation shared by every module.
#[derive(Debug, Error)]
pub enum DataTokenError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot parse timestamp {input:?}: {reason}")]
    TimestampParse { input: String, reason: String },

    #[error("required field missing: {0}")]
    MissingField(String),

    #[error("invalid range {start:?}..{end:?}: {reason}")]
    InvalidRange {
        start: String,
        end: String,
        reason: String,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl DataTokenError {
    pub fn timestamp_parse(input: &str, reason: impl Into<String>) -> Self {
        DataTokenError::TimestampParse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Malformed timestamp text, a missing record field or invalid JSON content.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DataTokenError::TimestampParse { .. }
                | DataTokenError::MissingField(_)
                | DataTokenError::Deserialization(_)
        )
    }

    pub fn is_io_error(&self) -> bool {
        matches!(self, DataTokenError::Io(_))
    }
}

impl From<serde_json::Error> for DataTokenError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return DataTokenError::Io(err.into());
        }
        DataTokenError::Deserialization(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {key}: {value:?}")]
    InvalidEnvVar { key: String, value: String },

    #[error("environment variable {key} is not valid unicode")]
    NotUnicode { key: String },
}

impl From<ConfigError> for DataTokenError {
    fn from(value: ConfigError) -> Self {
        DataTokenError::Config(value.to_string())
    }
}
