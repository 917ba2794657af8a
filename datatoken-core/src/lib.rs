//! Core shared library for the datatoken utility.
//!
//! This crate exposes the primitives the timestamp and JSON store modules
//! depend on: the common error type, configuration loading, JSON helpers
//! and logging setup.

pub mod config;
pub mod errors;
pub mod logging;
pub mod serde_utils;

pub use config::DataTokenConfig;
pub use errors::{DataTokenError, Result as CoreResult};
