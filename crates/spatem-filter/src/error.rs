//! Error types for the spatem-filter crate.
//!
//! Filtering itself is total: constructing a filter and deciding on a
//! record never fail. The only fallible step is turning raw JSON text
//! into a configuration.

use thiserror::Error;

/// Errors that can occur while reading a filter configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration text was not valid JSON.
    #[error("Invalid configuration JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ConfigError>;
