// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while configuring or generating a city layout.
#[derive(Debug, Error)]
pub enum CityError {
    /// The footprint or side limits cannot produce a well-formed partition.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CityError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        CityError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CityError>;
