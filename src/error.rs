//! Error types shared across the crate

/// Errors raised while building or rendering a release report
#[derive(Debug, thiserror::Error)]
pub enum WhatupError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid version constraint '{constraint}': {source}")]
    Constraint {
        constraint: String,
        #[source]
        source: semver::Error,
    },

    #[error("invalid output formatter: '{0}'")]
    InvalidFormat(String),

    #[error("Failed to write report: {0}")]
    Output(String),
}

impl From<std::io::Error> for WhatupError {
    fn from(err: std::io::Error) -> Self {
        WhatupError::Output(err.to_string())
    }
}

/// Result type for report operations
pub type WhatupResult<T> = Result<T, WhatupError>;
