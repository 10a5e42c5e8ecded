use std::path::PathBuf;

use dashkit_lib::{ComponentError, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid JSON in {what}: {source}")]
    Json {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("Invalid date {0:?}, expected YYYY-MM-DD or an RFC 3339 instant")]
    InvalidDate(String),

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl From<dashkit_lib::Error> for CliError {
    fn from(error: dashkit_lib::Error) -> Self {
        match error {
            dashkit_lib::Error::Component(e) => Self::Component(e),
            dashkit_lib::Error::Fetch(e) => Self::Fetch(e),
        }
    }
}
