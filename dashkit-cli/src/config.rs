//! `config.toml` loading.
//!
//! Every key is optional; missing keys take their defaults. Command-line
//! flags override whatever the file says.

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use dashkit_lib::chart::DEFAULT_CHART_HEIGHT;
use dashkit_lib::source::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::error::CliError;
use crate::paths;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base that relative chart source URLs resolve against.
    pub base_url: String,
    pub chart_height: u32,
    /// Per-request timeout for chart data. `0` disables it.
    pub timeout_secs: u64,
    pub log_level: String,
    /// `href` prefix of table rows.
    pub row_link: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chart_height: DEFAULT_CHART_HEIGHT,
            timeout_secs: 30,
            log_level: "info".to_string(),
            row_link: "/products/".to_string(),
        }
    }
}

impl Config {
    /// Load `explicit`, or the platform config file when `None`.
    ///
    /// A missing platform file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match paths::config_file() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents).map_err(|source| CliError::Config { path, source }),
            Err(e) if e.kind() == ErrorKind::NotFound && explicit.is_none() => Ok(Self::default()),
            Err(source) => Err(CliError::Io { path, source }),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Unknown level names fall back to `info`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
