//! Runtime settings read from the environment.

use crate::error::ConfigError;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable naming a log4rs YAML config file.
pub const LOG_CONFIG_VAR: &str = "CIDR_RANGE_LOG_CONFIG";
/// Environment variable holding the console log level.
pub const LOG_LEVEL_VAR: &str = "CIDR_RANGE_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// log4rs config file; console logging is used when unset.
    pub log_config: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_config: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read settings from the environment.
    pub fn from_env() -> Result<Settings, ConfigError> {
        dotenv::dotenv().ok();
        Settings::from_vars(
            std::env::var(LOG_CONFIG_VAR).ok().as_deref(),
            std::env::var(LOG_LEVEL_VAR).ok().as_deref(),
        )
    }

    fn from_vars(
        log_config: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Settings, ConfigError> {
        let log_level = match log_level.map(str::trim) {
            None | Some("") => LevelFilter::Info,
            Some(level) => LevelFilter::from_str(level)
                .map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))?,
        };
        Ok(Settings {
            log_config: log_config
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_level,
        })
    }
}
