//! log4rs setup for applications embedding the decomposer.

use crate::config::Settings;
use crate::error::ConfigError;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONSOLE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Console-only log4rs config at the given level.
pub fn console_config(settings: &Settings) -> Result<Config, ConfigError> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(settings.log_level))
        .map_err(|e| ConfigError::Logging(e.to_string()))
}

/// Start log4rs from the configured file, or on the console when none is set.
///
/// Fails if the file cannot be read or a logger is already installed.
pub fn init_logging(settings: &Settings) -> Result<(), ConfigError> {
    match &settings.log_config {
        Some(path) => {
            log4rs::init_file(path, Default::default())
                .map_err(|e| ConfigError::Logging(format!("{}: {e}", path.display())))?;
        }
        None => {
            log4rs::init_config(console_config(settings)?)
                .map_err(|e| ConfigError::Logging(e.to_string()))?;
        }
    }
    log::info!("#Start logging at {}", settings.log_level);
    Ok(())
}
