//! Settings read from the process environment.
//!
//! Kept to a single test so no other thread in this binary sees the
//! variables change.

use cidr_range::config::{Settings, LOG_CONFIG_VAR, LOG_LEVEL_VAR};
use cidr_range::ConfigError;
use log::LevelFilter;
use std::env;
use std::path::PathBuf;

#[test]
fn test_settings_from_env() {
    env::remove_var(LOG_CONFIG_VAR);
    env::remove_var(LOG_LEVEL_VAR);
    assert_eq!(Settings::from_env().unwrap(), Settings::default());

    env::set_var(LOG_LEVEL_VAR, "trace");
    env::set_var(LOG_CONFIG_VAR, "log4rs.yml");
    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.log_level, LevelFilter::Trace);
    assert_eq!(settings.log_config, Some(PathBuf::from("log4rs.yml")));

    env::set_var(LOG_LEVEL_VAR, "chatty");
    assert_eq!(
        Settings::from_env(),
        Err(ConfigError::InvalidLogLevel("chatty".to_string()))
    );

    env::remove_var(LOG_CONFIG_VAR);
    env::remove_var(LOG_LEVEL_VAR);
}
