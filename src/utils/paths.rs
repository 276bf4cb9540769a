use dirs::home_dir;
use std::{env, path::PathBuf};

use showbudget_config::{Config, ConfigError, ConfigManager};

const DEFAULT_DIR_NAME: &str = ".showbudget";
const HOME_VAR: &str = "SHOWBUDGET_HOME";

/// Returns the application data directory, `$SHOWBUDGET_HOME` or `~/.showbudget`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_VAR) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_manager() -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(app_data_dir())
}

/// Directory holding saved budgets for `config`.
pub fn budgets_dir(config: &Config) -> PathBuf {
    config.resolve_data_dir(&app_data_dir())
}

/// Log directives from the stored configuration, or the defaults when it cannot be read.
pub fn configured_log_filter() -> String {
    config_manager()
        .and_then(|manager| manager.load())
        .map(|config| config.log_filter)
        .unwrap_or_else(|_| super::DEFAULT_LOG_FILTER.to_string())
}
