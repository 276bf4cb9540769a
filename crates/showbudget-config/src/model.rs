use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// User preferences for the budget shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory holding saved budgets. Defaults to `<app home>/budgets`.
    pub data_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory for exported snapshot and report files. Defaults to the documents folder.
    pub export_dir: Option<PathBuf>,

    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,

    #[serde(default = "Config::default_color_enabled")]
    pub color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_loaded_snapshot: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_dir: None,
            log_filter: Self::default_log_filter(),
            color_enabled: Self::default_color_enabled(),
            last_loaded_snapshot: None,
        }
    }
}

impl Config {
    pub fn default_log_filter() -> String {
        "showbudget=info".into()
    }

    pub fn default_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, app_home: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => app_home.join("budgets"),
        }
    }

    pub fn resolve_export_dir(&self) -> PathBuf {
        if let Some(path) = &self.export_dir {
            return path.clone();
        }
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Rejects configured directories that exist but are regular files.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.data_dir, &self.export_dir].into_iter().flatten() {
            if path.exists() && !path.is_dir() {
                return Err(ConfigError::NotADirectory(path.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str("{}").expect("parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter, "showbudget=info");
    }

    #[test]
    fn data_dir_falls_back_to_app_home() {
        let config = Config::default();
        assert_eq!(
            config.resolve_data_dir(Path::new("/tmp/home")),
            PathBuf::from("/tmp/home/budgets")
        );
        let custom = Config {
            data_dir: Some(PathBuf::from("/srv/budgets")),
            ..Config::default()
        };
        assert_eq!(
            custom.resolve_data_dir(Path::new("/tmp/home")),
            PathBuf::from("/srv/budgets")
        );
    }
}
