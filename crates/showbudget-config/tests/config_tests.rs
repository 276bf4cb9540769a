use std::fs;
use std::path::PathBuf;

use showbudget_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn missing_config_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = manager.load().expect("load defaults");
    assert_eq!(cfg, Config::default());
    assert!(cfg.color_enabled);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("home")).expect("manager");

    let cfg = Config {
        data_dir: Some(dir.path().join("budgets")),
        log_filter: "showbudget=debug".into(),
        color_enabled: false,
        last_loaded_snapshot: Some("3f2c".into()),
        ..Config::default()
    };
    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(manager.config_path(), dir.path().join("home").join("config.json"));
    assert!(!dir.path().join("home").join("config.json.tmp").exists());
}

#[test]
fn file_in_place_of_data_dir_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("not-a-dir");
    fs::write(&file, "x").expect("file");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let cfg = Config {
        data_dir: Some(file.clone()),
        ..Config::default()
    };
    let err = manager.save(&cfg).expect_err("invalid data dir");
    assert!(matches!(err, ConfigError::NotADirectory(path) if path == PathBuf::from(&file)));
}

#[test]
fn corrupt_config_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{ nope").expect("write");

    let err = ConfigManager::new(path).load().expect_err("corrupt");
    assert!(matches!(err, ConfigError::Serde(_)));
}
