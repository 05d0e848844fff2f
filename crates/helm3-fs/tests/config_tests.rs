use helm3_fs::{ConfigStore, Error, NormalizedPath};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.yaml");
    fs::write(&file_path, "name: test\ncount: 42").unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config.name, "test");
    assert_eq!(config.count, 42);
}

#[test]
fn test_load_empty_yaml_is_default() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.yaml");
    fs::write(&file_path, "\n").unwrap();

    let config: TestConfig = ConfigStore::new()
        .load(&NormalizedPath::new(&file_path))
        .unwrap();

    assert_eq!(config, TestConfig::default());
}

#[test]
fn test_save_yaml_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("mixins/helm3/config.yaml");
    let store = ConfigStore::new();
    let config = TestConfig {
        name: "saved".into(),
        count: 7,
    };

    store.save(&path, &config).unwrap();

    assert!(path.to_native().is_file());
    let loaded: TestConfig = store.load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_save_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("config.yaml");
    ConfigStore::new()
        .save(&path, &TestConfig::default())
        .unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["config.yaml".to_string()]);
}

#[test]
fn test_load_invalid_yaml_reports_path() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.yaml");
    fs::write(&file_path, "name: [unterminated").unwrap();

    let err = ConfigStore::new()
        .load::<TestConfig>(&NormalizedPath::new(&file_path))
        .unwrap_err();

    assert!(matches!(err, Error::ConfigParse { .. }));
    assert!(err.to_string().contains("config.yaml"));
}

#[test]
fn test_save_writes_yaml_regardless_of_extension() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path()).join("config");
    let config = TestConfig {
        name: "plain".into(),
        count: 3,
    };

    ConfigStore::new().save(&path, &config).unwrap();

    let written = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(written, "name: plain\ncount: 3\n");
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = ConfigStore::new()
        .load::<TestConfig>(&NormalizedPath::new(temp.path()).join("missing.yaml"))
        .unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}
