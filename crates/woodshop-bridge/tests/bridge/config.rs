//! Config files on disk

use tempfile::TempDir;
use woodshop_bridge::{BridgeConfig, ConfigError};

#[test]
fn test_toml_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("bridge.toml");
    let config = BridgeConfig {
        host: "192.168.1.20".to_string(),
        port: 9000,
        auth_secret: "s3cret".to_string(),
        ..Default::default()
    };
    config.save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("port = 9000"));
    assert_eq!(BridgeConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bridge.json");
    std::fs::write(&path, r#"{"port": 7000, "timeout_secs": 3.5}"#).unwrap();

    let config = BridgeConfig::load_from_file(&path).unwrap();
    assert_eq!(config.port, 7000);
    assert_eq!(config.timeout_secs, 3.5);
    assert_eq!(config.max_retries, 2);
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bridge.toml");
    std::fs::write(&path, "timeout_secs = 0.0\n").unwrap();
    assert!(matches!(
        BridgeConfig::load_from_file(&path),
        Err(ConfigError::InvalidSetting { key: "timeout_secs", .. })
    ));
}

#[test]
fn test_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bridge.yaml");
    std::fs::write(&path, "port: 1\n").unwrap();
    assert!(matches!(
        BridgeConfig::load_from_file(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
    assert!(BridgeConfig::default().save_to_file(&path).is_err());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = BridgeConfig::load_or_default(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
