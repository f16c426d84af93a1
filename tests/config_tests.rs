//! Tests for configuration loading

use gettogether::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_yaml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_yaml(
        r#"
cipher:
  key: "0123456789abcdef0123456789abcdef"
  mode: gcm
paging:
  default_page_size: 25
  max_page_size: 50
  default_sort_by: created
log_filter: "gettogether=debug"
"#,
    );

    let config = CoreConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.cipher.mode, CipherMode::Gcm);
    assert_eq!(config.paging.default_page_size, 25);
    assert_eq!(config.paging.max_page_size, 50);
    assert_eq!(config.paging.default_sort_by, "created");
    assert_eq!(config.log_filter, "gettogether=debug");
    assert!(FieldCipher::from_config(&config.cipher).is_ok());
}

#[test]
fn test_missing_sections_fall_back_to_defaults() {
    let file = write_yaml("paging:\n  max_page_size: 20\n");

    let config = CoreConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.cipher.mode, CipherMode::Ecb);
    assert!(config.cipher.key.is_none());
    assert_eq!(config.paging.default_page_size, 10);
    assert_eq!(config.paging.max_page_size, 20);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    assert!(CoreConfig::from_yaml_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_bad_mode_in_file_is_an_error() {
    let file = write_yaml("cipher:\n  mode: cbc\n");
    assert!(CoreConfig::from_yaml_file(file.path().to_str().unwrap()).is_err());
}

#[test]
fn test_env_style_overrides_win_over_file() {
    let file = write_yaml("cipher:\n  mode: gcm\nlog_filter: warn\n");
    let config = CoreConfig::from_yaml_file(file.path().to_str().unwrap())
        .unwrap()
        .with_overrides(|name| match name {
            "GETTOGETHER_CIPHER_MODE" => Some("ecb".to_string()),
            "GETTOGETHER_LOG" => Some("debug".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.cipher.mode, CipherMode::Ecb);
    assert_eq!(config.log_filter, "debug");
}

#[test]
fn test_paging_config_drives_requests() {
    let config = CoreConfig::from_yaml_str("paging:\n  default_page_size: 3\n").unwrap();
    let request = PageParams::default()
        .into_request(&config.paging)
        .unwrap();
    assert_eq!(request.size, 3);
}

#[test]
fn test_debug_redacts_key() {
    let config = CoreConfig::from_yaml_str("cipher:\n  key: topsecretkeymaterial\n").unwrap();
    assert!(!format!("{:?}", config).contains("topsecretkeymaterial"));
}
