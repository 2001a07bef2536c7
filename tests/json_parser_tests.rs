//! JSON format tests

use multiconf::{ConfigError, ConfigParser, JsonParser};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::{TempDir, tempdir};

const SERVICE_CONFIG: &str = r#"{
    "a": 5,
    "b": "hello",
    "c": "10s",
    "ratio": 7.9,
    "enabled": true,
    "nothing": null,
    "hosts": ["a", "b"],
    "limits": {"max": 10}
}"#;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("service.json");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn loaded(content: &str) -> (TempDir, JsonParser) {
    let (dir, path) = write_config(content);
    let mut parser = JsonParser::new();
    parser.set_file(&path).unwrap();
    parser.load_config().unwrap();
    (dir, parser)
}

#[test]
fn test_typed_lookups() {
    let (_dir, parser) = loaded(SERVICE_CONFIG);

    assert_eq!(parser.int("a").unwrap(), 5);
    assert_eq!(parser.string("b").unwrap(), "hello");
    assert_eq!(parser.duration("c").unwrap(), Duration::from_secs(10));
    assert_eq!(parser.int("ratio").unwrap(), 7);
}

#[test]
fn test_type_mismatches() {
    let (_dir, parser) = loaded(SERVICE_CONFIG);

    assert!(matches!(
        parser.int("b").unwrap_err(),
        ConfigError::InvalidIntConfig { .. }
    ));
    assert!(matches!(
        parser.string("a").unwrap_err(),
        ConfigError::InvalidStringConfig { .. }
    ));
    assert!(matches!(
        parser.duration("a").unwrap_err(),
        ConfigError::InvalidDateConfig { .. }
    ));
    assert!(matches!(
        parser.duration("b").unwrap_err(),
        ConfigError::InvalidDateConfig { .. }
    ));

    for key in ["enabled", "nothing", "hosts", "limits"] {
        assert!(matches!(
            parser.int(key).unwrap_err(),
            ConfigError::InvalidIntConfig { .. }
        ));
        assert!(matches!(
            parser.string(key).unwrap_err(),
            ConfigError::InvalidStringConfig { .. }
        ));
    }
}

#[test]
fn test_missing_keys() {
    let (_dir, parser) = loaded(SERVICE_CONFIG);

    assert!(matches!(
        parser.int("zzz").unwrap_err(),
        ConfigError::ConfigDoesNotExist { .. }
    ));
    assert!(matches!(
        parser.string("zzz").unwrap_err(),
        ConfigError::ConfigDoesNotExist { .. }
    ));
    assert!(matches!(
        parser.duration("zzz").unwrap_err(),
        ConfigError::ConfigDoesNotExist { .. }
    ));
}

#[test]
fn test_defaults_swallow_every_lookup_error() {
    let (_dir, parser) = loaded(SERVICE_CONFIG);
    let fallback = Duration::from_millis(100);

    assert_eq!(parser.int_default("a", 1), 5);
    assert_eq!(parser.int_default("b", 1), 1);
    assert_eq!(parser.int_default("zzz", 1), 1);

    assert_eq!(parser.string_default("b", "x"), "hello");
    assert_eq!(parser.string_default("a", "x"), "x");
    assert_eq!(parser.string_default("zzz", "x"), "x");

    assert_eq!(parser.duration_default("c", fallback), Duration::from_secs(10));
    assert_eq!(parser.duration_default("a", fallback), fallback);
    assert_eq!(parser.duration_default("zzz", fallback), fallback);
}

#[test]
fn test_nested_keys_are_top_level_only() {
    let (_dir, parser) = loaded(SERVICE_CONFIG);

    assert!(parser.contains("limits"));
    assert!(!parser.contains("max"));
    assert!(!parser.contains("limits.max"));
}

#[test]
fn test_missing_file_fails_on_load() {
    let dir = tempdir().unwrap();
    let mut parser = JsonParser::new();

    parser
        .set_file(&dir.path().join("does-not-exist.json"))
        .unwrap();
    assert!(matches!(
        parser.load_config().unwrap_err(),
        ConfigError::FileReadFailed { .. }
    ));
}

#[test]
fn test_invalid_documents() {
    for content in ["[1, 2, 3]", "not json", "{\"a\": 1,}", "\"just a string\""] {
        let (_dir, path) = write_config(content);
        let mut parser = JsonParser::new();
        parser.set_file(&path).unwrap();

        assert!(
            matches!(
                parser.load_config().unwrap_err(),
                ConfigError::InvalidFormat { .. }
            ),
            "{content:?} should be rejected"
        );
    }
}

#[test]
fn test_failed_reload_clears_mapping() {
    let (_dir, path) = write_config(r#"{"a": 1}"#);
    let mut parser = JsonParser::new();
    parser.set_file(&path).unwrap();
    parser.load_config().unwrap();
    assert!(parser.contains("a"));

    fs::write(&path, "{").unwrap();
    assert!(parser.load_config().is_err());
    assert!(parser.keys().is_empty());
}

#[test]
fn test_invalid_utf8_is_a_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("service.json");
    fs::write(&path, b"{\"a\": \"\xff\xfe\"}").unwrap();

    let mut parser = JsonParser::new();
    parser.set_file(&path).unwrap();
    assert!(matches!(
        parser.load_config().unwrap_err(),
        ConfigError::InvalidFormat { .. }
    ));
}
