//! Integration tests for warden-config

use serde::Deserialize;
use std::env;
use std::io::Write;
use warden_config::*;

fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_toml_file() {
    let file = write_file(
        ".toml",
        r#"
        [http]
        timeout_secs = 12
        follow_redirects = false
        "#,
    );

    let manager = ConfigManager::new();
    manager.load_auto(file.path()).unwrap();

    assert_eq!(manager.get_int("http.timeout_secs").unwrap(), 12);
    assert!(!manager.get_bool("http.follow_redirects").unwrap());
}

#[test]
fn test_load_json_file() {
    let file = write_file(".json", r#"{"log": {"level": "debug"}}"#);

    let manager = ConfigManager::new();
    manager.load_file(file.path(), FileFormat::Json).unwrap();

    assert_eq!(manager.get_string("log.level").unwrap(), "debug");
}

#[test]
fn test_missing_file() {
    let manager = ConfigManager::new();
    let err = manager
        .load_file("/nonexistent/warden.toml", FileFormat::Toml)
        .unwrap_err();
    assert!(matches!(err, ConfigError::LoadError(_)));
}

#[test]
fn test_env_overrides_file() {
    let file = write_file(".toml", "[http]\ntimeout_secs = 12\n");

    unsafe {
        env::set_var("WARDEN_CFGTEST_HTTP_TIMEOUT_SECS", "3");
    }

    let manager = ConfigManager::with_prefix("WARDEN_CFGTEST");
    manager.load_auto(file.path()).unwrap();
    manager.load_env().unwrap();

    // the flattened env key shadows the nested file value
    assert_eq!(manager.get_int("http.timeout_secs").unwrap(), 3);
    assert_eq!(manager.get_int("http_timeout_secs").unwrap(), 3);

    unsafe {
        env::remove_var("WARDEN_CFGTEST_HTTP_TIMEOUT_SECS");
    }
}

#[test]
fn test_dotenv_file() {
    let file = write_file(".env", "WARDEN_DOTENV_USER_AGENT=probe/2.0\n");

    let manager = ConfigManager::with_prefix("WARDEN_DOTENV");
    manager.load_dotenv(Some(file.path())).unwrap();

    assert_eq!(manager.get_string("user_agent").unwrap(), "probe/2.0");

    unsafe {
        env::remove_var("WARDEN_DOTENV_USER_AGENT");
    }
}

#[derive(Debug, Deserialize)]
struct Probe {
    timeout_secs: u64,
}

impl Validate for Probe {
    fn validate(&self) -> Result<()> {
        ConfigValidator::in_range(self.timeout_secs, 1, 300, "timeout_secs")
    }
}

#[test]
fn test_load_validated() {
    let manager = ConfigManager::new();
    manager.set("timeout_secs", 30).unwrap();
    assert_eq!(manager.load_validated::<Probe>().unwrap().timeout_secs, 30);

    manager.set("timeout_secs", 0).unwrap();
    assert!(matches!(
        manager.load_validated::<Probe>(),
        Err(ConfigError::ValidationError(_))
    ));
}
