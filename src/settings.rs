// Application settings loaded from a file and the environment

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use warden_config::{ConfigError, ConfigManager, ConfigValidator, Result, Validate};
use warden_http_client::{HttpClient, HttpClientConfig, HttpClientError, ProbeMethod};
use warden_log::{Format, Level, LogConfig};

/// Prefix of environment variables read by [`Settings::load`]
pub const ENV_PREFIX: &str = "WARDEN";

/// Reachability client settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    /// `None` leaves connects bounded only by `timeout_secs`
    pub connect_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    /// `get` or `head`
    pub method: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        let defaults = HttpClientConfig::default();
        Self {
            timeout_secs: defaults.timeout.as_secs(),
            connect_timeout_secs: defaults.connect_timeout.map(|d| d.as_secs()),
            user_agent: defaults.user_agent,
            follow_redirects: defaults.follow_redirects,
            max_redirects: defaults.max_redirects,
            method: "get".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        let defaults = LogConfig::default();
        Self {
            debug: defaults.debug,
            level: defaults.level,
            format: defaults.format,
            timestamps: defaults.timestamps,
        }
    }
}

/// Everything a host configures for validation.
///
/// ```toml
/// [http]
/// timeout_secs = 10
/// method = "head"
///
/// [log]
/// level = "debug"
/// format = "compact"
/// ```
///
/// Environment variables override the file: `WARDEN_HTTP_TIMEOUT_SECS=5`
/// replaces `http.timeout_secs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Read `path` (format picked from its extension), then `WARDEN_*`
    /// environment variables
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        manager.load_auto(path.as_ref())?;
        manager.load_env()?;
        tracing::debug!(path = %path.as_ref().display(), "loaded settings");
        Self::from_manager(&manager)
    }

    /// Read `WARDEN_*` environment variables only
    pub fn from_env() -> Result<Self> {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        manager.load_env()?;
        Self::from_manager(&manager)
    }

    /// Build from already loaded values. Missing keys keep their defaults.
    pub fn from_manager(manager: &ConfigManager) -> Result<Self> {
        let mut settings = Settings::default();
        let http = &mut settings.http;
        let log = &mut settings.log;

        override_with(manager, "http.timeout_secs", &mut http.timeout_secs)?;
        if let Some(secs) = manager.get_opt::<u64>("http.connect_timeout_secs")? {
            http.connect_timeout_secs = (secs > 0).then_some(secs);
        }
        override_with(manager, "http.user_agent", &mut http.user_agent)?;
        if let Some(follow) = flag(manager, "http.follow_redirects")? {
            http.follow_redirects = follow;
        }
        override_with(manager, "http.max_redirects", &mut http.max_redirects)?;
        override_with(manager, "http.method", &mut http.method)?;

        for key in ["debug", "log.debug"] {
            if let Some(debug) = flag(manager, key)? {
                log.debug = debug;
            }
        }
        if let Some(timestamps) = flag(manager, "log.timestamps")? {
            log.timestamps = timestamps;
        }
        if let Some(level) = manager.get_opt::<String>("log.level")? {
            log.level = level.parse().map_err(|e: warden_log::LogError| invalid("log.level", e))?;
        }
        if let Some(format) = manager.get_opt::<String>("log.format")? {
            log.format = format
                .parse()
                .map_err(|e: warden_log::LogError| invalid("log.format", e))?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Client configuration for reachability checks
    pub fn http_client_config(&self) -> HttpClientConfig {
        let method = if self.http.method.eq_ignore_ascii_case("head") {
            ProbeMethod::Head
        } else {
            ProbeMethod::Get
        };

        HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .connect_timeout(self.http.connect_timeout_secs.map(Duration::from_secs))
            .user_agent(self.http.user_agent.clone())
            .follow_redirects(self.http.follow_redirects)
            .max_redirects(self.http.max_redirects)
            .method(method)
            .build()
    }

    /// Build a client from [`Settings::http_client_config`]
    pub fn http_client(&self) -> std::result::Result<HttpClient, HttpClientError> {
        HttpClient::new(self.http_client_config())
    }

    /// Logging configuration
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            debug: self.log.debug,
            level: self.log.level,
            format: self.log.format,
            timestamps: self.log.timestamps,
            ..LogConfig::default()
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::in_range(self.http.timeout_secs, 1, 3600, "http.timeout_secs")?;
        ConfigValidator::in_range(self.http.max_redirects, 0, 50, "http.max_redirects")?;
        ConfigValidator::not_empty(&self.http.user_agent, "http.user_agent")?;
        ConfigValidator::one_of(&self.http.method, &["get", "head"], "http.method")
    }
}

fn override_with<T: DeserializeOwned>(
    manager: &ConfigManager,
    key: &str,
    target: &mut T,
) -> Result<()> {
    if let Some(value) = manager.get_opt(key)? {
        *target = value;
    }
    Ok(())
}

/// Booleans also accept `1`/`0`, `yes`/`no` and `on`/`off`
fn flag(manager: &ConfigManager, key: &str) -> Result<Option<bool>> {
    match manager.get_opt::<bool>(key) {
        Err(ConfigError::InvalidValue { .. }) => {
            let raw: String = manager.get(key)?;
            match raw.trim().to_lowercase().as_str() {
                "1" | "yes" | "on" => Ok(Some(true)),
                "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(invalid(key, format!("expected a boolean, got `{raw}`"))),
            }
        }
        other => other,
    }
}

fn invalid(key: &str, error: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_components() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.log_config(), LogConfig::default());

        let client = settings.http_client_config();
        let defaults = HttpClientConfig::default();
        assert_eq!(client.timeout, defaults.timeout);
        assert_eq!(client.connect_timeout, defaults.connect_timeout);
        assert_eq!(client.method, ProbeMethod::Get);
    }

    #[test]
    fn test_from_manager_nested_and_flat() {
        let manager = ConfigManager::new();
        manager
            .set("http", serde_json::json!({ "timeout_secs": 5, "method": "HEAD" }))
            .unwrap();
        manager.set("log_level", "warn").unwrap();
        manager.set("http_connect_timeout_secs", "0").unwrap();

        let settings = Settings::from_manager(&manager).unwrap();
        assert_eq!(settings.http.timeout_secs, 5);
        assert_eq!(settings.http.connect_timeout_secs, None);
        assert_eq!(settings.log.level, Level::Warn);

        let client = settings.http_client_config();
        assert_eq!(client.method, ProbeMethod::Head);
        assert_eq!(client.connect_timeout, None);
    }

    #[test]
    fn test_numeric_flags() {
        let manager = ConfigManager::new();
        manager.set("debug", "1").unwrap();
        manager.set("log_timestamps", "off").unwrap();
        manager.set("http_follow_redirects", false).unwrap();

        let settings = Settings::from_manager(&manager).unwrap();
        assert!(settings.log.debug);
        assert!(!settings.log.timestamps);
        assert!(!settings.http.follow_redirects);

        manager.set("debug", "maybe").unwrap();
        assert!(Settings::from_manager(&manager).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let manager = ConfigManager::new();
        manager.set("http_timeout_secs", 0).unwrap();
        assert!(matches!(
            Settings::from_manager(&manager),
            Err(ConfigError::ValidationError(_))
        ));

        let manager = ConfigManager::new();
        manager.set("log_format", "xml").unwrap();
        assert!(matches!(
            Settings::from_manager(&manager),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
