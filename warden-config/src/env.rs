// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Environment variable loader.
///
/// With a prefix, only `PREFIX_*` variables are picked up and the prefix is
/// stripped: `WARDEN_HTTP_TIMEOUT_SECS` becomes `http_timeout_secs`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Collect variables into lowercase keys
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.collect(env::vars()))
    }

    pub(crate) fn collect<I>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                let key = match &self.prefix {
                    Some(prefix) => key
                        .strip_prefix(prefix.as_str())
                        .and_then(|rest| rest.strip_prefix('_'))
                        .filter(|rest| !rest.is_empty())?
                        .to_string(),
                    None => key,
                };
                Some((key.to_lowercase(), value))
            })
            .collect()
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = if let Some(ref prefix) = self.prefix {
            format!("{}_{}", prefix, key.to_uppercase())
        } else {
            key.to_uppercase()
        };

        env::var(&full_key).map_err(ConfigError::EnvError)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_prefix_is_stripped() {
        let loader = EnvLoader::new(Some("WARDEN".to_string()));
        let loaded = loader.collect(vars(&[
            ("WARDEN_HTTP_TIMEOUT_SECS", "5"),
            ("WARDEN_LOG_FORMAT", "compact"),
            ("WARDENX_OTHER", "skip"),
            ("WARDEN_", "skip"),
            ("PATH", "/usr/bin"),
        ]));

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["http_timeout_secs"], "5");
        assert_eq!(loaded["log_format"], "compact");
    }

    #[test]
    fn test_without_prefix_everything_is_kept() {
        let loader = EnvLoader::default();
        let loaded = loader.collect(vars(&[("HOME", "/root"), ("Mixed_Case", "x")]));
        assert_eq!(loaded["home"], "/root");
        assert_eq!(loaded["mixed_case"], "x");
    }

    #[test]
    fn test_env_loader_with_default() {
        let loader = EnvLoader::new(Some("WARDEN_TEST".to_string()));
        let value = loader.load_var_or("NONEXISTENT_VAR_12345", "default");

        assert_eq!(value, "default");
    }
}
