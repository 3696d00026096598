use std::env;
use std::path::PathBuf;

use crate::logger::Severity;

/// Logger settings for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub name: String,
    pub level: Severity,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            name: "snafu".to_string(),
            level: Severity::Debug,
            file: None,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables:
    /// - `LOG_NAME`: name of the logger to set up
    /// - `LOG_LEVEL`: minimum severity (`debug`, `info`, `warning`, `error`, `critical`)
    /// - `LOG_FILE`: path of the log file; console only when unset or empty
    ///
    /// # Returns
    /// Returns `LogConfig` with values from environment variables or defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    ///
    /// An unparsable `LOG_LEVEL` falls back to the default level.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            name: var("LOG_NAME")
                .filter(|name| !name.is_empty())
                .unwrap_or(defaults.name),
            level: var("LOG_LEVEL")
                .and_then(|level| level.parse().ok())
                .unwrap_or(defaults.level),
            file: var("LOG_FILE")
                .filter(|file| !file.is_empty())
                .map(PathBuf::from)
                .or(defaults.file),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_from_vars() {
        let config = LogConfig::from_vars(lookup(&[
            ("LOG_NAME", "fly"),
            ("LOG_LEVEL", "warning"),
            ("LOG_FILE", "/tmp/fly.log"),
        ]));
        assert_eq!(config.name, "fly");
        assert_eq!(config.level, Severity::Warning);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/fly.log")));
    }

    #[test]
    fn test_config_defaults() {
        let config = LogConfig::from_vars(lookup(&[]));
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.level, Severity::Debug);
    }

    #[test]
    fn test_config_bad_level_falls_back() {
        let config = LogConfig::from_vars(lookup(&[("LOG_LEVEL", "loud"), ("LOG_FILE", "")]));
        assert_eq!(config.level, Severity::Debug);
        assert_eq!(config.file, None);
    }
}
