// Runtime configuration.
// Defaults, overlaid by an optional config.toml, then by environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{JournalError, Result};
use crate::paths;

pub const ENV_API_URL: &str = "JOURNAL_API_URL";
pub const ENV_STORAGE: &str = "JOURNAL_STORAGE";
pub const ENV_LOG: &str = "JOURNAL_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL every API path is joined onto.
    pub api_base_url: String,
    /// Per-request timeout. No timeout when unset.
    pub request_timeout_secs: Option<u64>,
    /// Storage file override. Defaults to the platform cache directory.
    pub storage_path: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `info` or `journal=debug`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: None,
            storage_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the platform config file (if present) and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match paths::config_path() {
            Some(path) if path.exists() => Self::from_path(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|e| JournalError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| JournalError::Config(e.to_string()))
    }

    /// Overlay environment variables, read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let set = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = set(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(path) = set(ENV_STORAGE) {
            self.storage_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = set(ENV_LOG) {
            self.log_filter = filter;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(JournalError::Config(format!(
                "api_base_url must start with http:// or https://, got {:?}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(JournalError::Config(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Where the storage file lives, if anywhere.
    pub fn resolved_storage_path(&self) -> Option<PathBuf> {
        self.storage_path.clone().or_else(paths::storage_path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            api_base_url = "https://journal.example.com/api"
            request_timeout_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://journal.example.com/api");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("api_url = \"x\"").unwrap_err();
        assert!(matches!(err, JournalError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"https://from-file\"").unwrap();
        writeln!(file, "log_filter = \"warn\"").unwrap();
        let mut config = Config::from_path(file.path()).unwrap();

        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://from-env"),
            (ENV_STORAGE, "/tmp/journal-store.json"),
            (ENV_LOG, "  "),
        ]
        .into_iter()
        .collect();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "https://from-env");
        assert_eq!(
            config.resolved_storage_path(),
            Some(PathBuf::from("/tmp/journal-store.json"))
        );
        // Blank values are ignored.
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            api_base_url: "localhost:8000".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
