//! Process configuration read from `TRADEFLOW_*` environment variables.
//!
//! # Responsibility
//! - Choose the storage backend once at startup.
//! - Locate the database file and the optional log directory.
//!
//! # Invariants
//! - Unset variables fall back to defaults; set but invalid values are errors.
//! - Blank values are treated as unset.

use crate::logging::{default_log_level, normalize_level};
use crate::storage::BackendKind;
use std::path::PathBuf;

pub const ENV_BACKEND: &str = "TRADEFLOW_BACKEND";
pub const ENV_DB_PATH: &str = "TRADEFLOW_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TRADEFLOW_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TRADEFLOW_LOG_DIR";

/// Startup settings for the core and its smoke-check binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: BackendKind,
    /// Database file; `None` keeps everything in memory.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Absolute log directory; `None` leaves logging off.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    /// - Returns an error when the backend is not `local` or `remote`.
    /// - Returns an error when the log level is unsupported.
    /// - Returns an error when the log directory is not absolute.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = read(ENV_BACKEND) {
            config.backend = BackendKind::parse(&raw).ok_or_else(|| {
                format!("unsupported backend `{raw}` in {ENV_BACKEND}; expected local|remote")
            })?;
        }

        config.db_path = read(ENV_DB_PATH).map(PathBuf::from);

        if let Some(raw) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&raw)?;
        }

        if let Some(raw) = read(ENV_LOG_DIR) {
            let dir = PathBuf::from(&raw);
            if !dir.is_absolute() {
                return Err(format!(
                    "{ENV_LOG_DIR} must be an absolute path, got `{raw}`"
                ));
            }
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ENV_BACKEND, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::storage::BackendKind;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_in_memory_without_logging() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend, BackendKind::Local);
        assert!(config.db_path.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let log_dir = std::env::temp_dir().join("tradeflow-config-test");
        let log_dir_str = log_dir.to_str().unwrap().to_string();
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_BACKEND, " Remote "),
            (ENV_DB_PATH, "data/tradeflow.sqlite3"),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, &log_dir_str),
        ]))
        .unwrap();

        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.db_path, Some(PathBuf::from("data/tradeflow.sqlite3")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_BACKEND, "  "), (ENV_DB_PATH, "")])).unwrap();
        assert_eq!(config.backend, BackendKind::Local);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn rejects_invalid_values() {
        let backend = AppConfig::from_lookup(lookup(&[(ENV_BACKEND, "firestore")])).unwrap_err();
        assert!(backend.contains("unsupported backend"));

        let level = AppConfig::from_lookup(lookup(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(level.contains("unsupported log level"));

        let dir = AppConfig::from_lookup(lookup(&[(ENV_LOG_DIR, "logs/dev")])).unwrap_err();
        assert!(dir.contains("absolute"));
    }
}
