//! Runtime configuration for the catalog store and logging.
//!
//! # Responsibility
//! - Resolve the database location and logging settings once at start-up.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "game_catalog.db";
pub const DB_PATH_ENV: &str = "GAME_CATALOG_DB";
pub const LOG_LEVEL_ENV: &str = "GAME_CATALOG_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "GAME_CATALOG_LOG_DIR";

/// Process-wide settings resolved before the repository is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// SQLite file holding the catalog.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Reads overrides from `GAME_CATALOG_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = non_blank(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = non_blank(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config.log_dir = non_blank(LOG_DIR_ENV).map(PathBuf::from);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, DB_PATH_ENV, DEFAULT_DB_FILE, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> CatalogConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = config_from(&[]);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn overrides_are_read_and_trimmed() {
        let config = config_from(&[
            (DB_PATH_ENV, " /tmp/catalog.db "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/tmp/logs"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn blank_overrides_fall_back_to_defaults() {
        let config = config_from(&[(DB_PATH_ENV, "   "), (LOG_DIR_ENV, "")]);
        assert_eq!(config, CatalogConfig::default());
    }
}
