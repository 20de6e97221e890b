//! Runtime configuration resolved from command-line flags and the environment.

use std::path::{Path, PathBuf};

use crate::error::BoardError;
use crate::seed::{initial_tasks, load_seed_file};
use crate::task::Task;

pub const DIR_ENV: &str = "TASKBOARD_DIR";
pub const SEED_ENV: &str = "TASKBOARD_SEED";
pub const LOG_ENV: &str = "TASKBOARD_LOG";
pub const DEFAULT_LOG_FILTER: &str = concat!(env!("CARGO_CRATE_NAME"), "=info");
pub const LOG_FILE: &str = "taskboard.log";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub seed_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Config {
    /// Resolve settings: flags win over environment, environment over defaults.
    pub fn resolve(dir: Option<PathBuf>, seed: Option<PathBuf>) -> Self {
        Self::resolve_with(dir, seed, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        dir: Option<PathBuf>,
        seed: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let data_dir = dir
            .or_else(|| env(DIR_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| {
                let home = env("HOME").unwrap_or_else(|| ".".to_string());
                PathBuf::from(home).join(".taskboard")
            });
        let seed_path = seed.or_else(|| env(SEED_ENV).filter(|v| !v.is_empty()).map(PathBuf::from));
        let log_filter = env(LOG_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            data_dir,
            seed_path,
            log_filter,
        }
    }

    /// Create the data directory if needed.
    pub fn ensure_data_dir(&self) -> Result<&Path, ConfigError> {
        std::fs::create_dir_all(&self.data_dir).map_err(|source| ConfigError::CreateDir {
            path: self.data_dir.clone(),
            source,
        })?;
        Ok(&self.data_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    /// The seed list: the configured file if any, else the built-in one.
    pub fn seed_tasks(&self) -> Result<Vec<Task>, BoardError> {
        match &self.seed_path {
            Some(path) => load_seed_file(path),
            None => Ok(initial_tasks()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_use_home() {
        let cfg = Config::resolve_with(None, None, env_of(&[("HOME", "/home/me")]));
        assert_eq!(cfg.data_dir, PathBuf::from("/home/me/.taskboard"));
        assert_eq!(cfg.seed_path, None);
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_overrides_defaults() {
        let cfg = Config::resolve_with(
            None,
            None,
            env_of(&[(DIR_ENV, "/data"), (SEED_ENV, "/seed.json"), (LOG_ENV, "debug")]),
        );
        assert_eq!(cfg.data_dir, PathBuf::from("/data"));
        assert_eq!(cfg.seed_path, Some(PathBuf::from("/seed.json")));
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn test_flags_override_env() {
        let cfg = Config::resolve_with(
            Some(PathBuf::from("/flag")),
            Some(PathBuf::from("/flag-seed.json")),
            env_of(&[(DIR_ENV, "/data"), (SEED_ENV, "/seed.json")]),
        );
        assert_eq!(cfg.data_dir, PathBuf::from("/flag"));
        assert_eq!(cfg.seed_path, Some(PathBuf::from("/flag-seed.json")));
    }

    #[test]
    fn test_builtin_seed_without_file() {
        let cfg = Config::resolve_with(None, None, env_of(&[]));
        assert_eq!(cfg.seed_tasks().unwrap(), initial_tasks());
        assert_eq!(cfg.data_dir, PathBuf::from("./.taskboard"));
    }
}
