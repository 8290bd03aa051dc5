//! Configuration for evlog.
//!
//! EVLOG_ROOT resolution order:
//! 1. Explicit path passed to Config::with_root() / Config::load_from()
//! 2. EVLOG_ROOT environment variable
//! 3. Platform config directory (e.g. ~/.config/evlog)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::query::SortOrder;
use crate::{Error, Result};

/// Environment variable overriding the config root.
pub const EVLOG_ROOT_VAR: &str = "EVLOG_ROOT";

/// evlog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml. Always the directory it was loaded from.
    #[serde(skip)]
    pub root: PathBuf,

    /// Event log to read. Relative paths are resolved against `root`.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Default timestamp order for query results.
    #[serde(default)]
    pub order: SortOrder,

    /// Default cap on the number of query results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("events.log")
}

impl Config {
    /// Create a new config with the given root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            log_file: default_log_file(),
            order: SortOrder::default(),
            limit: None,
        }
    }

    /// Load config from EVLOG_ROOT/config.toml, or create default.
    pub fn load() -> Result<Self> {
        let root = resolve_root()?;
        Self::load_from(&root)
    }

    /// Load config from a specific root.
    pub fn load_from(root: &Path) -> Result<Self> {
        let config_path = root.join("config.toml");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
            config.root = root.to_path_buf();
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            tracing::debug!(root = %root.display(), "no config file, using defaults");
            Ok(Self::with_root(root))
        }
    }

    /// Save config to EVLOG_ROOT/config.toml, creating the root if needed.
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(self.config_path(), contents)?;
        Ok(())
    }

    /// Path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Absolute (or root-relative) path of the event log.
    pub fn log_path(&self) -> PathBuf {
        if self.log_file.is_absolute() {
            self.log_file.clone()
        } else {
            self.root.join(&self.log_file)
        }
    }
}

/// Resolve EVLOG_ROOT using the standard resolution order.
fn resolve_root() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(EVLOG_ROOT_VAR) {
        return Ok(PathBuf::from(path));
    }

    if let Some(proj_dirs) = ProjectDirs::from("", "", "evlog") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var("HOME")
        .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".config/evlog"))
}
