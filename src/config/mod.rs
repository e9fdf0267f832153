//! config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Configuration only controls how git is spawned: which binary, and which
//! environment overrides every child process receives. Nothing reads it
//! implicitly; `Git::new()` and `Repo::new()` use [`Config::default`], and
//! callers opt in to file-based settings with [`Config::load`] or
//! [`Config::from_path`].
//!
//! # Config Locations
//!
//! [`Config::load`] searches in order and uses the first file that exists:
//! 1. `$PLY_GIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/ply/git.toml`
//! 3. `~/.ply/git.toml`
//!
//! Missing files are not an error (defaults are used).
//!
//! # Example
//!
//! ```
//! use ply_git::config::Config;
//!
//! let config = Config::from_toml_str(r#"
//! program = "git"
//!
//! [env]
//! GIT_AUTHOR_NAME = "Patch Bot"
//! "#).unwrap();
//!
//! assert_eq!(config.program(), "git");
//! assert_eq!(config.env().count(), 1);
//! ```

pub mod schema;

pub use schema::ToolConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PLY_GIT_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Tool settings
    pub tool: ToolConfig,
    /// Path the settings were read from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Build a configuration from tool settings, validating them.
    pub fn new(tool: ToolConfig) -> Result<Self, ConfigError> {
        tool.validate()?;
        Ok(Self { tool, path: None })
    }

    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_first(&Self::candidate_paths())
    }

    /// Load configuration from an explicit file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let tool: ToolConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tool.validate()?;

        debug!(path = %path.display(), "loaded git tool config");
        Ok(Self {
            tool,
            path: Some(path.to_path_buf()),
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let tool: ToolConfig = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        Self::new(tool)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            paths.push(PathBuf::from(path));
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_home).join("ply/git.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".ply/git.toml"));
        }

        paths
    }

    fn load_first(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Path the configuration was read from, if it came from a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the git binary to run.
    ///
    /// Defaults to "git" if not configured.
    pub fn program(&self) -> &str {
        self.tool.program.as_deref().unwrap_or("git")
    }

    /// Environment overrides, sorted by key.
    pub fn env(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tool
            .env
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Add an environment override.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key is not a valid
    /// variable name.
    pub fn with_env(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.tool.env.insert(key.into(), value.into());
        self.tool.validate()?;
        Ok(self)
    }
}
