//! config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Values are validated after parsing: the program name must be non-empty
//! and environment keys must be usable as variable names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Settings for spawning the git binary.
///
/// # Example
///
/// ```toml
/// program = "/usr/local/bin/git"
///
/// [env]
/// GIT_AUTHOR_NAME = "Patch Bot"
/// GIT_AUTHOR_EMAIL = "bot@example.com"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Binary to run instead of `git` on `PATH`
    pub program: Option<String>,

    /// Environment overrides for every spawned process
    pub env: BTreeMap<String, String>,
}

impl ToolConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(program) = &self.program {
            if program.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "program must not be empty".to_string(),
                ));
            }
        }

        for key in self.env.keys() {
            if key.is_empty() || key.contains('=') || key.contains('\0') {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid environment variable name '{key}'"
                )));
            }
        }

        Ok(())
    }
}
