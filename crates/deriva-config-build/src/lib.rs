//! Processor configuration.
//!
//! ```toml
//! [roles]
//! conflict = "last_wins"    # or "reject"
//!
//! [materializer]
//! default = "sql"
//! ```

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// ProcessorConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessorConfig {
    pub roles: RoleConfig,
    pub materializer: MaterializerConfig,
}

impl ProcessorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub const fn with_role_conflict(mut self, conflict: RoleConflictPolicy) -> Self {
        self.roles.conflict = conflict;
        self
    }

    #[must_use]
    pub fn with_default_materializer(mut self, name: impl Into<String>) -> Self {
        self.materializer.default = Some(name.into());
        self
    }
}

///
/// RoleConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RoleConfig {
    pub conflict: RoleConflictPolicy,
}

///
/// RoleConflictPolicy
/// What happens when two parameters qualify for the same role.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RoleConflictPolicy {
    /// The last parameter examined takes the role.
    #[default]
    LastWins,

    /// The method is rejected with an ambiguity diagnostic.
    Reject,
}

///
/// MaterializerConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MaterializerConfig {
    /// Used by interfaces that do not name a materializer themselves.
    pub default: Option<String>,
}

///
/// TESTS
///
