//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$GITVERSION_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitversion/config.toml`
//! 3. `~/.gitversion/config.toml`
//!
//! # Repo Config
//!
//! Located at `.gitversion.toml` in the work tree (canonical), or
//! `.git/gitversion/config.toml`.
//!
//! # Validation
//!
//! Values are validated after parsing: processor names must be known,
//! tag patterns must compile with a capture group, and the sub-directory
//! must be relative to the work tree.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::version::{BuiltinProcessor, DefaultTagFilter, TagFilter};

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// processor = "maven"
/// snapshot_suffix = "-SNAPSHOT"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Tag processor name
    pub processor: Option<String>,

    /// Development suffix for the maven processor
    pub snapshot_suffix: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_processor(self.processor.as_deref())?;
        validate_suffix(self.snapshot_suffix.as_deref())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// tag_prefix = "v"
/// sub_directory = "modules/api"
/// processor = "describe"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Regex fragment prepended to the tag pattern
    pub tag_prefix: Option<String>,

    /// Replacement for the default tag pattern
    pub tag_pattern: Option<String>,

    /// Sub-directory relevant for dirtiness, relative to the work tree
    pub sub_directory: Option<String>,

    /// Tag processor name
    pub processor: Option<String>,

    /// Development suffix for the maven processor
    pub snapshot_suffix: Option<String>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_processor(self.processor.as_deref())?;
        validate_suffix(self.snapshot_suffix.as_deref())?;

        if self.tag_prefix.is_some() || self.tag_pattern.is_some() {
            let mut filter = DefaultTagFilter::new();
            if let Some(pattern) = &self.tag_pattern {
                filter = filter.pattern(pattern.as_str());
            }
            if let Some(prefix) = &self.tag_prefix {
                filter = filter.prepend(prefix);
            }
            filter
                .validate()
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if let Some(sub_dir) = &self.sub_directory {
            if Path::new(sub_dir).is_absolute() {
                return Err(ConfigError::InvalidValue(format!(
                    "sub_directory '{}' must be relative to the work tree",
                    sub_dir
                )));
            }
        }

        Ok(())
    }
}

fn validate_processor(name: Option<&str>) -> Result<(), ConfigError> {
    if let Some(name) = name {
        if BuiltinProcessor::parse(name).is_none() {
            let valid: Vec<&str> = BuiltinProcessor::all().iter().map(|p| p.name()).collect();
            return Err(ConfigError::InvalidValue(format!(
                "invalid processor '{}', must be one of: {}",
                name,
                valid.join(", ")
            )));
        }
    }
    Ok(())
}

fn validate_suffix(suffix: Option<&str>) -> Result<(), ConfigError> {
    match suffix {
        Some(suffix) if suffix.chars().any(char::is_whitespace) => Err(
            ConfigError::InvalidValue(format!("snapshot_suffix '{}' contains whitespace", suffix)),
        ),
        _ => Ok(()),
    }
}
