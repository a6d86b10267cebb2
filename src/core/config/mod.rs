//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! gitversion has two configuration scopes:
//! - **Global**: User-level defaults (processor, suffix)
//! - **Repo**: Per-repository settings (tag prefix or pattern,
//!   sub-directory, processor, suffix)
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GITVERSION_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitversion/config.toml`
//! 3. `~/.gitversion/config.toml`
//!
//! # Repo Config Locations
//!
//! Searched in order:
//! 1. `.gitversion.toml` in the work tree (canonical, can be committed)
//! 2. `gitversion/config.toml` in the git directory (local only)
//!
//! # Example
//!
//! ```no_run
//! use gitversioning::core::config::{Config, RepoDirs};
//! use std::path::Path;
//!
//! let dirs = RepoDirs {
//!     work_dir: Path::new("/path/to/repo"),
//!     git_dir: Path::new("/path/to/repo/.git"),
//! };
//! let result = Config::load(Some(dirs)).unwrap();
//! let config = result.config;
//!
//! println!("Processor: {}", config.processor());
//! if let Some(prefix) = config.tag_prefix() {
//!     println!("Tag prefix: {}", prefix);
//! }
//! ```

pub mod schema;

pub use schema::{GlobalConfig, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::version::BuiltinProcessor;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "GITVERSION_CONFIG";

/// Repo config file name at the work tree root.
pub const REPO_CONFIG_FILE: &str = ".gitversion.toml";

/// Where a repository keeps its config files.
///
/// The git directory is not always `.git` under the work tree: linked
/// worktrees and `--separate-git-dir` checkouts keep it elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct RepoDirs<'a> {
    /// Root of the working tree, holding `.gitversion.toml`
    pub work_dir: &'a Path,
    /// Git directory, holding `gitversion/config.toml`
    pub git_dir: &'a Path,
}

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

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: repo config overrides
/// global config, which overrides the defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Assemble a configuration from already parsed parts.
    pub fn new(global: GlobalConfig, repo: Option<RepoConfig>) -> Self {
        Self {
            global,
            repo,
            global_path: None,
            repo_path: None,
        }
    }

    /// Load configuration from default locations.
    ///
    /// If `repo` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or
    /// hold invalid values. Missing files are not an error.
    pub fn load(repo: Option<RepoDirs<'_>>) -> Result<ConfigLoadResult, ConfigError> {
        let candidates = Self::global_candidates(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );
        Self::load_from(&candidates, repo)
    }

    /// Load with an explicit list of global config candidates.
    fn load_from(
        global_candidates: &[PathBuf],
        repo_dirs: Option<RepoDirs<'_>>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match global_candidates.iter().find(|p| p.is_file()) {
            Some(path) => (read_config::<GlobalConfig>(path)?, Some(path.clone())),
            None => (GlobalConfig::default(), None),
        };

        let (repo, repo_path) = match repo_dirs {
            Some(dirs) => Self::load_repo(dirs, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path,
            },
            warnings,
        })
    }

    /// Global config locations in lookup order.
    fn global_candidates(
        explicit: Option<PathBuf>,
        xdg_home: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        candidates.extend(explicit);
        candidates.extend(xdg_home.map(|xdg| xdg.join("gitversion/config.toml")));
        candidates.extend(home.map(|home| home.join(".gitversion/config.toml")));
        candidates
    }

    /// Load repository configuration from standard locations.
    fn load_repo(
        dirs: RepoDirs<'_>,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<RepoConfig>, Option<PathBuf>), ConfigError> {
        let canonical = Self::repo_config_path(dirs.work_dir);
        let local = Self::local_config_path(dirs.git_dir);

        match (canonical.is_file(), local.is_file()) {
            (true, true) => {
                warnings.push(ConfigWarning {
                    message: format!(
                        "Ignoring config file, '{}' takes precedence",
                        canonical.display()
                    ),
                    path: local,
                });
                Ok((Some(read_config(&canonical)?), Some(canonical)))
            }
            (true, false) => Ok((Some(read_config(&canonical)?), Some(canonical))),
            (false, true) => Ok((Some(read_config(&local)?), Some(local))),
            (false, false) => Ok((None, None)),
        }
    }

    /// Get the canonical path for repo config.
    ///
    /// Returns `.gitversion.toml` relative to the given work tree.
    pub fn repo_config_path(work_dir: &Path) -> PathBuf {
        work_dir.join(REPO_CONFIG_FILE)
    }

    /// Get the path for local, uncommitted repo config.
    pub fn local_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("gitversion").join("config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the tag processor name.
    ///
    /// Defaults to "maven" if not configured.
    pub fn processor(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.processor.as_deref())
            .or(self.global.processor.as_deref())
            .unwrap_or(BuiltinProcessor::Maven.name())
    }

    /// Get the development suffix, if configured.
    pub fn snapshot_suffix(&self) -> Option<&str> {
        self.repo
            .as_ref()
            .and_then(|r| r.snapshot_suffix.as_deref())
            .or(self.global.snapshot_suffix.as_deref())
    }

    /// Get the tag prefix, if configured.
    pub fn tag_prefix(&self) -> Option<&str> {
        self.repo.as_ref().and_then(|r| r.tag_prefix.as_deref())
    }

    /// Get the tag pattern, if configured.
    pub fn tag_pattern(&self) -> Option<&str> {
        self.repo.as_ref().and_then(|r| r.tag_pattern.as_deref())
    }

    /// Get the sub-directory, if configured.
    pub fn sub_directory(&self) -> Option<&Path> {
        self.repo
            .as_ref()
            .and_then(|r| r.sub_directory.as_deref())
            .map(Path::new)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

/// Read and parse a config file.
fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
