//! version::processor
//!
//! Tag processors turn a resolved tag into the final version string.
//!
//! # Built-in Processors
//!
//! - [`MavenStyleTagProcessor`] (default): the tag's version for a clean
//!   tree, otherwise the version with a development suffix (`-SNAPSHOT`).
//! - [`DescribeTagProcessor`]: `git describe` style,
//!   `<version>-<commits since tag>-g<short id>[-dirty]`.
//! - [`TimestampTagProcessor`]: the version with the HEAD commit's UTC
//!   timestamp appended when not exactly on a clean release.
//!
//! Closures with the processor signature are processors too, so a host
//! can plug in its own policy without defining a type.

use std::path::Path;

use crate::core::types::Oid;
use crate::git::Git;

use super::dirty::is_dirty;
use super::error::VersionError;

/// Suffix appended by [`MavenStyleTagProcessor`] by default.
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Produces the final version string.
pub trait TagProcessor: Send + Sync {
    /// Generate the version.
    ///
    /// - `sub_dir`: part of the work tree relevant for dirtiness, `None`
    ///   for the whole tree
    /// - `commit`: commit of the winning version tag, if any
    /// - `tag`: name of the winning version tag, if any
    /// - `version`: version extracted from the tag, `0.0.0` without one
    ///
    /// # Errors
    ///
    /// Repository access failures are passed on to the caller.
    fn version(
        &self,
        git: &Git,
        sub_dir: Option<&Path>,
        commit: Option<&Oid>,
        tag: Option<&str>,
        version: &str,
    ) -> Result<String, VersionError>;
}

impl<F> TagProcessor for F
where
    F: Fn(&Git, Option<&Path>, Option<&Oid>, Option<&str>, &str) -> Result<String, VersionError>
        + Send
        + Sync,
{
    fn version(
        &self,
        git: &Git,
        sub_dir: Option<&Path>,
        commit: Option<&Oid>,
        tag: Option<&str>,
        version: &str,
    ) -> Result<String, VersionError> {
        self(git, sub_dir, commit, tag, version)
    }
}

/// Release version when tagged and clean, snapshot otherwise.
///
/// The dirty check only runs when a tag was found; without one the
/// result is a snapshot regardless.
#[derive(Debug, Clone)]
pub struct MavenStyleTagProcessor {
    suffix: String,
}

impl Default for MavenStyleTagProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MavenStyleTagProcessor {
    /// Create a processor using [`SNAPSHOT_SUFFIX`].
    pub fn new() -> Self {
        Self {
            suffix: SNAPSHOT_SUFFIX.to_string(),
        }
    }

    /// Use a different development suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// The development suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Apply the policy to an already known tree state.
    pub fn apply(&self, tagged: bool, dirty: bool, version: &str) -> String {
        if tagged && !dirty {
            version.to_string()
        } else {
            format!("{}{}", version, self.suffix)
        }
    }
}

impl TagProcessor for MavenStyleTagProcessor {
    fn version(
        &self,
        git: &Git,
        sub_dir: Option<&Path>,
        commit: Option<&Oid>,
        tag: Option<&str>,
        version: &str,
    ) -> Result<String, VersionError> {
        let tagged = commit.is_some() && tag.is_some();
        let dirty = tagged && is_dirty(git, sub_dir)?;
        Ok(self.apply(tagged, dirty, version))
    }
}

/// `git describe` style versions.
///
/// Exactly on a clean tag the version is returned unchanged. Otherwise the
/// number of commits since the tag (since the root without a tag) and the
/// abbreviated HEAD id are appended, followed by `-dirty` for a modified
/// tree: `1.4.0-3-g1a2b3c4-dirty`.
#[derive(Debug, Clone)]
pub struct DescribeTagProcessor {
    abbrev: usize,
}

impl Default for DescribeTagProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DescribeTagProcessor {
    /// Create a processor abbreviating ids to 7 characters.
    pub fn new() -> Self {
        Self { abbrev: 7 }
    }

    /// Abbreviate commit ids to `abbrev` characters.
    pub fn with_abbrev(mut self, abbrev: usize) -> Self {
        self.abbrev = abbrev;
        self
    }

    /// Format from already known facts.
    ///
    /// `distance` is `None` when there is no HEAD commit at all.
    pub fn format(
        &self,
        version: &str,
        tagged: bool,
        distance: Option<(usize, &Oid)>,
        dirty: bool,
    ) -> String {
        let mut result = version.to_string();
        if let Some((count, head)) = distance {
            if count > 0 || !tagged {
                result.push_str(&format!("-{}-g{}", count, head.short(self.abbrev)));
            }
        }
        if dirty {
            result.push_str("-dirty");
        }
        result
    }
}

impl TagProcessor for DescribeTagProcessor {
    fn version(
        &self,
        git: &Git,
        sub_dir: Option<&Path>,
        commit: Option<&Oid>,
        tag: Option<&str>,
        version: &str,
    ) -> Result<String, VersionError> {
        let tagged = commit.is_some() && tag.is_some();
        let head = git.try_head_oid()?;
        let count = match &head {
            Some(head) => Some(git.commit_count(commit, head)?),
            None => None,
        };
        let dirty = is_dirty(git, sub_dir)?;

        let distance = head.as_ref().zip(count).map(|(head, count)| (count, head));
        Ok(self.format(version, tagged, distance, dirty))
    }
}

/// Date based development versions.
///
/// Exactly on a clean tag the version is returned unchanged. Otherwise the
/// HEAD commit's committer time (UTC) is appended, formatted with a
/// `chrono` format string (default `%Y%m%d%H%M%S`, a single numeric
/// pre-release identifier).
#[derive(Debug, Clone)]
pub struct TimestampTagProcessor {
    format: String,
}

impl Default for TimestampTagProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampTagProcessor {
    /// Create a processor using `%Y%m%d%H%M%S`.
    pub fn new() -> Self {
        Self {
            format: "%Y%m%d%H%M%S".to_string(),
        }
    }

    /// Use a different `chrono` format string.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Format a version for a commit time.
    pub fn format(&self, version: &str, time: chrono::DateTime<chrono::Utc>) -> String {
        format!("{}-{}", version, time.format(&self.format))
    }
}

impl TagProcessor for TimestampTagProcessor {
    fn version(
        &self,
        git: &Git,
        sub_dir: Option<&Path>,
        commit: Option<&Oid>,
        tag: Option<&str>,
        version: &str,
    ) -> Result<String, VersionError> {
        let head = match git.try_head_oid()? {
            Some(head) => head,
            None => return Ok(version.to_string()),
        };

        let on_tag = tag.is_some() && commit == Some(&head);
        if on_tag && !is_dirty(git, sub_dir)? {
            return Ok(version.to_string());
        }

        Ok(self.format(version, git.commit_time(&head)?))
    }
}
