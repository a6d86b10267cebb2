//! version::filter
//!
//! Tag filters: map a tag name to the version it encodes, if any.
//!
//! # Default Filter
//!
//! [`DefaultTagFilter`] searches the tag name for [`VERSION_PATTERN`] and
//! returns its first capture group. The search is unanchored, so `v1.2.3`
//! and `release-1.2.3` both yield `1.2.3`. Prepending a prefix narrows the
//! match: with prefix `v`, `v2.0.0` yields `2.0.0` while `2.0.0` yields
//! nothing.
//!
//! # Custom Filters
//!
//! Anything implementing [`TagFilter`] can replace the default, including
//! plain closures:
//!
//! ```
//! use gitversioning::version::TagFilter;
//!
//! let release_only = |tag: &str| tag.strip_prefix("release-").map(str::to_string);
//! assert_eq!(release_only.version("release-3.1").unwrap(), Some("3.1".to_string()));
//! assert_eq!(release_only.version("3.1").unwrap(), None);
//! ```

use once_cell::sync::OnceCell;
use regex::Regex;

use super::error::VersionError;

/// The default version pattern.
///
/// One to three dot-separated numbers, optionally followed by a hyphenated
/// suffix made of alphanumerics, `+`, `-` and `_`.
pub const VERSION_PATTERN: &str = r"([0-9]+(?:\.[0-9]+){0,2}(?:-[a-zA-Z0-9\+\-_]+)?)";

/// Extracts a version string from a tag name.
pub trait TagFilter: Send + Sync {
    /// Return the version encoded in `tag_name`, or `None` if the tag is
    /// not a version tag.
    ///
    /// # Errors
    ///
    /// Only for misconfiguration, such as a pattern that does not compile.
    fn version(&self, tag_name: &str) -> Result<Option<String>, VersionError>;

    /// Check the configuration before any tag is seen.
    ///
    /// Called once per evaluation, so a broken filter fails even in a
    /// repository without tags.
    fn validate(&self) -> Result<(), VersionError> {
        Ok(())
    }
}

impl<F> TagFilter for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn version(&self, tag_name: &str) -> Result<Option<String>, VersionError> {
        Ok(self(tag_name))
    }
}

/// Regex based tag filter.
///
/// The pattern must contain a capture group; group 1 is the version. It is
/// compiled on first use and the compiled form is reused for every tag.
/// Builder methods consume the filter, so the pattern can no longer change
/// once the filter has been used.
///
/// # Example
///
/// ```
/// use gitversioning::version::{DefaultTagFilter, TagFilter};
///
/// let filter = DefaultTagFilter::new().prepend("v");
/// assert_eq!(filter.version("v2.0.0").unwrap(), Some("2.0.0".to_string()));
/// assert_eq!(filter.version("2.0.0").unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct DefaultTagFilter {
    pattern: String,
    compiled: OnceCell<Regex>,
}

impl Default for DefaultTagFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultTagFilter {
    /// Create a filter using [`VERSION_PATTERN`].
    pub fn new() -> Self {
        Self {
            pattern: VERSION_PATTERN.to_string(),
            compiled: OnceCell::new(),
        }
    }

    /// Replace the pattern.
    ///
    /// The pattern must have a capture group that matches the version.
    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            compiled: OnceCell::new(),
        }
    }

    /// Prepend a regex fragment to the current pattern.
    ///
    /// The prefix is regex syntax, not a literal. Prepending composes:
    /// `prepend(a).prepend(b)` is the same filter as `prepend(b + a)`.
    pub fn prepend(self, prefix: &str) -> Self {
        let pattern = format!("{}{}", prefix, self.pattern);
        self.pattern(pattern)
    }

    /// The current pattern source.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Compile the pattern, or return the already compiled form.
    ///
    /// # Errors
    ///
    /// - [`VersionError::InvalidPattern`] if the pattern does not compile
    /// - [`VersionError::MissingCaptureGroup`] if it has no capture group
    pub fn compile(&self) -> Result<&Regex, VersionError> {
        self.compiled.get_or_try_init(|| {
            let regex = Regex::new(&self.pattern).map_err(|source| VersionError::InvalidPattern {
                pattern: self.pattern.clone(),
                source,
            })?;
            // Group 0 is the whole match
            if regex.captures_len() < 2 {
                return Err(VersionError::MissingCaptureGroup {
                    pattern: self.pattern.clone(),
                });
            }
            Ok(regex)
        })
    }
}

impl TagFilter for DefaultTagFilter {
    fn validate(&self) -> Result<(), VersionError> {
        self.compile().map(|_| ())
    }

    fn version(&self, tag_name: &str) -> Result<Option<String>, VersionError> {
        let regex = self.compile()?;
        Ok(regex
            .captures(tag_name)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string()))
    }
}
