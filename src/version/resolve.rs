//! version::resolve
//!
//! Tag candidate resolution and winner selection.
//!
//! # Algorithm
//!
//! 1. Enumerate every ref under `refs/tags/`.
//! 2. Strip the namespace, run the tag filter and drop tags without a
//!    version. Parse the extracted text loosely; text that still fails is a
//!    configuration error and aborts the evaluation.
//! 3. Rank by descending semver precedence. Equal versions are ordered by
//!    ascending tag name so the ranking is total and repeatable.
//! 4. Walk the ranking, resolving each tag to a commit (annotated tags are
//!    dereferenced exactly once; anything else is skipped).
//! 5. Skip commits that are not reachable from HEAD.
//! 6. The first survivor wins. Without one the result is untagged with
//!    version [`NO_TAG_VERSION`].
//!
//! Ranking happens before the reachability check on purpose: the winner
//! is the highest version that is an ancestor of HEAD, even when a higher
//! version is tagged on an unmerged branch.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::core::types::Oid;
use crate::git::{Git, TagTarget};

use super::error::VersionError;
use super::filter::TagFilter;
use super::loose::parse_loose;

/// Base version used when no version tag is reachable.
pub const NO_TAG_VERSION: &str = "0.0.0";

/// Outcome of candidate resolution, handed to the tag processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    /// Commit designated by the winning tag
    pub commit: Option<Oid>,
    /// Bare name of the winning tag
    pub tag: Option<String>,
    /// Version text extracted from the winning tag, or `0.0.0`
    pub version: String,
}

impl ResolvedVersion {
    /// The result when no version tag is reachable.
    pub fn untagged() -> Self {
        Self {
            commit: None,
            tag: None,
            version: NO_TAG_VERSION.to_string(),
        }
    }

    /// Whether a reachable version tag was found.
    pub fn is_tagged(&self) -> bool {
        self.commit.is_some() && self.tag.is_some()
    }
}

/// A version tag that passed the filter, before reachability is known.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Bare tag name (without `refs/tags/`)
    pub tag: String,
    /// Text the filter extracted
    pub version_text: String,
    /// Loosely parsed version, used for ranking
    pub version: semver::Version,
    /// Direct target of the tag ref (commit or tag object)
    pub target: Oid,
}

/// Ranking order: highest precedence first, then tag name.
///
/// Build metadata does not take part in precedence.
pub fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    precedence(&b.version, &a.version).then_with(|| a.tag.cmp(&b.tag))
}

fn precedence(a: &semver::Version, b: &semver::Version) -> Ordering {
    (a.major, a.minor, a.patch)
        .cmp(&(b.major, b.minor, b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

/// Collect all version tags, ranked best first (steps 1-3).
///
/// # Errors
///
/// - [`VersionError::UnparsableVersion`] if extracted text is not a version
/// - [`VersionError::Git`] if tags cannot be listed
pub fn ranked_candidates(git: &Git, filter: &dyn TagFilter) -> Result<Vec<Candidate>, VersionError> {
    let mut candidates = Vec::new();

    for entry in git.list_tags()? {
        let tag = match entry.name.tag_name() {
            Some(tag) => tag,
            None => continue,
        };

        let text = match filter.version(tag)? {
            Some(text) => text,
            None => {
                tracing::trace!(tag, "not a version tag");
                continue;
            }
        };

        let version = parse_loose(&text).map_err(|e| VersionError::UnparsableVersion {
            tag: tag.to_string(),
            version: text.clone(),
            message: e.to_string(),
        })?;

        candidates.push(Candidate {
            tag: tag.to_string(),
            version_text: text,
            version,
            target: entry.oid,
        });
    }

    candidates.sort_by(rank);
    Ok(candidates)
}

/// Pick the best candidate whose commit is reachable (steps 4-6).
///
/// Lookup failures and non-commit targets skip the candidate rather than
/// failing the evaluation.
pub fn select_winner(git: &Git, ranked: &[Candidate], reachable: &HashSet<Oid>) -> ResolvedVersion {
    for candidate in ranked {
        let commit = match git.tag_target(&candidate.target) {
            Ok(TagTarget::Commit(commit)) | Ok(TagTarget::AnnotatedTag(commit)) => commit,
            Ok(TagTarget::Other) => {
                tracing::debug!(tag = %candidate.tag, "tag does not designate a commit, skipping");
                continue;
            }
            Err(e) => {
                tracing::debug!(tag = %candidate.tag, error = %e, "cannot resolve tag, skipping");
                continue;
            }
        };

        if !reachable.contains(&commit) {
            tracing::debug!(tag = %candidate.tag, "tag is not reachable from HEAD, skipping");
            continue;
        }

        tracing::debug!(tag = %candidate.tag, commit = %commit.short(7), "selected version tag");
        return ResolvedVersion {
            commit: Some(commit),
            tag: Some(candidate.tag.clone()),
            version: candidate.version_text.clone(),
        };
    }

    ResolvedVersion::untagged()
}

/// Resolve the latest reachable version tag.
pub fn resolve_latest(
    git: &Git,
    filter: &dyn TagFilter,
    reachable: &HashSet<Oid>,
) -> Result<ResolvedVersion, VersionError> {
    let ranked = ranked_candidates(git, filter)?;
    tracing::debug!(candidates = ranked.len(), "ranked version tags");
    Ok(select_winner(git, &ranked, reachable))
}
