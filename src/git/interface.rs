//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! gitversioning. All repository reads flow through this interface, which
//! provides structured results and normalizes errors into typed failure
//! categories.
//!
//! # Architecture
//!
//! The `Git` struct is the only way to interact with a Git repository.
//! No other module should import `git2` directly. This ensures:
//!
//! - Consistent error handling across all Git operations
//! - Strong type guarantees at the boundary
//! - Read-only access: nothing here writes refs, objects or the index
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::BareRepo`]: Repository has no working tree
//! - [`GitError::RefNotFound`]: Requested ref does not exist
//! - [`GitError::ObjectNotFound`]: Requested object does not exist
//!
//! # Example
//!
//! ```ignore
//! use gitversioning::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! if let Some(head) = git.try_head_oid()? {
//!     println!("HEAD is at {}", head.short(7));
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Oid, RefName, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Invalid ref name format.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => {
                if context.starts_with("refs/") || context == "HEAD" {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: err.message().to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidRefName(msg) => GitError::InvalidRefName { message: msg },
        }
    }
}

/// A ref with its name and direct (unpeeled) target.
///
/// For an annotated tag the target is the tag object, not the commit.
#[derive(Debug, Clone)]
pub struct RefEntry {
    /// The full ref name
    pub name: RefName,
    /// The OID the ref points to
    pub oid: Oid,
}

/// What a tag ref designates, after at most one level of dereferencing.
///
/// This is a closed set: callers match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagTarget {
    /// Lightweight tag pointing straight at a commit.
    Commit(Oid),
    /// Annotated tag object whose target is the contained commit.
    AnnotatedTag(Oid),
    /// Anything else: blobs, trees, tags of tags, tags of non-commits.
    Other,
}

impl TagTarget {
    /// The commit this target designates, if any.
    pub fn commit(&self) -> Option<&Oid> {
        match self {
            TagTarget::Commit(oid) | TagTarget::AnnotatedTag(oid) => Some(oid),
            TagTarget::Other => None,
        }
    }
}

/// Category of a working tree change.
///
/// Mirrors the buckets of `git status`: a single path may fall into
/// several categories at once (e.g. staged and then modified again).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Tracked file changed in the working tree but not staged.
    Modified,
    /// File not known to the index.
    Untracked,
    /// Change to a tracked file staged in the index but not committed.
    Staged,
    /// Tracked file deleted from the working tree.
    Missing,
    /// Unresolved merge conflict.
    Conflicting,
    /// New file staged in the index.
    Added,
    /// Deletion staged in the index.
    Removed,
}

/// A path with uncommitted changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Path relative to the work tree root, `/`-separated
    pub path: String,
    /// Every category the path falls into
    pub kinds: Vec<ChangeKind>,
}

impl StatusEntry {
    fn from_status(path: String, status: git2::Status) -> Self {
        let mut kinds = Vec::new();

        if status.is_conflicted() {
            kinds.push(ChangeKind::Conflicting);
        }

        if status.is_index_new() {
            kinds.push(ChangeKind::Added);
        }
        if status.is_index_deleted() {
            kinds.push(ChangeKind::Removed);
        }
        if status.is_index_modified() || status.is_index_renamed() || status.is_index_typechange()
        {
            kinds.push(ChangeKind::Staged);
        }

        if status.is_wt_modified() || status.is_wt_renamed() || status.is_wt_typechange() {
            kinds.push(ChangeKind::Modified);
        }
        if status.is_wt_deleted() {
            kinds.push(ChangeKind::Missing);
        }
        if status.is_wt_new() {
            kinds.push(ChangeKind::Untracked);
        }

        Self { path, kinds }
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. The version
/// engine only ever borrows a `Git`; opening and dropping it is the
/// caller's business.
///
/// `git2::Repository` is `Send` but not `Sync`, so threads that evaluate
/// versions concurrently each open their own `Git` for the same path.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        // Dirty checks need a work tree
        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Root of the working tree.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    // =========================================================================
    // Ref Resolution
    // =========================================================================

    /// HEAD commit OID, or `None` while HEAD is unborn.
    pub fn try_head_oid(&self) -> Result<Option<Oid>, GitError> {
        match self.repo.head() {
            Ok(head) => {
                let commit = head
                    .peel_to_commit()
                    .map_err(|e| GitError::from_git2(e, "HEAD"))?;
                Ok(Some(Oid::new(commit.id().to_string())?))
            }
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(GitError::from_git2(e, "HEAD")),
        }
    }

    // =========================================================================
    // Tag Enumeration
    // =========================================================================

    /// List all tag refs with their direct targets.
    ///
    /// Targets are not peeled: an annotated tag yields the tag object id.
    /// Refs with non-UTF8 or otherwise invalid names are skipped.
    pub fn list_tags(&self) -> Result<Vec<RefEntry>, GitError> {
        let pattern = format!("{}*", RefName::TAGS_PREFIX);
        let refs = self
            .repo
            .references_glob(&pattern)
            .map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

        let mut entries = Vec::new();
        for reference in refs {
            let reference = reference.map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

            let name = match reference.name() {
                Some(n) => n,
                None => continue,
            };

            let ref_name = match RefName::new(name) {
                Ok(r) => r,
                Err(_) => continue,
            };

            // Symbolic tag refs are unusual, follow them to the final target
            let target = match reference.target() {
                Some(oid) => oid,
                None => match reference.resolve().ok().and_then(|r| r.target()) {
                    Some(oid) => oid,
                    None => continue,
                },
            };

            entries.push(RefEntry {
                name: ref_name,
                oid: Oid::new(target.to_string())?,
            });
        }

        Ok(entries)
    }

    /// Classify the object a tag ref points to.
    ///
    /// Annotated tags are dereferenced exactly one level: a tag whose
    /// target is itself a tag object is reported as [`TagTarget::Other`].
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if the object doesn't exist
    pub fn tag_target(&self, oid: &Oid) -> Result<TagTarget, GitError> {
        let git_oid =
            git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let object = self
            .repo
            .find_object(git_oid, None)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        match object.kind() {
            Some(git2::ObjectType::Commit) => Ok(TagTarget::Commit(oid.clone())),
            Some(git2::ObjectType::Tag) => {
                let tag = match object.as_tag() {
                    Some(tag) => tag,
                    None => return Ok(TagTarget::Other),
                };
                match tag.target_type() {
                    Some(git2::ObjectType::Commit) => Ok(TagTarget::AnnotatedTag(Oid::new(
                        tag.target_id().to_string(),
                    )?)),
                    _ => Ok(TagTarget::Other),
                }
            }
            _ => Ok(TagTarget::Other),
        }
    }

    // =========================================================================
    // Ancestry Queries
    // =========================================================================

    /// Walk the full ancestry of `head`, including `head` itself.
    ///
    /// Every reachable commit is returned exactly once.
    pub fn walk_ancestry(&self, head: &Oid) -> Result<Vec<Oid>, GitError> {
        let head_oid = git2::Oid::from_str(head.as_str())
            .map_err(|e| GitError::from_git2(e, head.as_str()))?;

        let mut revwalk = self.repo.revwalk().map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;

        revwalk
            .push(head_oid)
            .map_err(|e| GitError::from_git2(e, head.as_str()))?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;
            commits.push(Oid::new(oid.to_string())?);
        }

        Ok(commits)
    }

    /// Count commits between two OIDs.
    ///
    /// Counts commits reachable from `tip` but not from `base`. Without a
    /// base, counts every commit reachable from `tip`.
    pub fn commit_count(&self, base: Option<&Oid>, tip: &Oid) -> Result<usize, GitError> {
        let tip_oid =
            git2::Oid::from_str(tip.as_str()).map_err(|e| GitError::from_git2(e, tip.as_str()))?;

        let mut revwalk = self.repo.revwalk().map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;

        revwalk
            .push(tip_oid)
            .map_err(|e| GitError::from_git2(e, tip.as_str()))?;

        if let Some(base) = base {
            let base_oid = git2::Oid::from_str(base.as_str())
                .map_err(|e| GitError::from_git2(e, base.as_str()))?;
            revwalk
                .hide(base_oid)
                .map_err(|e| GitError::from_git2(e, base.as_str()))?;
        }

        let mut count = 0;
        for oid in revwalk {
            oid.map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;
            count += 1;
        }
        Ok(count)
    }

    // =========================================================================
    // Commit Information
    // =========================================================================

    /// Committer timestamp of a commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if the commit doesn't exist
    pub fn commit_time(&self, oid: &Oid) -> Result<chrono::DateTime<chrono::Utc>, GitError> {
        let git_oid =
            git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let commit = self
            .repo
            .find_commit(git_oid)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        Ok(
            chrono::DateTime::from_timestamp(commit.time().seconds(), 0)
                .unwrap_or(chrono::DateTime::UNIX_EPOCH),
        )
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// List every path with uncommitted changes.
    ///
    /// Untracked directories are expanded to the files inside them so
    /// that path prefixes can be matched per file. Ignored files are not
    /// reported.
    pub fn status_entries(&self) -> Result<Vec<StatusEntry>, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

        let entries = statuses
            .iter()
            .map(|entry| {
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                StatusEntry::from_status(path, entry.status())
            })
            .filter(|entry| !entry.kinds.is_empty())
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod git_error {
        use super::*;

        #[test]
        fn error_display_formatting() {
            let err = GitError::RefNotFound {
                refname: "HEAD".to_string(),
            };
            assert_eq!(err.to_string(), "ref not found: HEAD");

            let err = GitError::NotARepo {
                path: PathBuf::from("/tmp/nowhere"),
            };
            assert!(err.to_string().contains("/tmp/nowhere"));
        }

        #[test]
        fn type_errors_convert() {
            let err: GitError = TypeError::InvalidOid("short".to_string()).into();
            assert!(matches!(err, GitError::InvalidOid { .. }));

            let err: GitError = TypeError::InvalidRefName("bad".to_string()).into();
            assert!(matches!(err, GitError::InvalidRefName { .. }));
        }

        #[test]
        fn not_found_maps_by_context() {
            let err = git2::Error::new(
                git2::ErrorCode::NotFound,
                git2::ErrorClass::Reference,
                "missing",
            );
            assert!(matches!(
                GitError::from_git2(err, "refs/tags/v1"),
                GitError::RefNotFound { .. }
            ));

            let err = git2::Error::new(
                git2::ErrorCode::NotFound,
                git2::ErrorClass::Odb,
                "missing",
            );
            assert!(matches!(
                GitError::from_git2(err, "abc123"),
                GitError::ObjectNotFound { .. }
            ));
        }
    }

    mod tag_target {
        use super::*;

        fn oid() -> Oid {
            Oid::new("abc123def4567890abc123def4567890abc12345").unwrap()
        }

        #[test]
        fn commit_and_annotated_designate_commit() {
            assert_eq!(TagTarget::Commit(oid()).commit(), Some(&oid()));
            assert_eq!(TagTarget::AnnotatedTag(oid()).commit(), Some(&oid()));
        }

        #[test]
        fn other_designates_nothing() {
            assert_eq!(TagTarget::Other.commit(), None);
        }
    }

    mod status_entry {
        use super::*;

        #[test]
        fn clean_status_has_no_kinds() {
            let entry = StatusEntry::from_status("a.txt".into(), git2::Status::CURRENT);
            assert!(entry.kinds.is_empty());
        }

        #[test]
        fn worktree_flags() {
            let entry = StatusEntry::from_status("a.txt".into(), git2::Status::WT_MODIFIED);
            assert_eq!(entry.kinds, vec![ChangeKind::Modified]);

            let entry = StatusEntry::from_status("a.txt".into(), git2::Status::WT_DELETED);
            assert_eq!(entry.kinds, vec![ChangeKind::Missing]);

            let entry = StatusEntry::from_status("a.txt".into(), git2::Status::WT_NEW);
            assert_eq!(entry.kinds, vec![ChangeKind::Untracked]);
        }

        #[test]
        fn index_flags() {
            let entry = StatusEntry::from_status("a.txt".into(), git2::Status::INDEX_NEW);
            assert_eq!(entry.kinds, vec![ChangeKind::Added]);

            let entry = StatusEntry::from_status("a.txt".into(), git2::Status::INDEX_DELETED);
            assert_eq!(entry.kinds, vec![ChangeKind::Removed]);

            let entry = StatusEntry::from_status("a.txt".into(), git2::Status::INDEX_MODIFIED);
            assert_eq!(entry.kinds, vec![ChangeKind::Staged]);
        }

        #[test]
        fn combined_flags() {
            let entry = StatusEntry::from_status(
                "a.txt".into(),
                git2::Status::INDEX_MODIFIED | git2::Status::WT_MODIFIED,
            );
            assert_eq!(entry.kinds, vec![ChangeKind::Staged, ChangeKind::Modified]);

            let entry = StatusEntry::from_status("a.txt".into(), git2::Status::CONFLICTED);
            assert_eq!(entry.kinds, vec![ChangeKind::Conflicting]);
        }
    }
}
