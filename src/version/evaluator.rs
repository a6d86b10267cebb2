//! version::evaluator
//!
//! The version evaluator facade.
//!
//! # Lifecycle
//!
//! Each call to [`VersionEvaluator::version`] runs the whole pipeline:
//!
//! 1. Resolve HEAD (no commits yet is not an error)
//! 2. Look up the commits reachable from HEAD in the [`ReachabilityIndex`]
//! 3. Rank version tags and select the best reachable one
//! 4. Hand the result to the [`TagProcessor`], which checks dirtiness if
//!    its policy needs it
//!
//! Nothing is remembered between calls except what the shared index holds,
//! so repeated calls agree as long as the repository and work tree do.
//!
//! # Example
//!
//! ```no_run
//! use gitversioning::git::Git;
//! use gitversioning::version::{DefaultTagFilter, VersionEvaluator};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let version = VersionEvaluator::for_repository(&git)
//!     .sub_directory("modules/api")
//!     .tag_filter(DefaultTagFilter::new().prepend("api-v"))
//!     .version()
//!     .unwrap();
//! println!("{version}");
//! ```

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::core::types::Oid;
use crate::git::Git;

use super::dirty::is_dirty;
use super::error::VersionError;
use super::filter::{DefaultTagFilter, TagFilter};
use super::processor::{MavenStyleTagProcessor, TagProcessor};
use super::reachability::ReachabilityIndex;
use super::resolve::{resolve_latest, ResolvedVersion};

/// Everything known about one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Final version string
    pub version: String,
    /// Version extracted from the winning tag, or `0.0.0`
    pub base_version: String,
    /// Name of the winning tag
    pub tag: Option<String>,
    /// Commit designated by the winning tag
    pub commit: Option<Oid>,
    /// Whether the relevant part of the work tree has uncommitted changes
    pub dirty: bool,
}

/// Configurable version evaluator for one repository.
///
/// The repository is borrowed for the evaluator's lifetime and only read.
pub struct VersionEvaluator<'r> {
    git: &'r Git,
    sub_dir: Option<PathBuf>,
    filter: Box<dyn TagFilter>,
    processor: Box<dyn TagProcessor>,
    index: Arc<ReachabilityIndex>,
}

impl std::fmt::Debug for VersionEvaluator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionEvaluator")
            .field("git", self.git)
            .field("sub_dir", &self.sub_dir)
            .finish()
    }
}

impl<'r> VersionEvaluator<'r> {
    /// Create an evaluator with the default filter and processor and a
    /// private reachability index.
    pub fn for_repository(git: &'r Git) -> Self {
        Self {
            git,
            sub_dir: None,
            filter: Box::new(DefaultTagFilter::new()),
            processor: Box::new(MavenStyleTagProcessor::new()),
            index: ReachabilityIndex::shared(),
        }
    }

    /// Restrict dirtiness checks to a sub-directory of the work tree.
    ///
    /// Absolute paths are made relative to the work tree when the
    /// evaluation runs.
    pub fn sub_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.sub_dir = Some(path.into());
        self
    }

    /// Use a different tag filter.
    pub fn tag_filter(self, filter: impl TagFilter + 'static) -> Self {
        self.boxed_tag_filter(Box::new(filter))
    }

    /// Use an already boxed tag filter.
    pub fn boxed_tag_filter(mut self, filter: Box<dyn TagFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Use a different tag processor.
    pub fn tag_processor(self, processor: impl TagProcessor + 'static) -> Self {
        self.boxed_tag_processor(Box::new(processor))
    }

    /// Use an already boxed tag processor.
    pub fn boxed_tag_processor(mut self, processor: Box<dyn TagProcessor>) -> Self {
        self.processor = processor;
        self
    }

    /// Share a reachability index with other evaluators.
    pub fn reachability_index(mut self, index: Arc<ReachabilityIndex>) -> Self {
        self.index = index;
        self
    }

    /// The sub-directory relative to the work tree, `None` for the whole tree.
    ///
    /// # Errors
    ///
    /// - [`VersionError::SubDirectoryOutsideWorkTree`] if the path leaves
    ///   the work tree
    pub fn relative_sub_dir(&self) -> Result<Option<PathBuf>, VersionError> {
        match &self.sub_dir {
            Some(sub_dir) => relative_to_work_tree(self.git.work_dir()?, sub_dir),
            None => Ok(None),
        }
    }

    /// Find the latest version tag reachable from HEAD.
    pub fn resolve(&self) -> Result<ResolvedVersion, VersionError> {
        self.filter.validate()?;

        let head = self.git.try_head_oid()?;
        let reachable = self.index.reachable(self.git, head.as_ref());
        resolve_latest(self.git, self.filter.as_ref(), &reachable)
    }

    /// Evaluate the version string.
    ///
    /// # Errors
    ///
    /// Configuration errors (bad pattern, unparsable tag version, bad
    /// sub-directory) and repository access failures. No partial version
    /// is ever returned.
    pub fn version(&self) -> Result<String, VersionError> {
        let sub_dir = self.relative_sub_dir()?;
        let resolved = self.resolve()?;
        self.process(&resolved, sub_dir.as_deref())
    }

    /// Evaluate the version and report how it was derived.
    pub fn evaluate(&self) -> Result<Evaluation, VersionError> {
        let sub_dir = self.relative_sub_dir()?;
        let resolved = self.resolve()?;
        let version = self.process(&resolved, sub_dir.as_deref())?;
        let dirty = is_dirty(self.git, sub_dir.as_deref())?;

        Ok(Evaluation {
            version,
            base_version: resolved.version,
            tag: resolved.tag,
            commit: resolved.commit,
            dirty,
        })
    }

    fn process(
        &self,
        resolved: &ResolvedVersion,
        sub_dir: Option<&Path>,
    ) -> Result<String, VersionError> {
        let version = self.processor.version(
            self.git,
            sub_dir,
            resolved.commit.as_ref(),
            resolved.tag.as_deref(),
            &resolved.version,
        )?;
        tracing::debug!(
            tag = resolved.tag.as_deref().unwrap_or("<none>"),
            base = %resolved.version,
            %version,
            "evaluated version"
        );
        Ok(version)
    }
}

/// Express `sub_dir` relative to `work_dir`, normalizing `.` and `..`.
///
/// An empty result means the whole work tree.
fn relative_to_work_tree(work_dir: &Path, sub_dir: &Path) -> Result<Option<PathBuf>, VersionError> {
    let outside = || VersionError::SubDirectoryOutsideWorkTree {
        path: sub_dir.to_path_buf(),
        work_dir: work_dir.to_path_buf(),
    };

    let relative = if sub_dir.is_absolute() {
        match sub_dir.strip_prefix(work_dir) {
            Ok(relative) => relative.to_path_buf(),
            // Symlinked temp dirs and the like: compare canonical forms
            Err(_) => {
                let work_dir = work_dir.canonicalize().map_err(|_| outside())?;
                let sub_dir = sub_dir.canonicalize().map_err(|_| outside())?;
                sub_dir
                    .strip_prefix(&work_dir)
                    .map_err(|_| outside())?
                    .to_path_buf()
            }
        }
    } else {
        sub_dir.to_path_buf()
    };

    let mut normalized = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(outside());
                }
            }
            Component::Normal(part) => normalized.push(part),
            Component::RootDir | Component::Prefix(_) => return Err(outside()),
        }
    }

    if normalized.as_os_str().is_empty() {
        Ok(None)
    } else {
        Ok(Some(normalized))
    }
}
