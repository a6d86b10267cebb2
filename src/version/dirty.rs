//! version::dirty
//!
//! Working tree modification, scoped to a sub-directory.
//!
//! A change anywhere under the sub-directory, in any status category
//! (modified, untracked, staged, missing, conflicting, added, removed),
//! makes the tree dirty. Changes elsewhere are ignored. Prefixes match
//! whole path components: `core` covers `core/lib.rs` but not
//! `core-utils/lib.rs`.
//!
//! Nothing here is cached; the work tree may change between evaluations.

use std::path::Path;

use crate::git::{Git, StatusEntry};

use super::error::VersionError;

/// Uncommitted changes under `sub_dir`, or anywhere when `sub_dir` is `None`.
///
/// # Errors
///
/// Fails if the status cannot be read. There is no safe default for
/// "dirty or not", so the failure is surfaced.
pub fn changes_under(git: &Git, sub_dir: Option<&Path>) -> Result<Vec<StatusEntry>, VersionError> {
    let entries = git.status_entries()?;
    Ok(entries
        .into_iter()
        .filter(|entry| touches(&entry.path, sub_dir))
        .collect())
}

/// Whether the work tree has uncommitted changes under `sub_dir`.
pub fn is_dirty(git: &Git, sub_dir: Option<&Path>) -> Result<bool, VersionError> {
    let changes = changes_under(git, sub_dir)?;
    if let Some(first) = changes.first() {
        tracing::debug!(
            path = %first.path,
            kinds = ?first.kinds,
            total = changes.len(),
            "work tree is dirty"
        );
    }
    Ok(!changes.is_empty())
}

fn touches(path: &str, sub_dir: Option<&Path>) -> bool {
    match sub_dir {
        Some(sub_dir) => Path::new(path).starts_with(sub_dir),
        None => true,
    }
}
