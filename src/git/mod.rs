//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads flow
//! through this interface. No other module should import `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - HEAD resolution (unborn-aware)
//! - Tag enumeration and one-level tag dereferencing
//! - Ancestry walks and commit counting
//! - Working tree status by category
//!
//! # Invariants
//!
//! - Read-only: no ref, object, index or work tree writes
//! - No other module calls git2 directly
//! - All operations return strong types (Oid, RefName)
//!
//! # Example
//!
//! ```ignore
//! use gitversioning::git::{Git, TagTarget};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for tag in git.list_tags()? {
//!     if let TagTarget::AnnotatedTag(commit) = git.tag_target(&tag.oid)? {
//!         println!("{} annotates {}", tag.name, commit.short(7));
//!     }
//! }
//! ```

mod interface;

pub use interface::{ChangeKind, Git, GitError, RefEntry, StatusEntry, TagTarget};
