//! gitversioning - Derive project versions from git tags
//!
//! Given a repository and optionally a sub-directory, find the latest
//! version tag reachable from HEAD and turn it into a version string:
//! the tag's version for a clean checkout of a release, a development
//! version otherwise.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (the `gitversion` binary)
//! - [`core`] - Validated types and configuration
//! - [`git`] - Single interface for all Git operations
//! - [`version`] - Tag filtering, ranking, reachability and processors
//!
//! # Guarantees
//!
//! 1. The repository is only ever read
//! 2. A tag that is not an ancestor of HEAD never determines the version
//! 3. Repeated evaluations of an unchanged repository agree
//! 4. Each HEAD's history is walked at most once per shared index

pub mod cli;
pub mod core;
pub mod git;
pub mod version;
