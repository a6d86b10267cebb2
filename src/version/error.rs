//! version::error
//!
//! Errors surfaced by version evaluation.
//!
//! Only conditions the caller must react to end up here. Degradable
//! situations (no commits yet, a tag pointing at a tree, an unreadable
//! history) are absorbed inside the engine and never produce an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::git::GitError;

/// Errors from version evaluation.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The tag filter pattern does not compile.
    #[error("invalid tag pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compilation failure
        #[source]
        source: regex::Error,
    },

    /// The tag filter pattern has no capture group for the version.
    #[error("tag pattern '{pattern}' has no capture group")]
    MissingCaptureGroup {
        /// The offending pattern
        pattern: String,
    },

    /// A tag filter extracted text that is not a version, even loosely.
    #[error("failed to parse version '{version}' extracted from tag '{tag}': {message}")]
    UnparsableVersion {
        /// The tag the text was extracted from
        tag: String,
        /// The extracted text
        version: String,
        /// Why parsing failed
        message: String,
    },

    /// The sub-directory does not lie inside the work tree.
    #[error("sub-directory '{path}' is outside the work tree '{work_dir}'")]
    SubDirectoryOutsideWorkTree {
        /// The requested sub-directory
        path: PathBuf,
        /// The repository work tree
        work_dir: PathBuf,
    },

    /// No tag processor registered under the requested name.
    #[error("unknown tag processor '{name}', must be one of: {available}")]
    UnknownProcessor {
        /// The requested name
        name: String,
        /// Registered names, comma separated
        available: String,
    },

    /// Repository access failed.
    #[error(transparent)]
    Git(#[from] GitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_version_names_tag() {
        let err = VersionError::UnparsableVersion {
            tag: "v1.x".to_string(),
            version: "1.x".to_string(),
            message: "unexpected character".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("v1.x"));
        assert!(msg.contains("'1.x'"));
    }

    #[test]
    fn git_errors_pass_through() {
        let err: VersionError = GitError::BareRepo.into();
        assert_eq!(err.to_string(), "bare repository not supported");
    }
}
