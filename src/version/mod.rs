//! version
//!
//! Version derivation from git tags.
//!
//! # Pipeline
//!
//! - [`filter`]: tag name to version text ([`TagFilter`], [`DefaultTagFilter`])
//! - [`loose`]: lenient semver parsing for ranking
//! - [`reachability`]: per-HEAD cache of reachable commits
//! - [`resolve`]: ranking and winner selection
//! - [`dirty`]: sub-directory scoped work tree checks
//! - [`processor`]: final version policy ([`TagProcessor`])
//! - [`registry`]: named processor selection
//! - [`evaluator`]: the facade tying it all together
//! - [`provider`]: evaluators sharing an index
//!
//! # Example
//!
//! ```no_run
//! use gitversioning::git::Git;
//! use gitversioning::version::VersionEvaluator;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new(".")).unwrap();
//! let version = VersionEvaluator::for_repository(&git).version().unwrap();
//! println!("{version}");
//! ```

pub mod dirty;
mod error;
pub mod evaluator;
pub mod filter;
pub mod loose;
pub mod processor;
pub mod provider;
pub mod reachability;
pub mod registry;
pub mod resolve;

pub use dirty::{changes_under, is_dirty};
pub use error::VersionError;
pub use evaluator::{Evaluation, VersionEvaluator};
pub use filter::{DefaultTagFilter, TagFilter, VERSION_PATTERN};
pub use loose::{parse_loose, LooseVersionError};
pub use processor::{
    DescribeTagProcessor, MavenStyleTagProcessor, TagProcessor, TimestampTagProcessor,
    SNAPSHOT_SUFFIX,
};
pub use provider::EvaluatorProvider;
pub use reachability::ReachabilityIndex;
pub use registry::{BuiltinProcessor, ProcessorFactory, ProcessorOptions, ProcessorRegistry};
pub use resolve::{Candidate, ResolvedVersion, NO_TAG_VERSION};
