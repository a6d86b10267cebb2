//! version::provider
//!
//! Hands out evaluators that share one reachability index and one
//! processor registry.
//!
//! A build tool evaluating many projects in the same repository keeps a
//! single provider around. Every evaluator it creates reuses the index, so
//! the history is walked once per HEAD no matter how many projects ask.
//!
//! ```no_run
//! use gitversioning::git::Git;
//! use gitversioning::version::EvaluatorProvider;
//! use std::path::Path;
//!
//! let provider = EvaluatorProvider::new();
//! let git = Git::open(Path::new(".")).unwrap();
//! for module in ["core", "cli"] {
//!     let version = provider
//!         .for_repository(&git)
//!         .unwrap()
//!         .sub_directory(module)
//!         .version()
//!         .unwrap();
//!     println!("{module}: {version}");
//! }
//! ```

use std::sync::Arc;

use crate::git::Git;

use super::error::VersionError;
use super::evaluator::VersionEvaluator;
use super::reachability::ReachabilityIndex;
use super::registry::{ProcessorOptions, ProcessorRegistry};

/// Factory for [`VersionEvaluator`]s.
#[derive(Debug, Default)]
pub struct EvaluatorProvider {
    index: Arc<ReachabilityIndex>,
    registry: ProcessorRegistry,
}

impl EvaluatorProvider {
    /// A provider with the built-in processors and an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider using `registry` for processor selection.
    pub fn with_registry(registry: ProcessorRegistry) -> Self {
        Self {
            index: ReachabilityIndex::shared(),
            registry,
        }
    }

    /// The processor registry.
    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// Mutable access to the registry, to install processors.
    pub fn registry_mut(&mut self) -> &mut ProcessorRegistry {
        &mut self.registry
    }

    /// The shared reachability index.
    pub fn index(&self) -> &Arc<ReachabilityIndex> {
        &self.index
    }

    /// An evaluator using the highest-precedence processor.
    pub fn for_repository<'r>(&self, git: &'r Git) -> Result<VersionEvaluator<'r>, VersionError> {
        self.for_repository_with(git, None, &ProcessorOptions::default())
    }

    /// An evaluator using the named processor, or the highest-precedence one
    /// for `None`.
    ///
    /// # Errors
    ///
    /// - [`VersionError::UnknownProcessor`] if `name` is not registered
    pub fn for_repository_with<'r>(
        &self,
        git: &'r Git,
        name: Option<&str>,
        options: &ProcessorOptions,
    ) -> Result<VersionEvaluator<'r>, VersionError> {
        let processor = self.registry.select(name, options)?;
        Ok(VersionEvaluator::for_repository(git)
            .boxed_tag_processor(processor)
            .reachability_index(Arc::clone(&self.index)))
    }
}
