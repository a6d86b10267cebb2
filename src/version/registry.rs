//! version::registry
//!
//! Processor selection.
//!
//! # Design
//!
//! Hosts choose tag processors through a [`ProcessorRegistry`] instead of
//! naming concrete types. The registry maps names to factories, each with
//! a precedence. Without an explicit name the highest-precedence entry is
//! used (earliest registration wins ties), so installing a processor with
//! a precedence above 0 replaces the built-in default.
//!
//! # Built-ins
//!
//! | name        | precedence | processor                    |
//! |-------------|-----------:|------------------------------|
//! | `maven`     | 0          | [`MavenStyleTagProcessor`]   |
//! | `describe`  | -10        | [`DescribeTagProcessor`]     |
//! | `timestamp` | -20        | [`TimestampTagProcessor`]    |
//!
//! # Example
//!
//! ```
//! use gitversioning::version::{ProcessorOptions, ProcessorRegistry};
//!
//! let registry = ProcessorRegistry::default();
//! assert_eq!(registry.names(), vec!["maven", "describe", "timestamp"]);
//!
//! let processor = registry.select(Some("describe"), &ProcessorOptions::default());
//! assert!(processor.is_ok());
//! assert!(registry.select(Some("calver"), &ProcessorOptions::default()).is_err());
//! ```

use std::sync::Arc;

use super::error::VersionError;
use super::processor::{
    DescribeTagProcessor, MavenStyleTagProcessor, TagProcessor, TimestampTagProcessor,
};

/// Settings passed to processor factories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessorOptions {
    /// Development suffix, for processors that use one
    pub suffix: Option<String>,
}

/// Creates a processor from options.
pub type ProcessorFactory =
    Arc<dyn Fn(&ProcessorOptions) -> Box<dyn TagProcessor> + Send + Sync>;

/// Processors shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinProcessor {
    /// Release or `-SNAPSHOT`
    Maven,
    /// `git describe` style
    Describe,
    /// HEAD commit timestamp
    Timestamp,
}

impl BuiltinProcessor {
    /// All built-in processors, in precedence order.
    pub fn all() -> &'static [BuiltinProcessor] {
        &[
            BuiltinProcessor::Maven,
            BuiltinProcessor::Describe,
            BuiltinProcessor::Timestamp,
        ]
    }

    /// Registry name.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinProcessor::Maven => "maven",
            BuiltinProcessor::Describe => "describe",
            BuiltinProcessor::Timestamp => "timestamp",
        }
    }

    /// Registry precedence.
    pub fn precedence(&self) -> i32 {
        match self {
            BuiltinProcessor::Maven => 0,
            BuiltinProcessor::Describe => -10,
            BuiltinProcessor::Timestamp => -20,
        }
    }

    /// Parse a built-in name (case-insensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use gitversioning::version::BuiltinProcessor;
    ///
    /// assert_eq!(BuiltinProcessor::parse("Maven"), Some(BuiltinProcessor::Maven));
    /// assert_eq!(BuiltinProcessor::parse("semver"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "maven" => Some(BuiltinProcessor::Maven),
            "describe" => Some(BuiltinProcessor::Describe),
            "timestamp" => Some(BuiltinProcessor::Timestamp),
            _ => None,
        }
    }

    /// Instantiate with the given options.
    pub fn create(&self, options: &ProcessorOptions) -> Box<dyn TagProcessor> {
        match self {
            BuiltinProcessor::Maven => {
                let processor = MavenStyleTagProcessor::new();
                match &options.suffix {
                    Some(suffix) => Box::new(processor.with_suffix(suffix.clone())),
                    None => Box::new(processor),
                }
            }
            BuiltinProcessor::Describe => Box::new(DescribeTagProcessor::new()),
            BuiltinProcessor::Timestamp => Box::new(TimestampTagProcessor::new()),
        }
    }
}

impl std::fmt::Display for BuiltinProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

struct Registration {
    name: String,
    precedence: i32,
    factory: ProcessorFactory,
}

/// Named processor factories with precedence.
pub struct ProcessorRegistry {
    // Sorted by descending precedence, stable for equal precedence
    entries: Vec<Registration>,
}

impl std::fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ProcessorRegistry {
    /// A registry without any processor.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A registry holding the built-in processors.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for builtin in BuiltinProcessor::all() {
            let builtin = *builtin;
            registry.register(
                builtin.name(),
                builtin.precedence(),
                Arc::new(move |options: &ProcessorOptions| builtin.create(options)),
            );
        }
        registry
    }

    /// Register a factory, replacing any entry with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        precedence: i32,
        factory: ProcessorFactory,
    ) -> &mut Self {
        let name = name.into();
        self.entries.retain(|entry| entry.name != name);

        let position = self
            .entries
            .iter()
            .position(|entry| entry.precedence < precedence)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            position,
            Registration {
                name,
                precedence,
                factory,
            },
        );
        self
    }

    /// Registered names, highest precedence first.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Whether a processor is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn find(&self, name: &str) -> Option<&Registration> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Create the named processor, or the highest-precedence one.
    ///
    /// # Errors
    ///
    /// - [`VersionError::UnknownProcessor`] if nothing matches
    pub fn select(
        &self,
        name: Option<&str>,
        options: &ProcessorOptions,
    ) -> Result<Box<dyn TagProcessor>, VersionError> {
        let entry = match name {
            Some(name) => self.find(name),
            None => self.entries.first(),
        };

        match entry {
            Some(entry) => {
                tracing::debug!(processor = %entry.name, "selected tag processor");
                Ok((entry.factory)(options))
            }
            None => Err(VersionError::UnknownProcessor {
                name: name.unwrap_or("<default>").to_string(),
                available: self.names().join(", "),
            }),
        }
    }
}
