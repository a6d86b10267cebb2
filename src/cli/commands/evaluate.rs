//! evaluate command - Print the version derived from the repository's tags
//!
//! Settings are merged from config files and flags (flags win), then a
//! single evaluation runs against the repository containing the working
//! directory.

use crate::cli::args::EvaluationArgs;
use crate::cli::Context;
use crate::core::config::{Config, RepoDirs};
use crate::git::Git;
use crate::version::{DefaultTagFilter, EvaluatorProvider, ProcessorOptions};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Effective evaluation settings after applying precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Sub-directory scoping the dirty check
    pub sub_dir: Option<PathBuf>,
    /// Regex prepended to the tag pattern
    pub prefix: Option<String>,
    /// Tag pattern replacing the default
    pub pattern: Option<String>,
    /// Processor name
    pub processor: String,
    /// Development suffix
    pub suffix: Option<String>,
}

impl Settings {
    /// Merge flags over config.
    ///
    /// A `--sub-dir` flag is relative to `cwd`; a configured sub-directory
    /// is relative to the work tree.
    pub fn merge(config: &Config, args: &EvaluationArgs, cwd: &Path) -> Self {
        let sub_dir = match &args.sub_dir {
            Some(sub_dir) => Some(cwd.join(sub_dir)),
            None => config.sub_directory().map(Path::to_path_buf),
        };

        Self {
            sub_dir,
            prefix: args
                .prefix
                .clone()
                .or_else(|| config.tag_prefix().map(str::to_string)),
            pattern: args
                .pattern
                .clone()
                .or_else(|| config.tag_pattern().map(str::to_string)),
            processor: args
                .processor
                .clone()
                .unwrap_or_else(|| config.processor().to_string()),
            suffix: args
                .suffix
                .clone()
                .or_else(|| config.snapshot_suffix().map(str::to_string)),
        }
    }

    /// The tag filter these settings describe.
    pub fn tag_filter(&self) -> DefaultTagFilter {
        let mut filter = DefaultTagFilter::new();
        if let Some(pattern) = &self.pattern {
            filter = filter.pattern(pattern.as_str());
        }
        if let Some(prefix) = &self.prefix {
            filter = filter.prepend(prefix);
        }
        filter
    }
}

/// Evaluate and print the version.
pub fn evaluate(ctx: &Context, args: &EvaluationArgs) -> Result<()> {
    let cwd = ctx.cwd()?;
    let git = Git::open(&cwd).context("Failed to open repository")?;
    let work_dir = git.work_dir()?.to_path_buf();

    let dirs = RepoDirs {
        work_dir: &work_dir,
        git_dir: git.git_dir(),
    };
    let loaded = Config::load(Some(dirs)).context("Failed to load configuration")?;
    for warning in &loaded.warnings {
        tracing::warn!(path = %warning.path.display(), "{}", warning.message);
    }
    let settings = Settings::merge(&loaded.config, args, &cwd);
    tracing::debug!(?settings, "effective settings");

    let provider = EvaluatorProvider::new();
    let options = ProcessorOptions {
        suffix: settings.suffix.clone(),
    };
    let mut evaluator = provider
        .for_repository_with(&git, Some(settings.processor.as_str()), &options)?
        .tag_filter(settings.tag_filter());
    if let Some(sub_dir) = &settings.sub_dir {
        evaluator = evaluator.sub_directory(sub_dir);
    }

    if args.json {
        let evaluation = evaluator.evaluate().context("Failed to evaluate version")?;
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        let version = evaluator.version().context("Failed to evaluate version")?;
        println!("{}", version);
    }

    Ok(())
}
