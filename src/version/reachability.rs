//! version::reachability
//!
//! Per-head cache of the commits reachable from that head.
//!
//! # Invariants
//!
//! - An entry never changes once computed. History is immutable, so a
//!   moved head is simply a new key; entries for old heads stay around
//!   unused and are never invalidated.
//! - Concurrent queries for the same head walk the history at most once.
//!   Later callers block until the first walk finishes and then share
//!   its result.
//! - A failed walk caches an empty set for that head. Callers treat
//!   "nothing reachable" as "no version tag", which is the intended
//!   degradation.
//!
//! The index is an explicit object rather than process-global state:
//! whoever runs evaluations decides its scope by sharing one
//! `Arc<ReachabilityIndex>` between evaluators.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;

use crate::core::types::Oid;
use crate::git::Git;

type ReachableSet = Arc<HashSet<Oid>>;

/// Concurrency-safe cache of reachable commits keyed by head commit.
#[derive(Debug, Default)]
pub struct ReachabilityIndex {
    by_head: DashMap<Oid, Arc<OnceCell<ReachableSet>>>,
    walks: AtomicUsize,
}

impl ReachabilityIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index ready to be shared between evaluators.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Commits reachable from `head`, including `head` itself.
    ///
    /// `None` (no commits yet) yields an empty set without touching the
    /// cache.
    pub fn reachable(&self, git: &Git, head: Option<&Oid>) -> ReachableSet {
        let head = match head {
            Some(head) => head,
            None => return Arc::new(HashSet::new()),
        };

        // Release the map shard before walking so other heads stay available
        let cell = self.by_head.entry(head.clone()).or_default().value().clone();

        if let Some(set) = cell.get() {
            tracing::debug!(head = %head.short(7), commits = set.len(), "reachability cache hit");
            return Arc::clone(set);
        }

        Arc::clone(cell.get_or_init(|| self.walk(git, head)))
    }

    fn walk(&self, git: &Git, head: &Oid) -> ReachableSet {
        self.walks.fetch_add(1, Ordering::SeqCst);

        match git.walk_ancestry(head) {
            Ok(commits) => {
                let set: HashSet<Oid> = commits.into_iter().collect();
                tracing::debug!(head = %head.short(7), commits = set.len(), "walked ancestry");
                Arc::new(set)
            }
            Err(e) => {
                tracing::warn!(head = %head.short(7), error = %e, "ancestry walk failed, treating as empty");
                Arc::new(HashSet::new())
            }
        }
    }

    /// Number of ancestry walks performed so far.
    pub fn walk_count(&self) -> usize {
        self.walks.load(Ordering::SeqCst)
    }

    /// Number of heads with a cache entry.
    pub fn cached_heads(&self) -> usize {
        self.by_head.len()
    }

    /// Whether `head` has a cache entry.
    pub fn contains(&self, head: &Oid) -> bool {
        self.by_head.contains_key(head)
    }
}
