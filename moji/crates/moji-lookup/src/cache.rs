//! Memo table owned by the lookup service.

use rustc_hash::FxHashMap;

use crate::message::{Reply, Status};

/// Counters describing how the cache was used over a service lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from the cache.
    pub hits: u64,
    /// Requests that went to the resolver.
    pub misses: u64,
    /// Misses where the reference table was unavailable. Not cached.
    pub failures: u64,
}

impl CacheStats {
    /// Total requests served.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Token to reply map. Entries are never evicted.
///
/// Unresolved placeholders are stored like symbols, so a miss is paid at
/// most once per token whatever the outcome.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: FxHashMap<String, Reply>,
    stats: CacheStats,
}

impl LookupCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `token`, counting a hit or a miss.
    pub fn get(&mut self, token: &str) -> Option<&Reply> {
        match self.entries.get(token) {
            Some(reply) => {
                self.stats.hits += 1;
                Some(reply)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Stores a resolved symbol or placeholder.
    ///
    /// Failed replies are not cacheable and are ignored.
    pub fn insert(&mut self, token: String, reply: Reply) {
        if reply.status != Status::Failed {
            self.entries.insert(token, reply);
        }
    }

    /// Records a miss that could not be resolved because the source failed.
    pub fn record_failure(&mut self) {
        self.stats.failures += 1;
    }

    /// Number of cached tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Usage counters so far.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
