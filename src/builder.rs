//! Runtime policy selection.
//!
//! The concrete cache types are all directly constructible; this module is
//! for callers that pick the eviction policy from configuration rather
//! than at compile time. [`CacheBuilder`] pairs a capacity with a
//! [`CachePolicy`] and yields a boxed [`Cache`] trait object.

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::arc::ArcCache;
use crate::policy::lru::LruCache;
use crate::policy::lru_k::LrukCache;
use crate::policy::sharded_lru::ShardedLruCache;
use crate::traits::Cache;

/// Which eviction policy to build, with its policy-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Plain least-recently-used.
    Lru,
    /// LRU with K-access admission filtering.
    LruK { history_capacity: usize, k: u64 },
    /// Adaptive replacement over recency and frequency halves.
    Arc { transform_threshold: u64 },
    /// LRU sharded over independently locked slices. A slice count of 0
    /// uses the hardware concurrency hint.
    ShardedLru { slices: usize },
}

/// Builder for a boxed cache with a runtime-chosen policy.
///
/// # Example
///
/// ```
/// use arckit::builder::{CacheBuilder, CachePolicy};
///
/// let cache = CacheBuilder::new(1024)
///     .policy(CachePolicy::Arc { transform_threshold: 2 })
///     .build::<u64, String>();
///
/// cache.put(1, "one".to_string());
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
    policy: CachePolicy,
}

impl CacheBuilder {
    /// Starts a builder with the given total capacity and the plain LRU
    /// policy.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: CachePolicy::Lru,
        }
    }

    /// Selects the eviction policy.
    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the cache, clamping out-of-range thresholds the way the
    /// infallible constructors do.
    pub fn build<K, V>(self) -> Box<dyn Cache<K, V>>
    where
        K: Eq + Hash + Clone + 'static,
        V: Clone + 'static,
    {
        match self.policy {
            CachePolicy::Lru => Box::new(LruCache::new(self.capacity)),
            CachePolicy::LruK {
                history_capacity,
                k,
            } => Box::new(LrukCache::new(self.capacity, history_capacity, k)),
            CachePolicy::Arc {
                transform_threshold,
            } => Box::new(ArcCache::new(self.capacity, transform_threshold)),
            CachePolicy::ShardedLru { slices } => {
                Box::new(ShardedLruCache::new(self.capacity, slices))
            },
        }
    }

    /// Builds the cache, rejecting out-of-range thresholds instead of
    /// clamping.
    pub fn try_build<K, V>(self) -> Result<Box<dyn Cache<K, V>>, ConfigError>
    where
        K: Eq + Hash + Clone + 'static,
        V: Clone + 'static,
    {
        let cache: Box<dyn Cache<K, V>> = match self.policy {
            CachePolicy::Lru => Box::new(LruCache::new(self.capacity)),
            CachePolicy::LruK {
                history_capacity,
                k,
            } => Box::new(LrukCache::try_new(self.capacity, history_capacity, k)?),
            CachePolicy::Arc {
                transform_threshold,
            } => Box::new(ArcCache::try_new(self.capacity, transform_threshold)?),
            CachePolicy::ShardedLru { slices } => {
                Box::new(ShardedLruCache::new(self.capacity, slices))
            },
        };
        Ok(cache)
    }
}
