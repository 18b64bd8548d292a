//! # Cache Trait
//!
//! The shared public contract implemented by every eviction policy in this
//! crate. All caches are internally synchronized, so the whole interface
//! takes `&self` and is safe to call from multiple threads.
//!
//! ```text
//!                 ┌──────────────────────────────────────────┐
//!                 │              Cache<K, V>                 │
//!                 │                                          │
//!                 │  put(&self, K, V)                        │
//!                 │  get(&self, &K) → Option<V>              │
//!                 │  get_or_default(&self, &K) → V           │
//!                 │  contains(&self, &K) → bool              │
//!                 │  len / is_empty / capacity               │
//!                 └──────┬──────────┬──────────┬─────────┬───┘
//!                        │          │          │         │
//!                   LruCache   LrukCache   ArcCache  ShardedLruCache
//! ```
//!
//! ## Semantics shared by all implementors
//!
//! | Operation        | Contract                                              |
//! |------------------|-------------------------------------------------------|
//! | `put`            | Insert or update; counts as an access                 |
//! | `get`            | Hit renews recency; miss mutates nothing resident     |
//! | `get_or_default` | Convenience over `get`; never inserts the default     |
//! | `contains`       | Existence probe; does not affect eviction order       |
//!
//! Values are returned by clone: ghost demotion drops the value and live
//! mutation uses assignment, so `V: Clone` is the baseline bound. `Copy`
//! keys are not required, but keys must be hashable and comparable.
//!
//! LRU-K is the one policy whose `get` may mutate on a miss: misses feed
//! its access history, which is how the admission filter works. That state
//! is bookkeeping about the key, never a materialized value.

use std::hash::Hash;

/// Common operations across all cache variants.
///
/// # Example
///
/// ```
/// use arckit::traits::Cache;
/// use arckit::policy::lru::LruCache;
///
/// fn warm<C: Cache<u64, String>>(cache: &C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let cache = LruCache::new(100);
/// warm(&cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Inserts or updates the value for `key`.
    ///
    /// Updating an existing key counts as an access and renews its recency
    /// position. Inserting into a zero-capacity cache is a silent no-op.
    fn put(&self, key: K, value: V);

    /// Looks up `key`, returning a clone of the value on a hit.
    ///
    /// A hit counts as an access. A miss returns `None` and never
    /// materializes a value into the cache.
    fn get(&self, key: &K) -> Option<V>;

    /// Looks up `key`, returning `V::default()` on a miss.
    ///
    /// The default is constructed for the caller only; it is never
    /// stored.
    ///
    /// # Example
    ///
    /// ```
    /// use arckit::traits::Cache;
    /// use arckit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u64, i32> = LruCache::new(10);
    /// cache.put(1, 7);
    /// assert_eq!(cache.get_or_default(&1), 7);
    /// assert_eq!(cache.get_or_default(&99), 0);
    /// assert_eq!(cache.len(), 1); // the miss inserted nothing
    /// ```
    fn get_or_default(&self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }

    /// Returns `true` if `key` is resident, without touching recency state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if no entries are resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured capacity.
    ///
    /// For ARC this is the construction-time total; the live capacities of
    /// the two halves drift around it as the balance adapts. For the
    /// sharded variant the effective global bound is `slices * ⌈C/slices⌉`,
    /// which may exceed the requested total.
    fn capacity(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::arc::ArcCache;
    use crate::policy::lru::LruCache;
    use crate::policy::lru_k::LrukCache;
    use crate::policy::sharded_lru::ShardedLruCache;

    fn exercise<C: Cache<u64, String>>(cache: &C) {
        cache.put(1, "one".to_string());
        // For LRU-K this second access is the one that admits the key.
        assert_eq!(cache.get(&1), Some("one".to_string()));
        assert!(cache.contains(&1));
        assert_eq!(cache.get_or_default(&1), "one".to_string());
        assert_eq!(cache.get_or_default(&999), String::new());
        assert!(!cache.is_empty());
    }

    #[test]
    fn all_variants_satisfy_the_contract() {
        exercise(&LruCache::new(8));
        exercise(&LrukCache::new(8, 16, 2));
        exercise(&ArcCache::new(8, 2));
        exercise(&ShardedLruCache::new(8, 2));
    }

    #[test]
    fn contract_is_object_safe_enough_for_generics() {
        fn put_many<C: Cache<u64, u64>>(cache: &C, n: u64) {
            for i in 0..n {
                cache.put(i, i * 2);
            }
        }
        let cache = LruCache::new(4);
        put_many(&cache, 10);
        assert_eq!(cache.len(), 4);
    }
}
