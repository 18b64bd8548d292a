//! Sharded LRU cache.
//!
//! Fans a single logical LRU out over N independent slices so that
//! operations on different keys contend on different mutexes. Each slice
//! is a full [`LruCache`] of capacity `⌈C / N⌉`; a key is routed to its
//! slice by hash and never migrates.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    ShardedLruCache<K, V>                     │
//! │                                                              │
//! │   selector: hash(key) mod N                                  │
//! │        │                                                     │
//! │        ├──► slice 0: LruCache, cap ⌈C/N⌉                     │
//! │        ├──► slice 1: LruCache, cap ⌈C/N⌉                     │
//! │        └──► slice N-1: ...                                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no cross-slice coordination. Eviction is per slice, so the
//! global eviction order is only approximately LRU, and the global bound
//! is `N · ⌈C / N⌉`, which can exceed `C` by up to `N - 1` entries.

use std::hash::Hash;
use std::thread;

use crate::ds::shard::SliceSelector;
use crate::policy::lru::LruCache;
use crate::traits::Cache;

/// Thread-safe LRU sharded over independently locked slices.
///
/// A slice count of 0 selects the hardware concurrency hint.
///
/// # Example
///
/// ```
/// use arckit::policy::sharded_lru::ShardedLruCache;
/// use arckit::traits::Cache;
///
/// let cache = ShardedLruCache::new(64, 4);
/// cache.put("k", 1);
/// assert_eq!(cache.get(&"k"), Some(1));
/// ```
#[derive(Debug)]
pub struct ShardedLruCache<K, V> {
    slices: Vec<LruCache<K, V>>,
    selector: SliceSelector,
}

impl<K, V> ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache of total capacity `capacity` spread over `slices`
    /// slices. Passing 0 slices uses the hardware concurrency hint.
    pub fn new(capacity: usize, slices: usize) -> Self {
        let slices = if slices == 0 {
            thread::available_parallelism().map_or(1, usize::from)
        } else {
            slices
        };
        let slice_capacity = capacity.div_ceil(slices.max(1));
        let selector = SliceSelector::new(slices, 0);
        let slices = (0..selector.slice_count())
            .map(|_| LruCache::new(slice_capacity))
            .collect();
        Self { slices, selector }
    }

    pub fn put(&self, key: K, value: V) {
        self.slice_for(&key).put(key, value);
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.slice_for(key).get(key)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.slice_for(key).remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slice_for(key).contains(key)
    }

    /// Total resident entries, summed over slices. Each slice is locked in
    /// turn, so the result is a point-in-time approximation under
    /// concurrent writes.
    pub fn len(&self) -> usize {
        self.slices.iter().map(LruCache::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.iter().all(LruCache::is_empty)
    }

    /// Global capacity: `slice_count · ⌈C / N⌉`, which may exceed the
    /// requested total by up to `N - 1`.
    pub fn capacity(&self) -> usize {
        self.slices.iter().map(LruCache::capacity).sum()
    }

    pub fn slice_count(&self) -> usize {
        self.selector.slice_count()
    }

    pub fn clear(&self) {
        for slice in &self.slices {
            slice.clear();
        }
    }

    fn slice_for(&self, key: &K) -> &LruCache<K, V> {
        &self.slices[self.selector.slice_for_key(key)]
    }
}

impl<K, V> Cache<K, V> for ShardedLruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        ShardedLruCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        ShardedLruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        ShardedLruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        ShardedLruCache::len(self)
    }

    fn capacity(&self) -> usize {
        ShardedLruCache::capacity(self)
    }
}
