//! Least Recently Used cache.
//!
//! The base policy every other variant in this crate is built from: LRU-K
//! wraps two of these, ARC's halves reuse the same list-plus-index shape,
//! and the sharded variant fans out over N independent instances.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                       LruCore<K, V>                           │
//! │                                                               │
//! │   index: FxHashMap<K, NodeId>     list: RecencyList<Entry>    │
//! │   ┌─────────┬────────┐            front ─► [C] ◄─► [B] ◄─► [A]│
//! │   │  key A  │  id_0  │              MRU                  LRU  │
//! │   │  key B  │  id_1  │                                        │
//! │   │  key C  │  id_2  │            Entry = (key, value,        │
//! │   └─────────┴────────┘                     access_count)      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index owns the entries (through the list's arena) and maps each key
//! to its node handle; the list holds only linkage. Both `put`-update and
//! `get`-hit renew the entry to the front; the access count is bumped on
//! `get`-hit only and plays no role in plain LRU ordering — it exists for
//! the policies layered on top.
//!
//! [`LruCore`] is single-threaded (`&mut self`); [`LruCache`] wraps it in
//! one mutex and is the public, internally synchronized variant.
//!
//! ## Operations
//!
//! | Operation | Time | Notes                                   |
//! |-----------|------|-----------------------------------------|
//! | `put`     | O(1) | Update-or-insert; may evict the back    |
//! | `get`     | O(1) | Hit renews recency and bumps the count  |
//! | `remove`  | O(1) | Arbitrary unlink                        |
//!
//! Capacity 0 is valid: every `put` is a no-op and every `get` misses.

use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::node_arena::NodeId;
use crate::ds::recency_list::RecencyList;
use crate::error::InvariantError;
use crate::traits::Cache;

/// Resident cache record: key, value, and how often it has been hit.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) access_count: u64,
}

/// Single-threaded LRU core: bounded `key → entry` map plus recency list.
#[derive(Debug)]
pub struct LruCore<K, V> {
    list: RecencyList<Entry<K, V>>,
    index: FxHashMap<K, NodeId>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a core with the given capacity. Capacity 0 stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: RecencyList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    /// Inserts or updates `key`. Updates renew recency; inserts evict the
    /// least recent entry when the cache is full, returning the evicted
    /// pair so composed policies can react to it.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
            }
            self.list.move_to_front(id);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict_least_recent()
        } else {
            None
        };

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
            access_count: 1,
        });
        self.index.insert(key, id);
        evicted
    }

    /// Looks up `key`; a hit renews recency and bumps the access count.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        let entry = self.list.get_mut(id)?;
        entry.access_count += 1;
        Some(&entry.value)
    }

    /// Removes `key`, returning its value; no-op when absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    /// Returns the access count recorded for `key`, if resident.
    pub fn access_count(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| entry.access_count)
    }

    /// Verifies the map/list invariants, returning a description of the
    /// first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "list length {} != index length {}",
                self.list.len(),
                self.index.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "resident entries {} exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new("index handle points at wrong entry"));
                },
                None => return Err(InvariantError::new("index handle points at freed node")),
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Returns resident keys ordered front (MRU) to back (LRU).
    pub fn debug_keys_by_recency(&self) -> Vec<K> {
        self.list.iter().map(|entry| entry.key.clone()).collect()
    }

    fn evict_least_recent(&mut self) -> Option<(K, V)> {
        let evicted = self.list.pop_back()?;
        self.index.remove(&evicted.key);
        Some((evicted.key, evicted.value))
    }
}

/// Thread-safe LRU cache: one mutex guarding an [`LruCore`].
///
/// Every public operation holds the lock for its full duration, so
/// operations on a single instance linearize.
///
/// # Example
///
/// ```
/// use arckit::policy::lru::LruCache;
/// use arckit::traits::Cache;
///
/// let cache = LruCache::new(2);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c"); // evicts key 1
///
/// assert_eq!(cache.get(&1), None);
/// assert_eq!(cache.get(&2), Some("b"));
/// assert_eq!(cache.get(&3), Some("c"));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<LruCore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruCore::new(capacity)),
        }
    }

    /// Inserts or updates `key`; an update counts as an access.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Looks up `key`, cloning the value out on a hit.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Removes `key`; no-op when absent.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns the access count recorded for `key`, if resident.
    pub fn access_count(&self, key: &K) -> Option<u64> {
        self.inner.lock().access_count(key)
    }

    /// Runs the core's invariant checks under the lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }
}
