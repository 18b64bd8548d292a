//! Bounded recency list of evicted keys.
//!
//! ARC keeps one of these behind each live half: when an entry is evicted
//! its value is dropped and only the key is retained here, so a later miss
//! on that key can be recognized as a premature eviction and steer the
//! capacity balance. Capacity is fixed at construction; recording a key when
//! full drops the oldest ghost.
//!
//! `record` / `remove` / `contains` are O(1) average.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::node_arena::NodeId;
use crate::ds::recency_list::RecencyList;

/// Keys-only recency list with a fixed capacity.
#[derive(Debug)]
pub struct GhostList<K> {
    list: RecencyList<K>,
    index: FxHashMap<K, NodeId>,
    capacity: usize,
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a ghost list holding at most `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: RecencyList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Records `key` as the most recent ghost, dropping the oldest ghost if
    /// the list is full. Re-recording an existing key renews it instead.
    pub fn record(&mut self, key: K) {
        if self.capacity == 0 {
            return;
        }

        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            return;
        }

        if self.list.len() >= self.capacity
            && let Some(oldest) = self.list.pop_back()
        {
            self.index.remove(&oldest);
        }

        let id = self.list.push_front(key.clone());
        self.index.insert(key, id);
    }

    /// Removes `key`; returns `true` if it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(id) = self.index.remove(key) else {
            return false;
        };
        self.list.remove(id);
        true
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.list.len(), self.index.len());
        assert!(self.list.len() <= self.capacity);
        for &id in self.index.values() {
            assert!(self.list.contains(id));
        }
    }
}
