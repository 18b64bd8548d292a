//! Deterministic key-to-slice routing for the sharded cache.
//!
//! Maps any hashable key to a slice index in `[0, slices)`. The same
//! `(key, seed, slices)` tuple always yields the same slice, so every
//! operation on a key lands on the same underlying LRU instance.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeded hash router over a fixed number of slices.
#[derive(Debug, PartialEq, Eq)]
pub struct SliceSelector {
    slices: usize,
    seed: u64,
}

impl SliceSelector {
    /// Creates a selector for `slices` slices; the count is clamped to at
    /// least 1.
    pub fn new(slices: usize, seed: u64) -> Self {
        Self {
            slices: slices.max(1),
            seed,
        }
    }

    pub fn slice_count(&self) -> usize {
        self.slices
    }

    /// Maps a key to a slice index in `[0, slices)`.
    pub fn slice_for_key<K: Hash>(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.slices
    }
}

impl Default for SliceSelector {
    /// Single-slice selector with seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}
