//! LRU-K admission filter.
//!
//! Plain LRU admits every key on first contact, so a burst of one-shot
//! keys can flush the working set. LRU-K gates admission: a key enters the
//! main cache only on its K-th access, with the access history itself kept
//! in a small LRU so that sparse stragglers age out before they qualify.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       LrukCache<K, V>                        │
//! │                                                              │
//! │   main:    LruCore<K, V>      capacity C  (admitted keys)    │
//! │   history: LruCore<K, u64>    capacity H  (access counts)    │
//! │   pending: FxHashMap<K, V>    tentative values, keyed to     │
//! │                               history residency              │
//! │                                                              │
//! │   access #1..K-1 ──► history + pending                       │
//! │   access #K      ──► main (history and pending are cleared)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pending table holds the most recent value offered for each
//! below-threshold key. It never outgrows the history: a key's tentative
//! value is stored only while its count is resident in the history LRU and
//! is dropped the moment the history evicts that count.

use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
use crate::policy::lru::LruCore;
use crate::traits::Cache;

/// Smallest meaningful admission threshold. K = 1 would admit on first
/// contact, which is plain LRU.
const MIN_ADMISSION_THRESHOLD: u64 = 2;

#[derive(Debug)]
struct LrukCore<K, V> {
    main: LruCore<K, V>,
    history: LruCore<K, u64>,
    pending: FxHashMap<K, V>,
    k: u64,
}

impl<K, V> LrukCore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: usize, history_capacity: usize, k: u64) -> Self {
        Self {
            main: LruCore::new(capacity),
            history: LruCore::new(history_capacity),
            pending: FxHashMap::default(),
            k,
        }
    }

    fn put(&mut self, key: K, value: V) {
        if self.main.contains(&key) {
            self.main.put(key, value);
            return;
        }

        let count = self.history.get(&key).copied().unwrap_or(0) + 1;
        if count >= self.k {
            // K-th access: admit. The count was already resident, so the
            // removals cannot race a history eviction.
            self.history.remove(&key);
            self.pending.remove(&key);
            self.main.put(key, value);
            return;
        }

        if let Some((aged_out, _)) = self.history.put(key.clone(), count) {
            self.pending.remove(&aged_out);
        }
        // With a zero-capacity history nothing is tracked, so no tentative
        // value is held either.
        if self.history.contains(&key) {
            self.pending.insert(key, value);
        }
    }

    fn get(&mut self, key: &K) -> Option<V> {
        let main_hit = self.main.get(key).cloned();

        // Every lookup counts toward admission, hit or miss.
        let count = self.history.get(key).copied().unwrap_or(0) + 1;
        if let Some((aged_out, _)) = self.history.put(key.clone(), count) {
            self.pending.remove(&aged_out);
        }

        if main_hit.is_some() {
            return main_hit;
        }

        if count >= self.k
            && let Some(value) = self.pending.remove(key)
        {
            self.history.remove(key);
            self.main.put(key.clone(), value.clone());
            return Some(value);
        }
        None
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.history.remove(key);
        self.pending.remove(key);
        self.main.remove(key)
    }

    fn clear(&mut self) {
        self.main.clear();
        self.history.clear();
        self.pending.clear();
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.main.check_invariants()?;
        self.history.check_invariants()?;
        for key in self.pending.keys() {
            if !self.history.contains(key) {
                return Err(InvariantError::new(
                    "pending value for a key absent from the history",
                ));
            }
        }
        Ok(())
    }
}

/// Thread-safe LRU-K cache.
///
/// # Example
///
/// ```
/// use arckit::policy::lru_k::LrukCache;
/// use arckit::traits::Cache;
///
/// let cache = LrukCache::new(8, 16, 2);
/// cache.put(1, "a"); // first access: tracked, not admitted
/// assert!(!cache.contains(&1));
/// assert_eq!(cache.get(&1), Some("a")); // second access admits
/// assert!(cache.contains(&1));
/// ```
#[derive(Debug)]
pub struct LrukCache<K, V> {
    inner: Mutex<LrukCore<K, V>>,
}

impl<K, V> LrukCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache with main capacity `capacity`, history capacity
    /// `history_capacity`, and admission threshold `k`, clamping `k` up
    /// to 2 if needed.
    pub fn new(capacity: usize, history_capacity: usize, k: u64) -> Self {
        Self {
            inner: Mutex::new(LrukCore::new(
                capacity,
                history_capacity,
                k.max(MIN_ADMISSION_THRESHOLD),
            )),
        }
    }

    /// Like [`LrukCache::new`], but rejects thresholds below 2 instead of
    /// clamping.
    pub fn try_new(capacity: usize, history_capacity: usize, k: u64) -> Result<Self, ConfigError> {
        if k < MIN_ADMISSION_THRESHOLD {
            return Err(ConfigError::new(format!(
                "admission threshold must be at least {MIN_ADMISSION_THRESHOLD}, got {k}"
            )));
        }
        Ok(Self::new(capacity, history_capacity, k))
    }

    /// Offers `(key, value)`: updates in place when admitted, otherwise
    /// records one access and keeps the value tentative.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Looks up `key`, counting the access toward admission either way.
    /// The access that lifts the count to K promotes the most recently
    /// offered value and returns it.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// Removes `key` from the main cache, the history, and the pending
    /// table.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Whether `key` has been admitted into the main cache. Tracked but
    /// not-yet-admitted keys report `false`.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().main.contains(key)
    }

    /// Admitted entries only.
    pub fn len(&self) -> usize {
        self.inner.lock().main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Main-cache capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().main.capacity()
    }

    /// Keys currently tracked toward admission.
    pub fn history_len(&self) -> usize {
        self.inner.lock().history.len()
    }

    /// Tentative values held for tracked keys.
    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending.len()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs the invariant checks of both inner caches plus the pending
    /// containment check.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<K, V> Cache<K, V> for LrukCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        LrukCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        LrukCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LrukCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LrukCache::len(self)
    }

    fn capacity(&self) -> usize {
        LrukCache::capacity(self)
    }
}
