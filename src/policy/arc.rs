//! Adaptive Replacement Cache built from two LRU-shaped halves.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                         ArcCache<K, V>                            │
//! │                                                                   │
//! │   R-half (recency)                  F-half (frequency)            │
//! │   ┌───────────────────┐             ┌───────────────────┐         │
//! │   │ live list + index │  promote    │ live list + index │         │
//! │   │ cap_R (shifts)    │ ──────────► │ cap_F (shifts)    │         │
//! │   ├───────────────────┤ count ≥ T   ├───────────────────┤         │
//! │   │ R-ghost (keys)    │             │ F-ghost (keys)    │         │
//! │   └───────────────────┘             └───────────────────┘         │
//! │                                                                   │
//! │   ghost hit on one side shifts one unit of live capacity          │
//! │   from the other side (only if that side can actually shrink)     │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! New and rarely touched entries live in the R-half. Once an entry's
//! access count reaches the transform threshold `T` it is copied into the
//! F-half; the R-side copy is not removed eagerly and ages out of R on its
//! own, so a key can briefly be resident in both halves. Lookups consult R
//! before F, so the R copy wins while it lasts.
//!
//! Each half pairs its live list with a keys-only [`GhostList`] of recent
//! evictions. A ghost hit means the eviction was premature: the key is
//! dropped from the ghost and one unit of live capacity moves toward the
//! half that lost it, but only when the other half's capacity can shrink.
//! Both halves start with live capacity `C` and ghost capacity `C`, so the
//! two live capacities always sum to `2C`.
//!
//! ## Operations
//!
//! | Operation | Time | Notes                                         |
//! |-----------|------|-----------------------------------------------|
//! | `get`     | O(1) | Ghost check, then R, then F                   |
//! | `put`     | O(1) | Ghost hit readmits into R only                |
//!
//! Each half has its own mutex, acquired sequentially and never nested.
//! Individual half operations linearize; a composite `get` or `put` is
//! only sequentially consistent across the two halves.

use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::ghost_list::GhostList;
use crate::ds::node_arena::NodeId;
use crate::ds::recency_list::RecencyList;
use crate::error::{ConfigError, InvariantError};
use crate::policy::lru::Entry;
use crate::traits::Cache;

/// Smallest meaningful transform threshold. A threshold of 1 would promote
/// every entry on its first hit and leave the R-half with no purpose.
const MIN_TRANSFORM_THRESHOLD: u64 = 2;

/// One half of the cache: an LRU live list with a ghost tail and a
/// capacity that shifts at runtime.
#[derive(Debug)]
struct ArcHalfCore<K, V> {
    list: RecencyList<Entry<K, V>>,
    index: FxHashMap<K, NodeId>,
    ghost: GhostList<K>,
    capacity: usize,
    transform_threshold: u64,
    // The F-half treats a put-update as an access; the R-half does not,
    // so an update storm cannot promote a key that is never read.
    bump_on_update: bool,
}

impl<K, V> ArcHalfCore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(capacity: usize, transform_threshold: u64, bump_on_update: bool) -> Self {
        Self {
            list: RecencyList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            ghost: GhostList::new(capacity),
            capacity,
            transform_threshold,
            bump_on_update,
        }
    }

    /// Inserts or updates `key` in the live list. Returns whether the entry
    /// is resident with its access count at or above the threshold.
    fn put(&mut self, key: K, value: V) -> bool {
        if self.capacity == 0 {
            return false;
        }

        if let Some(&id) = self.index.get(&key) {
            let mut crossed = false;
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
                if self.bump_on_update {
                    entry.access_count += 1;
                }
                crossed = entry.access_count >= self.transform_threshold;
            }
            self.list.move_to_front(id);
            return crossed;
        }

        if self.index.len() >= self.capacity {
            self.evict_to_ghost();
        }
        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
            access_count: 1,
        });
        self.index.insert(key, id);
        // A fresh entry starts at count 1 and the threshold is at least 2.
        false
    }

    /// Live lookup. A hit renews recency, bumps the count, and reports
    /// whether the count now meets the threshold.
    fn get(&mut self, key: &K) -> Option<(V, bool)> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        let entry = self.list.get_mut(id)?;
        entry.access_count += 1;
        let crossed = entry.access_count >= self.transform_threshold;
        Some((entry.value.clone(), crossed))
    }

    /// Removes `key` from the ghost list, reporting whether it was there.
    fn check_ghost(&mut self, key: &K) -> bool {
        self.ghost.remove(key)
    }

    fn increase_capacity(&mut self) {
        self.capacity += 1;
    }

    /// Gives up one unit of live capacity, evicting first if the half is
    /// full. Fails when the capacity is already 0.
    fn decrease_capacity(&mut self) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.index.len() >= self.capacity {
            self.evict_to_ghost();
        }
        self.capacity -= 1;
        true
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
        self.ghost.clear();
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.list.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "live list length {} != index length {}",
                self.list.len(),
                self.index.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "live entries {} exceed half capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.ghost.len() > self.ghost.capacity() {
            return Err(InvariantError::new(format!(
                "ghost entries {} exceed ghost capacity {}",
                self.ghost.len(),
                self.ghost.capacity()
            )));
        }
        for key in self.index.keys() {
            if self.ghost.contains(key) {
                return Err(InvariantError::new(
                    "key resident in both live list and ghost list",
                ));
            }
        }
        Ok(())
    }

    /// Drops the value of the least recent live entry, keeping only its
    /// key in the ghost list.
    fn evict_to_ghost(&mut self) {
        if let Some(evicted) = self.list.pop_back() {
            self.index.remove(&evicted.key);
            self.ghost.record(evicted.key);
        }
    }
}

/// Thread-safe ARC cache.
///
/// # Example
///
/// ```
/// use arckit::policy::arc::ArcCache;
/// use arckit::traits::Cache;
///
/// let cache = ArcCache::new(64, 2);
/// cache.put("hot", 1);
/// cache.get(&"hot"); // second access reaches the threshold: promoted to F
/// cache.get(&"hot");
/// assert_eq!(cache.get(&"hot"), Some(1));
/// ```
#[derive(Debug)]
pub struct ArcCache<K, V> {
    recency: Mutex<ArcHalfCore<K, V>>,
    frequency: Mutex<ArcHalfCore<K, V>>,
    capacity: usize,
}

impl<K, V> ArcCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache with total capacity `capacity`, clamping the
    /// transform threshold up to 2 if needed.
    pub fn new(capacity: usize, transform_threshold: u64) -> Self {
        let threshold = transform_threshold.max(MIN_TRANSFORM_THRESHOLD);
        Self {
            recency: Mutex::new(ArcHalfCore::new(capacity, threshold, false)),
            frequency: Mutex::new(ArcHalfCore::new(capacity, threshold, true)),
            capacity,
        }
    }

    /// Like [`ArcCache::new`], but rejects thresholds below 2 instead of
    /// clamping.
    pub fn try_new(capacity: usize, transform_threshold: u64) -> Result<Self, ConfigError> {
        if transform_threshold < MIN_TRANSFORM_THRESHOLD {
            return Err(ConfigError::new(format!(
                "transform threshold must be at least {MIN_TRANSFORM_THRESHOLD}, got {transform_threshold}"
            )));
        }
        Ok(Self::new(capacity, transform_threshold))
    }

    /// Inserts or updates `key`. A ghost hit readmits the key into the
    /// R-half only; otherwise an update that has already crossed the
    /// threshold is mirrored into the F-half.
    pub fn put(&self, key: K, value: V) {
        let in_ghost = self.check_ghosts(&key);
        if in_ghost {
            self.recency.lock().put(key, value);
            return;
        }
        let crossed = self.recency.lock().put(key.clone(), value.clone());
        if crossed {
            self.frequency.lock().put(key, value);
        }
    }

    /// Looks up `key`: ghost check first, then the R-half, then the
    /// F-half. An R hit that reaches the threshold copies the entry into
    /// the F-half; the R copy remains until it ages out.
    pub fn get(&self, key: &K) -> Option<V> {
        self.check_ghosts(key);

        let recency_hit = self.recency.lock().get(key);
        if let Some((value, crossed)) = recency_hit {
            if crossed {
                self.frequency.lock().put(key.clone(), value.clone());
            }
            return Some(value);
        }

        self.frequency.lock().get(key).map(|(value, _)| value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.recency.lock().contains(key) || self.frequency.lock().contains(key)
    }

    /// Total live entries across both halves. A key inside the
    /// double-residency window counts once per half.
    pub fn len(&self) -> usize {
        self.recency.lock().len() + self.frequency.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The total capacity supplied at construction. The two halves' live
    /// capacities always sum to twice this value.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.recency.lock().clear();
        self.frequency.lock().clear();
    }

    /// Live entries in the R-half.
    pub fn recency_len(&self) -> usize {
        self.recency.lock().len()
    }

    /// Live entries in the F-half.
    pub fn frequency_len(&self) -> usize {
        self.frequency.lock().len()
    }

    /// Current live capacity of the R-half.
    pub fn recency_capacity(&self) -> usize {
        self.recency.lock().capacity
    }

    /// Current live capacity of the F-half.
    pub fn frequency_capacity(&self) -> usize {
        self.frequency.lock().capacity
    }

    /// Keys tracked in the R-ghost.
    pub fn recency_ghost_len(&self) -> usize {
        self.recency.lock().ghost.len()
    }

    /// Keys tracked in the F-ghost.
    pub fn frequency_ghost_len(&self) -> usize {
        self.frequency.lock().ghost.len()
    }

    /// Runs both halves' invariant checks plus the cross-half capacity
    /// conservation check.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.recency.lock().check_invariants()?;
        self.frequency.lock().check_invariants()?;
        let total = self.recency.lock().capacity + self.frequency.lock().capacity;
        if total != self.capacity * 2 {
            return Err(InvariantError::new(format!(
                "half capacities sum to {total}, expected {}",
                self.capacity * 2
            )));
        }
        Ok(())
    }

    /// Consults the ghost lists, R first, and shifts one unit of capacity
    /// toward the half that suffered the premature eviction. The shift
    /// happens only when the other half can actually shrink; the ghost
    /// removal happens either way. Returns whether the key was ghosted.
    fn check_ghosts(&self, key: &K) -> bool {
        if self.recency.lock().check_ghost(key) {
            if self.frequency.lock().decrease_capacity() {
                self.recency.lock().increase_capacity();
            }
            return true;
        }
        if self.frequency.lock().check_ghost(key) {
            if self.recency.lock().decrease_capacity() {
                self.frequency.lock().increase_capacity();
            }
            return true;
        }
        false
    }
}

impl<K, V> Cache<K, V> for ArcCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn put(&self, key: K, value: V) {
        ArcCache::put(self, key, value);
    }

    fn get(&self, key: &K) -> Option<V> {
        ArcCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        ArcCache::contains(self, key)
    }

    fn len(&self) -> usize {
        ArcCache::len(self)
    }

    fn capacity(&self) -> usize {
        ArcCache::capacity(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_basic_put_get() {
        let cache = ArcCache::new(4, 2);
        cache.put(1, "a");
        assert_eq!(cache.get(&1), Some("a"));
        assert_eq!(cache.get(&2), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_threshold_below_two_is_clamped() {
        let cache = ArcCache::new(4, 0);
        cache.put(1, "a");
        assert_eq!(cache.frequency_len(), 0);
        cache.get(&1); // count 2 meets the clamped threshold
        assert_eq!(cache.frequency_len(), 1);
    }

    #[test]
    fn arc_try_new_rejects_low_threshold() {
        assert!(ArcCache::<u32, u32>::try_new(4, 1).is_err());
        assert!(ArcCache::<u32, u32>::try_new(4, 2).is_ok());
    }

    #[test]
    fn arc_promotes_at_threshold_with_double_residency() {
        let cache = ArcCache::new(4, 3);
        cache.put(1, "a"); // count 1, R only
        cache.get(&1); // count 2
        assert_eq!(cache.frequency_len(), 0);
        cache.get(&1); // count 3: promoted
        assert_eq!(cache.frequency_len(), 1);
        // The R copy remains until it ages out.
        assert_eq!(cache.recency_len(), 1);
        assert_eq!(cache.len(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_put_update_does_not_promote_from_recency() {
        let cache = ArcCache::new(4, 2);
        cache.put(1, "a");
        cache.put(1, "b");
        cache.put(1, "c");
        // R-side updates never bump the count, so no promotion happens.
        assert_eq!(cache.frequency_len(), 0);
        assert_eq!(cache.get(&1), Some("c"));
    }

    #[test]
    fn arc_eviction_feeds_ghost_and_readmits_into_recency() {
        let cache = ArcCache::new(2, 3);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c"); // evicts 1 into the R-ghost

        // A put on a ghosted key readmits into R only, and the ghost hit
        // shifts one unit of capacity toward R.
        cache.put(1, "a2");
        assert_eq!(cache.frequency_len(), 0);
        assert_eq!(cache.recency_capacity(), 3);
        assert_eq!(cache.frequency_capacity(), 1);
        assert_eq!(cache.get(&1), Some("a2"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_recency_ghost_hit_shifts_capacity_toward_recency() {
        let cache = ArcCache::new(2, 2);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c"); // 1 lands in the R-ghost
        assert_eq!(cache.recency_capacity(), 2);
        assert_eq!(cache.frequency_capacity(), 2);

        cache.get(&1); // ghost hit: F shrinks, R grows
        assert_eq!(cache.recency_capacity(), 3);
        assert_eq!(cache.frequency_capacity(), 1);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ghost_hit_without_shift_when_other_half_is_at_zero() {
        let cache = ArcCache::new(1, 2);
        cache.put(1, "a");
        cache.put(2, "b"); // 1 ghosted in R
        cache.get(&1); // F: 1 -> 0, R: 1 -> 2
        assert_eq!(cache.frequency_capacity(), 0);
        assert_eq!(cache.recency_capacity(), 2);

        cache.put(3, "c");
        cache.put(4, "d"); // 2 lands in the R-ghost
        // F cannot shrink below 0, so this ghost hit shifts nothing, but
        // the key still leaves the ghost.
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.frequency_capacity(), 0);
        assert_eq!(cache.recency_capacity(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_frequency_ghost_hit_shifts_capacity_toward_frequency() {
        let cache = ArcCache::new(1, 2);
        // Promote 1 into F.
        cache.put(1, "a");
        cache.get(&1);
        assert_eq!(cache.frequency_len(), 1);

        // Promote 2; F has capacity 1, so 1 falls into the F-ghost. The
        // R-ghost also briefly holds 1 (evicted by put).
        cache.put(2, "b");
        cache.get(&2);
        assert_eq!(cache.frequency_len(), 1);

        // Push 1 out of the single-slot R-ghost so only the F-ghost
        // remembers it.
        cache.put(3, "c");

        // F-ghost hit: R shrinks, F grows.
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.frequency_capacity(), 2);
        assert_eq!(cache.recency_capacity(), 0);
        assert_eq!(cache.recency_len(), 0);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_zero_capacity_never_stores() {
        let cache: ArcCache<u32, &str> = ArcCache::new(0, 2);
        cache.put(1, "a");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.len(), 0);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_frequency_update_counts_as_access() {
        let cache = ArcCache::new(4, 2);
        cache.put(1, "a");
        cache.get(&1); // promoted: resident in R and F
        assert_eq!(cache.frequency_len(), 1);

        // The R copy still shadows F lookups, but puts that cross the
        // threshold mirror into F, keeping the halves in sync.
        cache.put(1, "b");
        assert_eq!(cache.get(&1), Some("b"));
    }

    #[test]
    fn arc_clear_resets_both_halves() {
        let cache = ArcCache::new(4, 2);
        cache.put(1, "a");
        cache.get(&1);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.recency_len(), 0);
        assert_eq!(cache.frequency_len(), 0);
        cache.check_invariants().unwrap();
    }
}
