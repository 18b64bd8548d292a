//! Eviction policies.
//!
//! Four bounded key/value caches sharing the [`Cache`](crate::traits::Cache)
//! contract:
//!
//! - [`lru`] — plain least-recently-used, the building block for the rest
//! - [`lru_k`] — admission-filtered LRU: keys enter on their K-th access
//! - [`arc`] — adaptive replacement over two capacity-shifting halves
//! - [`sharded_lru`] — LRU fanned out over independently locked slices

pub mod arc;
pub mod lru;
pub mod lru_k;
pub mod sharded_lru;

pub use arc::ArcCache;
pub use lru::LruCache;
pub use lru_k::LrukCache;
pub use sharded_lru::ShardedLruCache;
