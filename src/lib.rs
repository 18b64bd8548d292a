//! # arckit
//!
//! Bounded in-memory key/value caches with pluggable eviction policies.
//!
//! Four policies share one [`Cache`](traits::Cache) contract:
//!
//! | Policy                                          | Use when                                        |
//! |-------------------------------------------------|-------------------------------------------------|
//! | [`LruCache`](policy::lru::LruCache)             | General-purpose recency eviction                |
//! | [`LrukCache`](policy::lru_k::LrukCache)         | One-shot scans must not flush the working set   |
//! | [`ArcCache`](policy::arc::ArcCache)             | Mixed recency/frequency traffic, self-tuning    |
//! | [`ShardedLruCache`](policy::sharded_lru::ShardedLruCache) | Many threads hammering one cache      |
//!
//! All caches are internally synchronized: every operation takes `&self`
//! and instances can be shared across threads behind an `Arc`. Storage is
//! arena-backed, so the recency lists never chase heap pointers and
//! eviction, lookup, and insertion are all O(1).
//!
//! ## Quick start
//!
//! ```
//! use arckit::prelude::*;
//!
//! let cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // renews "a"
//! cache.put("c", 3);    // evicts "b", the least recently used
//!
//! assert_eq!(cache.get(&"a"), Some(1));
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"c"), Some(3));
//! ```
//!
//! Policies can also be chosen at runtime:
//!
//! ```
//! use arckit::prelude::*;
//!
//! let cache = CacheBuilder::new(1024)
//!     .policy(CachePolicy::LruK { history_capacity: 256, k: 2 })
//!     .build::<u64, String>();
//! cache.put(7, "seven".to_string());
//! ```
//!
//! ## Module map
//!
//! - [`traits`] — the shared `Cache` contract
//! - [`policy`] — the four eviction policies
//! - [`builder`] — runtime policy selection
//! - [`ds`] — the arena, recency list, ghost list, and slice router the
//!   policies are built from
//! - [`error`] — configuration and invariant error types

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use builder::{CacheBuilder, CachePolicy};
pub use error::{ConfigError, InvariantError};
pub use policy::{ArcCache, LruCache, LrukCache, ShardedLruCache};
pub use traits::Cache;
