//! Convenience re-exports.
//!
//! ```
//! use arckit::prelude::*;
//!
//! let cache = LruCache::new(128);
//! cache.put("k", 1);
//! assert_eq!(cache.get(&"k"), Some(1));
//! ```

pub use crate::builder::{CacheBuilder, CachePolicy};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::arc::ArcCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::lru_k::LrukCache;
pub use crate::policy::sharded_lru::ShardedLruCache;
pub use crate::traits::Cache;
