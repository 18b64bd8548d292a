//! Error types for the arckit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: returned by fallible constructors when cache
//!   parameters are invalid (e.g. an admission threshold below 2).
//! - [`InvariantError`]: returned by `check_invariants` methods when an
//!   internal data-structure invariant does not hold.
//!
//! Capacity zero is a valid configuration (a cache that stores nothing and
//! always misses), not an error.
//!
//! ## Example Usage
//!
//! ```
//! use arckit::error::ConfigError;
//! use arckit::policy::arc::ArcCache;
//!
//! let cache: Result<ArcCache<String, i32>, ConfigError> = ArcCache::try_new(100, 2);
//! assert!(cache.is_ok());
//!
//! // A transform threshold below 2 is meaningless and is rejected.
//! let bad = ArcCache::<String, i32>::try_new(100, 1);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`ArcCache::try_new`](crate::policy::arc::ArcCache::try_new) and
/// [`LrukCache::try_new`](crate::policy::lru_k::LrukCache::try_new). Carries
/// a human-readable description of which parameter failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` methods on the policy cores; the
/// randomized integration tests call these after every batch of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
