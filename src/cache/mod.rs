//! Time-bounded memoization of allocation results
//!
//! Results live in memory only. There is no eviction by size and no
//! request coalescing: two concurrent misses on one key both compute and
//! the later `set` wins.
//!
//! # Expiry
//!
//! | Policy | Removal | Overwrite before TTL |
//! |--------|---------|----------------------|
//! | `timer` (default) | background task per `set` | earlier task removes the new value early |
//! | `lazy` | on read past the deadline | deadline restarts |

pub mod key;
pub mod store;

pub use key::CacheKey;
pub use store::{ExpiryPolicy, TtlCache};

use crate::plate::Allocation;

/// Cache of allocator results keyed by [`CacheKey`]
pub type ResultCache = TtlCache<Allocation>;
