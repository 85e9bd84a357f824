//! Fast hashing with FxHash.
//!
//! FxHash is a non-cryptographic hash that is significantly faster than the
//! standard SipHash for the small integer keys used throughout Traverso.

/// Re-export of the FxHash hasher.
pub use rustc_hash::FxHasher;

/// HashMap keyed with FxHash.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// HashSet keyed with FxHash.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
