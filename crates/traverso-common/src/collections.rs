//! Standard collection type aliases for Traverso.
//!
//! Use these instead of direct HashMap/HashSet to ensure consistent hashing
//! across the codebase. The insertion-ordered variants matter here: search
//! results expose discovery order as a first-class output, so any set an
//! algorithm iterates over must have a deterministic order.
//!
//! # Type Aliases
//!
//! | Type | Use Case |
//! |------|----------|
//! | [`TraversoMap`] | Hash map |
//! | [`TraversoSet`] | Hash set |
//! | [`TraversoIndexMap`] | Insertion-order preserving map |
//! | [`TraversoIndexSet`] | Insertion-order preserving set |

use rustc_hash::FxBuildHasher;

/// Standard HashMap with FxHash (fast, non-cryptographic).
///
/// FxHash is optimized for small keys such as the integer ids used
/// throughout the graph model.
pub type TraversoMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Standard HashSet with FxHash.
pub type TraversoSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Ordered map preserving insertion order.
pub type TraversoIndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

/// Ordered set preserving insertion order.
///
/// Used for the open/closed sets of the step-wise searches, where iteration
/// order is visible in the emitted snapshots and must be reproducible.
pub type TraversoIndexSet<T> = indexmap::IndexSet<T, FxBuildHasher>;

/// Create a new empty [`TraversoMap`].
#[inline]
#[must_use]
pub fn traverso_map<K, V>() -> TraversoMap<K, V> {
    TraversoMap::default()
}

/// Create a new empty [`TraversoSet`].
#[inline]
#[must_use]
pub fn traverso_set<T>() -> TraversoSet<T> {
    TraversoSet::default()
}
