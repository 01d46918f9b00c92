//! probe-table: a single-threaded open-addressing hash table with a
//! fixed additive probe gap, tombstone deletion and doubling growth.
//!
//! Internal Design:
//!
//! Summary
//! - One structure, `ProbeTable<K, V, S>`, owning a boxed slice of slots.
//!   Each slot is `Empty`, `Tombstone` or `Occupied { hash, key, value }`.
//! - Two probing routines walk the same sequence from the key's home slot
//!   (`hash mod capacity`), stepping by the configured gap:
//!   - lookup probe: skips tombstones and mismatches, stops on Empty;
//!   - insert probe: stops on the first Empty or Tombstone.
//!   `put` always runs the lookup probe first, so a key displaced past a
//!   tombstone is overwritten rather than duplicated into the tombstone.
//!
//! Constraints
//! - `len <= threshold` after every mutating call; `put` grows before it
//!   would cross `threshold = floor(capacity * load_factor)`.
//! - Every walk is bounded to `capacity` steps, so lookups terminate even
//!   when no Empty slot remains (load factor 1.0 or many tombstones).
//! - No shrinking. Tombstones are reclaimed only by a new key landing on
//!   them or by growth.
//!
//! Probe coverage
//! - The gap must be odd and coprime with the initial capacity; requested
//!   capacities sharing a factor with it are bumped to the next coprime
//!   value. For odd `g`, `gcd(g, 2c) == gcd(g, c)`, so every doubled
//!   capacity keeps full-cycle coverage without re-checking at runtime.
//!
//! Hasher and rehashing invariants
//! - Each occupied slot caches its `u64` hash. Growth re-places entries by
//!   the cached hash through the insert probe only: `K: Hash`/`K: Eq` are
//!   never invoked and the threshold check is not re-entered.
//!
//! Notes and non-goals
//! - Not thread-safe beyond what `&mut self` already guarantees.
//! - Iteration order is unspecified.
//! - Errors: constructors return `InvalidArgument`; everything else is total.

mod config;
mod error;
mod probe;
pub mod probe_table;
mod probe_table_proptest;
mod slot;

// Public surface
pub use config::{ProbeConfig, DEFAULT_LOAD_FACTOR, DEFAULT_MIN_CAPACITY, DEFAULT_PROBE_GAP};
pub use error::InvalidArgument;
pub use probe_table::{Iter, IterMut, ProbeTable};
