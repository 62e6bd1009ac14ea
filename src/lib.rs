//! probed-map: an open-addressing map from `u32` keys to `i32` values with
//! triangular quadratic probing, tombstone deletion and doubling growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, fixed-type map whose probing and growth rules are easy
//!   to state and check.
//! - Layers:
//!   - `probe`: FNV-1a key digest, the triangular probe sequence, and the
//!     slot finder that walks a key's chain and remembers the first
//!     tombstone it passes.
//!   - `ProbedMap`: owns the `Vec<Slot>` backing array and two counters,
//!     and implements insert/get/remove plus growth on top of the finder.
//!   - `invariants`: debug-build checks after every mutation and a full
//!     table validator for tests.
//!
//! Constraints
//! - Capacity is a power of two >= 8 so the probe sequence covers the
//!   whole table.
//! - `len() <= occupied() <= capacity()`, where `occupied()` counts Filled
//!   and Tombstone slots.
//! - Growth happens before an insert whenever `occupied() + 1` would reach
//!   0.6 of the capacity. Tombstones count toward that threshold and are
//!   only discarded by growth; `occupied()` never drops on remove.
//! - The map never shrinks.
//!
//! Probing
//! - Home slot is `hash(key) mod capacity`; attempt `i` adds `i*(i+1)/2`.
//! - An Empty slot ends a search. An insert for an absent key writes the
//!   first tombstone seen on the chain if any, otherwise that Empty slot.
//!
//! Keys
//! - Every operation takes `u32`. Signed keys are converted by the caller
//!   with `as u32`; the bit pattern is the key.
//!
//! Allocation
//! - `insert` treats allocation failure during growth as fatal, like
//!   `Vec`. `try_insert` returns `GrowError` and leaves the map unchanged.
//!
//! Notes and non-goals
//! - Single-threaded data structure without internal locking; mutation
//!   goes through `&mut self`.
//! - No generic keys or values, no persistence, no iteration order.

mod invariants;
mod probe;
mod probed_map;
#[cfg(test)]
mod probed_map_proptest;
mod slot;

// Public surface
pub use probed_map::{GrowError, InsertOutcome, Iter, ProbedMap, MIN_CAPACITY};
pub use slot::Slot;

// Hash and probe primitives, exposed for benches only.
#[cfg(feature = "bench_internal")]
pub use probe::{fnv1a_32, hash_key, ProbeSeq};
