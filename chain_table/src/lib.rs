//! [`ChainTable`] is a hash map built from a fixed-size array of buckets, each bucket a singly
//! linked chain of entries, with collisions resolved by appending to the addressed chain.
//!
//! Keys are hashed through their [`Display`](std::fmt::Display) form with a deterministic,
//! unseeded polynomial fold, so any key type with a stable textual rendering can be used and the
//! same key always lands in the same bucket of a same-sized table. The bucket count is fixed at
//! construction: the table never rehashes, and the load factor is unbounded. That makes behavior
//! fully predictable at the cost of degraded lookups when the table is overfilled far beyond its
//! bucket count; size the table with [`ChainTable::with_buckets`] when the entry count is known
//! up front.
//!
//! The table is a plain single-threaded structure with no interior mutability; absence of a key
//! is reported as [`None`] rather than as an error. The unseeded hash is not collision resistant
//! against adversarial keys, so this table is not suitable as a security boundary.

mod chain;
mod hash;

pub mod table;

pub use table::{ChainTable, DEFAULT_BUCKET_COUNT};

#[cfg(test)]
mod test_table;
