//! Fixed-size Bloom filter: insert-only, no false negatives, stable binary form.
pub mod consts;
pub mod errors;
pub mod utils;
pub mod bits;
pub mod hashers;
pub mod filter;
pub mod snapshot;

pub use consts::HasherSet;
pub use errors::{BfError, Result};
pub use filter::{Filter, FilterStats};
pub use hashers::{default_hashers, xxh3_set, BoxedHashFn, HashFn};
pub use snapshot::{load_snapshot, write_snapshot, SnapshotReader};
