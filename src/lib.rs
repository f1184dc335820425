//! base-collections: single-threaded containers with explicit capacity
//! control, pluggable ordering and hashing, and fail-fast enumerators.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small family of containers (`ArrayList`, `LinkedList`,
//!   `HashMap`, `MultiHashMap`, `Queue`, `Stack`) that share one contract
//!   for counting, enumeration and error reporting.
//! - Layers:
//!   - Strategies: `Comparer`, `HashCodeProvider` and `GrowthPolicy` are
//!     small traits passed in by the caller or defaulted.
//!   - Storage: `Vec` buffers for the array-backed containers, a
//!     `SlotMap` node pool for `LinkedList`, and a chained table
//!     (bucket heads over a `SlotMap` of entries) for both maps.
//!   - Contract: the traits in `interfaces` (`Collection`, `List`, `Map`,
//!     `MultiMap`, `Enumerator`, `MapEnumerator`).
//!
//! Two families
//! - Value family: the generic containers store `T` by value and grow to
//!   exactly what each insertion needs (`growth::Exact`).
//! - Shared family: the aliases in `shared` store `Rc<T>` handles, grow in
//!   fixed chunks and trim after single removals (`growth::Chunked`).
//!   Removal returns the handle; the caller decides whether it dies.
//!
//! Enumeration
//! - `iter()` borrows the container and is the normal way to walk it.
//! - Enumerators are detached cursors. Each call takes the source by
//!   reference and validates a stamp (source identity plus modification
//!   count). Any successful mutation after the enumerator was created fails
//!   every later call with `InvalidOperation`; using it with another
//!   container fails with `InvalidArgument`. There is no recovery.
//!
//! Hashing
//! - Raw 32-bit codes from the `HashCodeProvider` go through `spread` and
//!   are masked into a power-of-two bucket array. Tables double as soon as
//!   the count reaches `capacity * load_factor`; entries are relinked, not
//!   moved.
//!
//! Errors
//! - Every fallible operation returns `Result<_, CollectionError>`.
//!   Comparer and hash-provider errors pass through unchanged. Bulk
//!   operations stop at the first failure with no rollback.
//!
//! Constraints
//! - Single-threaded: no internal synchronization; shared handles are
//!   `Rc`, so the shared family is `!Send`.
//! - No unsafe code.

mod chain_table;
pub mod array_list;
pub mod compare;
pub mod config;
pub mod error;
pub mod growth;
pub mod hash_code;
pub mod hash_map;
pub mod interfaces;
pub mod linked_list;
mod mod_count;
pub mod multi_hash_map;
pub mod queue;
pub mod shared;
mod sort;
pub mod stack;

// Public surface
pub use array_list::ArrayList;
pub use compare::{comparer_fn, Comparer, DefaultComparer, FnComparer, ReverseComparer};
pub use config::MapOptions;
pub use error::{CollectionError, Result};
pub use growth::{Chunked, Exact, GrowthPolicy};
pub use hash_code::{
    spread, BuildHasherProvider, DefaultHashCodeProvider, HashCode, HashCodeProvider,
};
pub use hash_map::HashMap;
pub use interfaces::{Collection, Enumerator, List, Map, MapEnumerator, MultiMap};
pub use linked_list::LinkedList;
pub use multi_hash_map::MultiHashMap;
pub use queue::Queue;
pub use stack::Stack;
