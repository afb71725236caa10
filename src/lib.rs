//! chain-table: a fixed-capacity, string-keyed hash table with separate
//! chaining and a detached, pull-based key cursor.
//!
//! Internal Design:
//!
//! Layers
//! - `chain::Chain`: per-bucket singly linked sequence. Nodes of every
//!   bucket live in one generational `SlotMap` arena owned by the table.
//! - `hash`: polynomial byte hash (wrapping `i32`) and Euclidean bucket
//!   addressing, so negative hashes still index in range.
//! - `ChainTable<V, D>`: owns the buckets, the arena, and the value
//!   destructor `D: Destructor<V>`. Keys are copied in; values are released
//!   through `D` exactly once when they leave the table.
//! - `KeyCursor`: external iterator resolved against its table on every
//!   call. `Keys`/`Iter` are the borrowing, `Iterator`-shaped counterparts.
//!
//! Constraints
//! - Single-threaded: tables are `!Send`/`!Sync` (no atomics on the hot path).
//! - Capacity is fixed at construction; there is no rehashing or resizing.
//!   Lookups scan one bucket linearly.
//! - Duplicate inserts overwrite: the old value is released, the new entry
//!   is appended at the end of its bucket.
//!
//! Cursor validity
//! - Every table has a process-unique `TableId` and a version counter bumped
//!   by each structural mutation (insert, remove, take, clear). A cursor
//!   records both at creation and checks them on every call, returning
//!   `WrongTable` or `Invalidated` instead of walking stale positions.
//!   Mutating a value in place through `get_mut` does not invalidate.
//!
//! Reentrancy
//! - The destructor is user code running while the table is mid-operation.
//!   It must not call back into the same table; a debug-only guard turns
//!   such reentry into a panic. The guard compiles away in release builds.

mod chain;
pub mod config;
mod cursor;
mod error;
pub mod hash;
mod reentrancy;
mod release;
mod table;

// Public surface
pub use config::TableConfig;
pub use cursor::{Iter, KeyCursor, Keys};
pub use error::TableError;
pub use release::{Destructor, DropValue};
pub use table::{ChainTable, TableId};
