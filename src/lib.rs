//! symtable: a single-threaded symbol table mapping string keys to
//! caller-supplied values.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: an associative container for compilers, interpreters and similar
//!   programs, with amortized O(1) expected-time operations and no leaks or
//!   double frees by construction.
//! - Layers:
//!   - `hash`: polynomial string hash (multiplier 65599) reduced modulo the
//!     bucket count. Stateless, so every key can be rehashed on growth.
//!   - `chain`: one bucket. Owns its entries; each entry owns a copy of its
//!     key and the caller's value.
//!   - `SymTable<V>`: the bucket array plus the binding count; drives growth.
//!   - `ListSymTable<V>`: baseline with the same contract over a single
//!     chain, O(n) per operation.
//!
//! Constraints
//! - Single-threaded: no synchronization; callers sharing a table across
//!   threads must wrap it themselves.
//! - Keys are copied on insert; the caller's buffer may be dropped or reused
//!   immediately afterwards.
//! - Values are never cloned or inspected. They are moved in and moved back
//!   out by `replace`/`remove`; dropping the table drops them.
//! - Unique keys, compared byte-exactly; duplicate puts fail and leave the
//!   existing binding alone.
//!
//! Growth
//! - Bucket counts follow `BUCKET_COUNTS` (509, 1021, ... 65521). When a put
//!   takes the binding count past the bucket count, the table moves to the
//!   next count and relinks every entry.
//! - All allocations for a growth step happen before any entry moves. If
//!   one fails, the step is abandoned (logged at `warn`) and the table keeps
//!   its current buckets.
//! - The bucket array never shrinks.
//!
//! Failure boundaries
//! - `put` reports `PutError::DuplicateKey` or `PutError::OutOfMemory`; in
//!   both cases nothing was linked.
//! - Missing keys are not errors: `get`, `replace` and `remove` return
//!   `None`.
//!
//! Traversal
//! - `map`/`iter` borrow the table, so the borrow checker rules out
//!   insertion or removal while visiting.

mod chain;
pub mod error;
pub mod hash;
mod list_table;
mod sym_table;
mod symtable_proptest;

// Public surface
pub use error::{AllocError, PutError};
pub use list_table::{ListIter, ListSymTable};
pub use sym_table::{Iter, IterMut, SymTable, BUCKET_COUNTS};
