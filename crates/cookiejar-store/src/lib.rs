//! State store interface for the CookieJar transaction family.
//!
//! The validator owns the real state (a Merkle-trie key-value store). Handlers
//! only ever see it through the [`StateStore`] trait: a batched `get` and a
//! batched `set` keyed by [`Address`](cookiejar_types::Address).
//!
//! # Storage Backends
//!
//! - [`InMemoryState`] -- `BTreeMap`-based store for tests and embedding
//! - [`JsonFileState`] -- single JSON file, rewritten atomically on every `set`
//!
//! # Design Rules
//!
//! 1. A missing key reads back as empty bytes; empty bytes mean "absent".
//! 2. The store never interprets values -- it is a pure key-value store.
//! 3. Iteration order is the address order, so every node sees the same order.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{Access, StoreError, StoreResult};
pub use file::JsonFileState;
pub use memory::InMemoryState;
pub use traits::{StateEntries, StateStore};
