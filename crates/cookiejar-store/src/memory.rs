use std::collections::BTreeMap;
use std::sync::RwLock;

use cookiejar_types::Address;

use crate::error::StoreResult;
use crate::traits::{StateEntries, StateStore};

/// In-memory, `BTreeMap`-based state store.
///
/// Intended for tests and embedding. Values are cloned on read/write. The
/// store also counts `set` calls so callers can assert that a rejected
/// transaction wrote nothing.
pub struct InMemoryState {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    entries: BTreeMap<Address, Vec<u8>>,
    set_calls: u64,
}

impl InMemoryState {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner::default()),
        }
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries(entries: StateEntries) -> Self {
        Self {
            inner: RwLock::new(MemoryInner {
                entries,
                set_calls: 0,
            }),
        }
    }

    /// Number of addresses currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").entries.is_empty()
    }

    /// Number of successful `set` calls since construction.
    pub fn set_calls(&self) -> u64 {
        self.inner.read().expect("lock poisoned").set_calls
    }

    /// Value at `address` decoded as UTF-8, if present.
    pub fn value_str(&self, address: &Address) -> Option<String> {
        let inner = self.inner.read().expect("lock poisoned");
        inner
            .entries
            .get(address)
            .map(|v| String::from_utf8_lossy(v).into_owned())
    }

    /// Copy of every stored entry in address order.
    pub fn snapshot(&self) -> StateEntries {
        self.inner.read().expect("lock poisoned").entries.clone()
    }
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for InMemoryState {
    fn get(&self, addresses: &[Address]) -> StoreResult<StateEntries> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(addresses
            .iter()
            .map(|addr| {
                let value = inner.entries.get(addr).cloned().unwrap_or_default();
                (addr.clone(), value)
            })
            .collect())
    }

    fn set(&self, entries: StateEntries) -> StoreResult<Vec<Address>> {
        let mut inner = self.inner.write().expect("lock poisoned");
        let written: Vec<Address> = entries.keys().cloned().collect();
        inner.entries.extend(entries);
        inner.set_calls += 1;
        Ok(written)
    }
}

impl std::fmt::Debug for InMemoryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryState")
            .field("entry_count", &self.len())
            .field("set_calls", &self.set_calls())
            .finish()
    }
}
