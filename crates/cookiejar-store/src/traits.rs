use std::collections::BTreeMap;

use cookiejar_types::Address;

use crate::error::StoreResult;

/// Address-ordered map of state values.
pub type StateEntries = BTreeMap<Address, Vec<u8>>;

/// Versioned key-value state as seen by a transaction handler.
///
/// All implementations must satisfy these invariants:
/// - `get` returns an entry for every requested address; absent keys map to
///   empty bytes.
/// - `set` writes every entry or returns `Err`; it returns the addresses
///   actually written.
/// - Values are opaque bytes.
pub trait StateStore: Send + Sync {
    /// Read the values stored at `addresses`.
    fn get(&self, addresses: &[Address]) -> StoreResult<StateEntries>;

    /// Write `entries` and return the addresses that were set.
    fn set(&self, entries: StateEntries) -> StoreResult<Vec<Address>>;

    /// Read a single address, mapping absence to `None`.
    fn get_one(&self, address: &Address) -> StoreResult<Option<Vec<u8>>> {
        let mut entries = self.get(std::slice::from_ref(address))?;
        Ok(entries.remove(address).filter(|value| !value.is_empty()))
    }
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, addresses: &[Address]) -> StoreResult<StateEntries> {
        (**self).get(addresses)
    }

    fn set(&self, entries: StateEntries) -> StoreResult<Vec<Address>> {
        (**self).set(entries)
    }
}
