use std::collections::BTreeMap;
use std::sync::Mutex;

use cookiejar_store::{Access, StateEntries, StateStore, StoreError, StoreResult};
use cookiejar_types::{Address, Namespace};
use tracing::debug;

use crate::response::StateChange;

/// Per-transaction view of state.
///
/// Reads are limited to the header's `inputs`, writes to its `outputs`, and
/// both to the handler's namespaces. Writes are buffered; reads see the
/// buffer first. Nothing reaches the underlying store until [`commit`] is
/// called, so a failed transaction leaves state untouched.
///
/// [`commit`]: TransactionContext::commit
pub struct TransactionContext<'a> {
    store: &'a dyn StateStore,
    namespaces: Vec<Namespace>,
    inputs: Option<Vec<String>>,
    outputs: Option<Vec<String>>,
    pending: Mutex<StateEntries>,
}

impl<'a> TransactionContext<'a> {
    /// A context restricted to `namespaces` only.
    pub fn new(store: &'a dyn StateStore, namespaces: Vec<Namespace>) -> Self {
        Self {
            store,
            namespaces,
            inputs: None,
            outputs: None,
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    /// Further restrict reads and writes to the declared address prefixes.
    pub fn with_declared(mut self, inputs: Vec<String>, outputs: Vec<String>) -> Self {
        self.inputs = Some(inputs);
        self.outputs = Some(outputs);
        self
    }

    /// Number of buffered writes.
    pub fn pending_len(&self) -> usize {
        self.pending.lock().expect("lock poisoned").len()
    }

    /// Flush buffered writes to the store and return them as state changes.
    pub fn commit(self) -> StoreResult<Vec<StateChange>> {
        let pending = self.pending.into_inner().expect("lock poisoned");
        if pending.is_empty() {
            return Ok(Vec::new());
        }
        let changes: Vec<StateChange> = pending
            .iter()
            .map(|(address, value)| StateChange {
                address: address.clone(),
                value: value.clone(),
            })
            .collect();
        self.store.set(pending)?;
        debug!(count = changes.len(), "committed state changes");
        Ok(changes)
    }

    fn check(&self, address: &Address, access: Access) -> StoreResult<()> {
        let in_namespace = self.namespaces.iter().any(|ns| ns.contains(address.as_str()));
        let declared = match access {
            Access::Read => &self.inputs,
            Access::Write => &self.outputs,
        };
        let in_declared = declared
            .as_ref()
            .map_or(true, |prefixes| prefixes.iter().any(|p| address.has_prefix(p)));
        if in_namespace && in_declared {
            Ok(())
        } else {
            Err(StoreError::Unauthorized {
                address: address.clone(),
                access,
            })
        }
    }
}

impl StateStore for TransactionContext<'_> {
    fn get(&self, addresses: &[Address]) -> StoreResult<StateEntries> {
        for address in addresses {
            self.check(address, Access::Read)?;
        }
        let pending = self.pending.lock().expect("lock poisoned");
        let missing: Vec<Address> = addresses
            .iter()
            .filter(|a| !pending.contains_key(*a))
            .cloned()
            .collect();
        let mut entries = if missing.is_empty() {
            BTreeMap::new()
        } else {
            self.store.get(&missing)?
        };
        for address in addresses {
            if let Some(value) = pending.get(address) {
                entries.insert(address.clone(), value.clone());
            }
        }
        Ok(entries)
    }

    fn set(&self, entries: StateEntries) -> StoreResult<Vec<Address>> {
        for address in entries.keys() {
            self.check(address, Access::Write)?;
        }
        let written: Vec<Address> = entries.keys().cloned().collect();
        self.pending.lock().expect("lock poisoned").extend(entries);
        Ok(written)
    }
}
