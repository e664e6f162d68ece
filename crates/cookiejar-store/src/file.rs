use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use cookiejar_types::Address;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{StateEntries, StateStore};

/// State store persisted as a single JSON document.
///
/// The file maps each address to the hex encoding of its value. The whole
/// document is rewritten on every `set` through a temporary file in the same
/// directory followed by a rename, so a crash never leaves a half-written
/// state file behind.
pub struct JsonFileState {
    path: PathBuf,
    entries: RwLock<StateEntries>,
}

impl JsonFileState {
    /// Open the state file at `path`, starting empty if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            Self::load(&path)?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "opened state file");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of addresses currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load(path: &Path) -> StoreResult<StateEntries> {
        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let encoded: BTreeMap<Address, String> =
            serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        encoded
            .into_iter()
            .map(|(addr, value)| {
                let bytes = hex::decode(&value).map_err(|e| StoreError::Corrupt {
                    path: path.to_path_buf(),
                    reason: format!("value at {addr}: {e}"),
                })?;
                Ok((addr, bytes))
            })
            .collect()
    }

    fn persist(&self, entries: &StateEntries) -> StoreResult<()> {
        let encoded: BTreeMap<&Address, String> =
            entries.iter().map(|(k, v)| (k, hex::encode(v))).collect();
        let json = serde_json::to_vec_pretty(&encoded)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl StateStore for JsonFileState {
    fn get(&self, addresses: &[Address]) -> StoreResult<StateEntries> {
        let entries = self.entries.read().expect("lock poisoned");
        Ok(addresses
            .iter()
            .map(|addr| (addr.clone(), entries.get(addr).cloned().unwrap_or_default()))
            .collect())
    }

    fn set(&self, updates: StateEntries) -> StoreResult<Vec<Address>> {
        let mut entries = self.entries.write().expect("lock poisoned");
        let mut next = entries.clone();
        let written: Vec<Address> = updates.keys().cloned().collect();
        next.extend(updates);
        self.persist(&next)?;
        *entries = next;
        debug!(path = %self.path.display(), written = written.len(), "state file updated");
        Ok(written)
    }
}

impl std::fmt::Debug for JsonFileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileState")
            .field("path", &self.path)
            .field("entry_count", &self.len())
            .finish()
    }
}
