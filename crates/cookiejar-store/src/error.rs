use std::fmt;
use std::path::PathBuf;

use cookiejar_types::Address;

/// Kind of access a context refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Errors from state store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The address lies outside what the current transaction may touch.
    #[error("unauthorized {access} of address {address}")]
    Unauthorized { address: Address, access: Access },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The persisted state could not be decoded.
    #[error("corrupt state file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The backend cannot serve requests right now.
    #[error("state store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns `true` if the error is an address authorization failure.
    ///
    /// Authorization failures are the transaction's fault; every other
    /// variant means the store itself could not answer.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
