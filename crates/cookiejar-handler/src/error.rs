use cookiejar_store::StoreError;
use cookiejar_types::Address;

/// Errors produced while applying a transaction.
///
/// Variants split into two classes, see [`ApplyError::is_invalid_transaction`]:
/// the transaction itself is invalid and every node will reject it, or the
/// node could not evaluate it at all.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("didn't find the cookie jar associated with public key {public_key}")]
    AccountNotFound { public_key: String },

    #[error("can only eat a maximum of {max} cookie(s), requested {requested}")]
    InsufficientBalance { max: u64, requested: u64 },

    #[error("baking {amount} cookie(s) onto {current} overflows the jar")]
    BalanceOverflow { current: u64, amount: u64 },

    #[error("corrupt state at {address}: {reason}")]
    CorruptState { address: Address, reason: String },

    #[error("state write for {address} was not acknowledged")]
    WriteNotAcknowledged { address: Address },

    #[error("state error: {0}")]
    Infrastructure(#[from] StoreError),
}

impl ApplyError {
    /// Returns `true` if the transaction is invalid on its own terms.
    ///
    /// Invalid transactions are rejected identically by every node. Anything
    /// else means the store could not serve the request and the transaction
    /// was not evaluated.
    pub fn is_invalid_transaction(&self) -> bool {
        match self {
            Self::InvalidPayload(_)
            | Self::UnsupportedOperation(_)
            | Self::AccountNotFound { .. }
            | Self::InsufficientBalance { .. }
            | Self::BalanceOverflow { .. } => true,
            Self::Infrastructure(e) => e.is_unauthorized(),
            Self::CorruptState { .. } | Self::WriteNotAcknowledged { .. } => false,
        }
    }
}

/// Result alias for handler operations.
pub type ApplyResult<T> = Result<T, ApplyError>;
