use serde::{Deserialize, Serialize};

use cookiejar_types::Address;

use crate::payload::Operation;

/// The state change produced by a successfully applied transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMutation {
    /// Account address that was written.
    pub address: Address,
    /// Operation that produced the change.
    pub operation: Operation,
    /// Balance before the transaction; `None` if the jar did not exist.
    pub previous: Option<u64>,
    /// Balance after the transaction.
    pub balance: u64,
}

impl StateMutation {
    /// Returns `true` if this mutation created the account.
    pub fn created(&self) -> bool {
        self.previous.is_none()
    }

    /// The persisted representation of the new balance.
    pub fn encoded_value(&self) -> Vec<u8> {
        self.balance.to_string().into_bytes()
    }
}
