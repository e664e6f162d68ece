use serde::{Deserialize, Serialize};

use cookiejar_handler::StateMutation;
use cookiejar_types::Address;

/// A single address/value pair committed to state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub address: Address,
    pub value: Vec<u8>,
}

impl StateChange {
    /// Value decoded as UTF-8, lossily.
    pub fn value_text(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}

/// Outcome of processing one transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessResponse {
    /// Applied; `changes` were committed to state.
    Ok {
        mutation: StateMutation,
        changes: Vec<StateChange>,
    },
    /// Rejected; every node rejects it the same way. No state was changed.
    InvalidTransaction { message: String },
    /// The processor could not evaluate the transaction. No state was changed.
    InternalError { message: String },
}

impl ProcessResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::InvalidTransaction { .. })
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, Self::InternalError { .. })
    }

    /// The mutation, if the transaction was applied.
    pub fn mutation(&self) -> Option<&StateMutation> {
        match self {
            Self::Ok { mutation, .. } => Some(mutation),
            _ => None,
        }
    }

    /// Failure message, if the transaction was not applied.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok { .. } => None,
            Self::InvalidTransaction { message } | Self::InternalError { message } => {
                Some(message)
            }
        }
    }
}
