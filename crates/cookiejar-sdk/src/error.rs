use thiserror::Error;

use cookiejar_types::Address;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("transaction not evaluated: {0}")]
    Internal(String),

    #[error("cookie jar at {address} holds an unreadable count {value:?}")]
    CorruptCount { address: Address, value: String },

    #[error("store error: {0}")]
    Store(#[from] cookiejar_store::StoreError),

    #[error("processor error: {0}")]
    Processor(#[from] cookiejar_processor::ProcessorError),
}

pub type SdkResult<T> = Result<T, SdkError>;
