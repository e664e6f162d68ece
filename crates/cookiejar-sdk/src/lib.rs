//! Client SDK for the CookieJar transaction family.
//!
//! Builds well-formed transactions for a signer and submits them through a
//! [`TransactionProcessor`](cookiejar_processor::TransactionProcessor) against
//! any [`StateStore`](cookiejar_store::StateStore).

pub mod builder;
pub mod client;
pub mod error;

pub use builder::TransactionBuilder;
pub use client::CookieJarClient;
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use cookiejar_handler::{Operation, StateMutation, Transaction};
pub use cookiejar_processor::{ProcessResponse, ProcessorConfig};
pub use cookiejar_store::{InMemoryState, JsonFileState};
pub use cookiejar_types::Address;
