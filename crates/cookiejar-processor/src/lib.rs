//! Transaction processor for the CookieJar transaction family.
//!
//! Sits between the validator and the handlers: it keeps the registry of
//! handlers, routes each transaction by family name and version, checks the
//! payload hash, and runs the handler inside a [`TransactionContext`] that
//! limits state access to the addresses the header declares. Writes are
//! buffered and reach the store only if the handler succeeds.
//!
//! Transactions are processed strictly one at a time, in the order given.

pub mod config;
pub mod context;
pub mod error;
pub mod processor;
pub mod response;

pub use config::ProcessorConfig;
pub use context::TransactionContext;
pub use error::{ProcessorError, ProcessorResult};
pub use processor::{Registration, TransactionProcessor};
pub use response::{ProcessResponse, StateChange};
