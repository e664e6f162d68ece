//! Transaction handler for the CookieJar transaction family.
//!
//! Every validating node runs this logic and must reach byte-identical state,
//! so the handler is a pure function of (current state, transaction):
//!
//! 1. take the signer's public key from the transaction header
//! 2. derive the account address inside the `cookiejar` namespace
//! 3. parse the CSV payload into an [`Operation`]
//! 4. apply the matching rule: bake (accumulate), eat (debit with a floor of
//!    zero) or clear (reset to zero)
//!
//! Each rule reads the account immediately before writing it and never writes
//! before all of its checks have passed.

pub mod config;
pub mod cookiejar;
pub mod error;
pub mod handler;
pub mod mutation;
pub mod payload;
pub mod transaction;

pub use config::HandlerConfig;
pub use cookiejar::CookieJarHandler;
pub use error::{ApplyError, ApplyResult};
pub use handler::TransactionHandler;
pub use mutation::StateMutation;
pub use payload::{parse_decimal, Operation};
pub use transaction::{Transaction, TransactionHeader};
