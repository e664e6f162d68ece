use cookiejar_store::StateStore;
use cookiejar_types::Namespace;

use crate::error::ApplyResult;
use crate::mutation::StateMutation;
use crate::transaction::Transaction;

/// A transaction family implementation the processor can route to.
///
/// The registration methods describe what the handler accepts; `apply` is the
/// deterministic state transition. The trait is object-safe so handlers can be
/// stored as `Box<dyn TransactionHandler>`.
pub trait TransactionHandler: Send + Sync {
    /// Family name used for routing.
    fn family_name(&self) -> &str;

    /// Family versions this handler accepts.
    fn family_versions(&self) -> &[String];

    /// Address prefixes this handler is allowed to touch.
    fn namespaces(&self) -> Vec<Namespace>;

    /// Validate `transaction` against `state` and write the result.
    ///
    /// On `Err` the handler has written nothing.
    fn apply(&self, transaction: &Transaction, state: &dyn StateStore)
        -> ApplyResult<StateMutation>;
}
