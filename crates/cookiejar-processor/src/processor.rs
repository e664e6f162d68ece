use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use cookiejar_crypto::Sha512Hasher;
use cookiejar_handler::{ApplyError, Transaction, TransactionHandler};
use cookiejar_store::StateStore;
use cookiejar_types::Namespace;

use crate::config::ProcessorConfig;
use crate::context::TransactionContext;
use crate::error::{ProcessorError, ProcessorResult};
use crate::response::ProcessResponse;

/// What a handler advertises to the validator when it registers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub family_name: String,
    pub family_versions: Vec<String>,
    pub namespaces: Vec<Namespace>,
}

/// Routes transactions to registered handlers and applies them atomically.
pub struct TransactionProcessor {
    config: ProcessorConfig,
    handlers: Vec<Box<dyn TransactionHandler>>,
}

impl TransactionProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            handlers: Vec::new(),
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Register a handler. Each (family, version) pair may be served once.
    pub fn add_handler(
        &mut self,
        handler: Box<dyn TransactionHandler>,
    ) -> ProcessorResult<Registration> {
        for version in handler.family_versions() {
            if self.handler_for(handler.family_name(), version).is_some() {
                return Err(ProcessorError::DuplicateHandler {
                    family: handler.family_name().to_string(),
                    version: version.clone(),
                });
            }
        }
        let registration = registration_of(handler.as_ref());
        info!(
            family = %registration.family_name,
            versions = ?registration.family_versions,
            validator = %self.config.validator_url,
            "registered handler"
        );
        self.handlers.push(handler);
        Ok(registration)
    }

    /// Registrations of every handler, in registration order.
    pub fn registrations(&self) -> Vec<Registration> {
        self.handlers.iter().map(|h| registration_of(h.as_ref())).collect()
    }

    /// The handler serving `family` at `version`, if any.
    pub fn handler_for(&self, family: &str, version: &str) -> Option<&dyn TransactionHandler> {
        self.handlers
            .iter()
            .find(|h| h.family_name() == family && h.family_versions().iter().any(|v| v == version))
            .map(|h| h.as_ref())
    }

    /// Process a single transaction against `store`.
    ///
    /// The store is only written when the response is [`ProcessResponse::Ok`].
    pub fn process(&self, transaction: &Transaction, store: &dyn StateStore) -> ProcessResponse {
        let header = &transaction.header;
        let Some(handler) = self.handler_for(&header.family_name, &header.family_version) else {
            warn!(
                family = %header.family_name,
                version = %header.family_version,
                "no handler for transaction family"
            );
            return ProcessResponse::InvalidTransaction {
                message: format!(
                    "no handler registered for {} {}",
                    header.family_name, header.family_version
                ),
            };
        };

        if self.config.verify_payload_hash
            && !Sha512Hasher::verify(&transaction.payload, &header.payload_sha512)
        {
            warn!(nonce = %header.nonce, "payload hash mismatch");
            return ProcessResponse::InvalidTransaction {
                message: "payload does not match payload_sha512".into(),
            };
        }

        let mut context = TransactionContext::new(store, handler.namespaces());
        if self.config.enforce_header_addresses {
            context = context.with_declared(header.inputs.clone(), header.outputs.clone());
        }

        let mutation = match handler.apply(transaction, &context) {
            Ok(mutation) => mutation,
            Err(e) => return reject(e),
        };

        match context.commit() {
            Ok(changes) => {
                debug!(address = %mutation.address.short(), balance = mutation.balance, "transaction applied");
                ProcessResponse::Ok { mutation, changes }
            }
            Err(e) => reject(ApplyError::from(e)),
        }
    }

    /// Process `transactions` strictly in order, one at a time.
    pub fn process_batch(
        &self,
        transactions: &[Transaction],
        store: &dyn StateStore,
    ) -> Vec<ProcessResponse> {
        transactions.iter().map(|t| self.process(t, store)).collect()
    }
}

fn registration_of(handler: &dyn TransactionHandler) -> Registration {
    Registration {
        family_name: handler.family_name().to_string(),
        family_versions: handler.family_versions().to_vec(),
        namespaces: handler.namespaces(),
    }
}

fn reject(e: ApplyError) -> ProcessResponse {
    if e.is_invalid_transaction() {
        warn!(error = %e, "invalid transaction");
        ProcessResponse::InvalidTransaction {
            message: e.to_string(),
        }
    } else {
        error!(error = %e, "transaction could not be evaluated");
        ProcessResponse::InternalError {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookiejar_handler::{CookieJarHandler, TransactionHeader};
    use cookiejar_store::{InMemoryState, StateEntries, StoreError, StoreResult};
    use cookiejar_types::Address;

    const SIGNER: &str = "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9";

    fn processor() -> TransactionProcessor {
        let mut p = TransactionProcessor::new(ProcessorConfig::default());
        p.add_handler(Box::new(CookieJarHandler::default())).unwrap();
        p
    }

    fn address() -> Address {
        CookieJarHandler::default().address_for(SIGNER)
    }

    fn txn(payload: &str) -> Transaction {
        let addr = address().to_string();
        Transaction::new(
            TransactionHeader {
                signer_public_key: SIGNER.into(),
                family_name: "cookiejar".into(),
                family_version: "1.0".into(),
                inputs: vec![addr.clone()],
                outputs: vec![addr],
                payload_sha512: Sha512Hasher::hash_hex(payload.as_bytes()),
                nonce: "1".into(),
            },
            payload.as_bytes(),
        )
    }

    struct ReadOnlyStore(InMemoryState);

    impl StateStore for ReadOnlyStore {
        fn get(&self, addresses: &[Address]) -> StoreResult<StateEntries> {
            self.0.get(addresses)
        }

        fn set(&self, _: StateEntries) -> StoreResult<Vec<Address>> {
            Err(StoreError::Unavailable("read-only replica".into()))
        }
    }

    #[test]
    fn registration_advertises_family() {
        let p = processor();
        let regs = p.registrations();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].family_name, "cookiejar");
        assert_eq!(regs[0].family_versions, vec!["1.0".to_string()]);
        assert_eq!(regs[0].namespaces[0].as_str(), "a4d219");
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut p = processor();
        let err = p.add_handler(Box::new(CookieJarHandler::default())).unwrap_err();
        assert!(matches!(err, ProcessorError::DuplicateHandler { .. }));
    }

    #[test]
    fn ok_response_carries_changes() {
        let p = processor();
        let store = InMemoryState::new();
        let response = p.process(&txn("bake,5"), &store);
        match &response {
            ProcessResponse::Ok { mutation, changes } => {
                assert_eq!(mutation.balance, 5);
                assert_eq!(changes.len(), 1);
                assert_eq!(changes[0].address, address());
                assert_eq!(changes[0].value_text(), "5");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(store.value_str(&address()).as_deref(), Some("5"));
    }

    #[test]
    fn batch_applies_in_order() {
        let p = processor();
        let store = InMemoryState::new();
        let batch = [txn("bake,5"), txn("bake,3"), txn("eat,8"), txn("eat,1")];
        let responses = p.process_batch(&batch, &store);
        assert!(responses[..3].iter().all(ProcessResponse::is_ok));
        assert!(responses[3].is_invalid());
        assert_eq!(
            responses[3].message(),
            Some("can only eat a maximum of 0 cookie(s), requested 1")
        );
        assert_eq!(store.value_str(&address()).as_deref(), Some("0"));
    }

    #[test]
    fn unknown_family_is_invalid() {
        let p = processor();
        let store = InMemoryState::new();
        let mut t = txn("bake,1");
        t.header.family_name = "intkey".into();
        assert!(p.process(&t, &store).is_invalid());
        let mut t = txn("bake,1");
        t.header.family_version = "2.0".into();
        assert!(p.process(&t, &store).is_invalid());
        assert!(store.is_empty());
    }

    #[test]
    fn payload_hash_mismatch_is_invalid() {
        let p = processor();
        let store = InMemoryState::new();
        let mut t = txn("bake,1");
        t.payload = b"bake,1000".to_vec();
        let response = p.process(&t, &store);
        assert!(response.is_invalid());
        assert!(store.is_empty());
    }

    #[test]
    fn payload_hash_check_can_be_disabled() {
        let config = ProcessorConfig {
            verify_payload_hash: false,
            ..ProcessorConfig::default()
        };
        let mut p = TransactionProcessor::new(config);
        p.add_handler(Box::new(CookieJarHandler::default())).unwrap();
        let mut t = txn("bake,1");
        t.header.payload_sha512 = String::new();
        assert!(p.process(&t, &InMemoryState::new()).is_ok());
    }

    #[test]
    fn undeclared_output_is_invalid() {
        let p = processor();
        let store = InMemoryState::new();
        let mut t = txn("bake,1");
        t.header.outputs.clear();
        let response = p.process(&t, &store);
        assert!(response.is_invalid(), "{response:?}");
        assert!(store.is_empty());
    }

    #[test]
    fn undeclared_input_is_invalid() {
        let p = processor();
        let store = InMemoryState::new();
        let mut t = txn("bake,1");
        t.header.inputs = vec!["a4d21900".into()];
        assert!(p.process(&t, &store).is_invalid());
    }

    #[test]
    fn namespace_prefix_is_enough() {
        let p = processor();
        let store = InMemoryState::new();
        let mut t = txn("bake,1");
        t.header.inputs = vec!["a4d219".into()];
        t.header.outputs = vec!["a4d219".into()];
        assert!(p.process(&t, &store).is_ok());
    }

    #[test]
    fn store_write_failure_is_internal_error() {
        let p = processor();
        let store = ReadOnlyStore(InMemoryState::new());
        let response = p.process(&txn("bake,1"), &store);
        assert!(response.is_internal_error());
        assert!(store.0.is_empty());
    }

    #[test]
    fn failed_transaction_leaves_state_untouched() {
        let p = processor();
        let store = InMemoryState::new();
        p.process(&txn("bake,2"), &store);
        let before = store.snapshot();
        for payload in ["eat,3", "bogus,1", "bake", "clear,1"] {
            assert!(p.process(&txn(payload), &store).is_invalid(), "{payload}");
        }
        assert_eq!(store.snapshot(), before);
        assert_eq!(store.set_calls(), 1);
    }

    #[test]
    fn response_serializes_with_status_tag() {
        let response = ProcessResponse::InvalidTransaction {
            message: "nope".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"status":"invalid_transaction","message":"nope"}"#);
    }
}
