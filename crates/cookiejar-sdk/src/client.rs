use std::sync::Arc;

use cookiejar_handler::{parse_decimal, CookieJarHandler, HandlerConfig, Operation, StateMutation};
use cookiejar_processor::{ProcessResponse, ProcessorConfig, TransactionProcessor};
use cookiejar_store::StateStore;
use tracing::debug;

use crate::builder::TransactionBuilder;
use crate::error::{SdkError, SdkResult};

/// High-level client for one signer's cookie jar.
///
/// Every call builds a transaction, runs it through the processor, and
/// commits the result to `store` on success.
pub struct CookieJarClient<S: StateStore> {
    processor: TransactionProcessor,
    builder: TransactionBuilder,
    store: S,
}

impl<S: StateStore> CookieJarClient<S> {
    /// Client with a default processor serving the `cookiejar` family.
    pub fn new(public_key: impl Into<String>, store: S) -> SdkResult<Self> {
        Self::with_config(public_key, store, ProcessorConfig::default())
    }

    /// Client whose processor uses `config`.
    pub fn with_config(
        public_key: impl Into<String>,
        store: S,
        config: ProcessorConfig,
    ) -> SdkResult<Self> {
        let family = Arc::new(HandlerConfig::cookiejar());
        let mut processor = TransactionProcessor::new(config);
        processor.add_handler(Box::new(CookieJarHandler::new(family.clone())))?;
        Ok(Self {
            processor,
            builder: TransactionBuilder::with_config(public_key, family),
            store,
        })
    }

    pub fn builder(&self) -> &TransactionBuilder {
        &self.builder
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Bake `amount` cookies.
    pub fn bake(&self, amount: u64) -> SdkResult<StateMutation> {
        self.submit(&Operation::Bake { amount })
    }

    /// Eat `amount` cookies.
    pub fn eat(&self, amount: u64) -> SdkResult<StateMutation> {
        self.submit(&Operation::Eat { amount })
    }

    /// Empty the jar.
    pub fn clear(&self) -> SdkResult<StateMutation> {
        self.submit(&Operation::Clear)
    }

    /// Current cookie count, or `None` if the jar was never created.
    pub fn count(&self) -> SdkResult<Option<u64>> {
        let address = self.builder.address();
        let Some(raw) = self.store.get_one(address)? else {
            return Ok(None);
        };
        let text = String::from_utf8_lossy(&raw);
        parse_decimal(&text)
            .map(Some)
            .ok_or_else(|| SdkError::CorruptCount {
                address: address.clone(),
                value: text.into_owned(),
            })
    }

    /// Submit an operation and return the raw processor response.
    pub fn submit_raw(&self, operation: &Operation) -> ProcessResponse {
        let transaction = self.builder.build_random(operation);
        debug!(payload = %operation, nonce = %transaction.header.nonce, "submitting transaction");
        self.processor.process(&transaction, &self.store)
    }

    /// Submit an operation, mapping rejections to errors.
    pub fn submit(&self, operation: &Operation) -> SdkResult<StateMutation> {
        match self.submit_raw(operation) {
            ProcessResponse::Ok { mutation, .. } => Ok(mutation),
            ProcessResponse::InvalidTransaction { message } => Err(SdkError::Rejected(message)),
            ProcessResponse::InternalError { message } => Err(SdkError::Internal(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookiejar_store::{InMemoryState, JsonFileState};
    use std::collections::BTreeMap;

    const KEY: &str = "0360f1b6a2fd2d5c4c5bd6e0e4b8c1a9d7b3e5f2a4c6d8e0f1a3b5c7d9e1f3a5b7";

    #[test]
    fn count_before_bake_is_none() {
        let client = CookieJarClient::new(KEY, InMemoryState::new()).unwrap();
        assert_eq!(client.count().unwrap(), None);
    }

    #[test]
    fn bake_eat_clear_flow() {
        let client = CookieJarClient::new(KEY, InMemoryState::new()).unwrap();
        client.bake(10).unwrap();
        client.eat(4).unwrap();
        assert_eq!(client.count().unwrap(), Some(6));
        let m = client.clear().unwrap();
        assert_eq!(m.previous, Some(6));
        assert_eq!(client.count().unwrap(), Some(0));
    }

    #[test]
    fn overeating_is_rejected() {
        let client = CookieJarClient::new(KEY, InMemoryState::new()).unwrap();
        client.bake(2).unwrap();
        match client.eat(3) {
            Err(SdkError::Rejected(msg)) => assert!(msg.contains("maximum of 2")),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(client.count().unwrap(), Some(2));
    }

    #[test]
    fn clear_without_jar_is_rejected() {
        let client = CookieJarClient::new(KEY, InMemoryState::new()).unwrap();
        assert!(matches!(client.clear(), Err(SdkError::Rejected(_))));
        assert_eq!(client.store().set_calls(), 0);
    }

    #[test]
    fn corrupt_count() {
        let client = CookieJarClient::new(KEY, InMemoryState::new()).unwrap();
        let address = client.builder().address().clone();
        let store = InMemoryState::with_entries(BTreeMap::from([(address, b"x".to_vec())]));
        let client = CookieJarClient::new(KEY, store).unwrap();
        assert!(matches!(client.count(), Err(SdkError::CorruptCount { .. })));
        assert!(matches!(client.bake(1), Err(SdkError::Internal(_))));
    }

    #[test]
    fn signed_count_is_corrupt() {
        let address = TransactionBuilder::new(KEY).address().clone();
        let store = InMemoryState::with_entries(BTreeMap::from([(address, b"+7".to_vec())]));
        let client = CookieJarClient::new(KEY, store).unwrap();
        assert!(matches!(client.count(), Err(SdkError::CorruptCount { ref value, .. }) if value == "+7"));
        assert!(matches!(client.eat(1), Err(SdkError::Internal(_))));
    }

    #[test]
    fn file_backed_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jar.json");
        {
            let client = CookieJarClient::new(KEY, JsonFileState::open(&path).unwrap()).unwrap();
            client.bake(7).unwrap();
        }
        let client = CookieJarClient::new(KEY, JsonFileState::open(&path).unwrap()).unwrap();
        assert_eq!(client.count().unwrap(), Some(7));
    }
}
