use std::sync::Arc;

use cookiejar_crypto::Sha512Hasher;
use cookiejar_handler::{HandlerConfig, Operation, Transaction, TransactionHeader};
use cookiejar_types::Address;

/// Builds transactions for one signer.
///
/// Inputs and outputs are both set to the signer's own jar address, which is
/// the only address a CookieJar transaction touches.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    public_key: String,
    address: Address,
    config: Arc<HandlerConfig>,
}

impl TransactionBuilder {
    /// Builder for `public_key` in the `cookiejar` family.
    pub fn new(public_key: impl Into<String>) -> Self {
        Self::with_config(public_key, Arc::new(HandlerConfig::cookiejar()))
    }

    pub fn with_config(public_key: impl Into<String>, config: Arc<HandlerConfig>) -> Self {
        let public_key = public_key.into();
        let address = config.deriver().derive_address(&public_key);
        Self {
            public_key,
            address,
            config,
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The signer's jar address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Build a transaction with an explicit nonce.
    pub fn build(&self, operation: &Operation, nonce: impl Into<String>) -> Transaction {
        let payload = operation.encode().into_bytes();
        let version = self
            .config
            .family_versions()
            .first()
            .cloned()
            .unwrap_or_default();
        let header = TransactionHeader {
            signer_public_key: self.public_key.clone(),
            family_name: self.config.family_name().to_string(),
            family_version: version,
            inputs: vec![self.address.to_string()],
            outputs: vec![self.address.to_string()],
            payload_sha512: Sha512Hasher::hash_hex(&payload),
            nonce: nonce.into(),
        };
        Transaction::new(header, payload)
    }

    /// Build a transaction with a random nonce.
    pub fn build_random(&self, operation: &Operation) -> Transaction {
        self.build(operation, format!("{:016x}", rand::random::<u64>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "alice";

    #[test]
    fn header_fields() {
        let builder = TransactionBuilder::new(KEY);
        let t = builder.build(&Operation::Bake { amount: 5 }, "n1");
        assert_eq!(t.payload, b"bake,5".to_vec());
        assert_eq!(t.header.signer_public_key, KEY);
        assert_eq!(t.header.family_name, "cookiejar");
        assert_eq!(t.header.family_version, "1.0");
        assert_eq!(t.header.nonce, "n1");
        assert_eq!(
            t.header.payload_sha512,
            "1fb27bb2b5e3ec57e2f02b346d3e47ea928e79d7001cf6062479c28bf4b716645d7d0339da8f27b5597aa13508a9c3333e40397d21ab8140043c91de8b17a5a3"
        );
    }

    #[test]
    fn inputs_and_outputs_are_own_address() {
        let builder = TransactionBuilder::new(KEY);
        let t = builder.build(&Operation::Clear, "n");
        let expected = "a4d219408b27d3097eea5a46bf2ab6433a7234a33d5e49957b13ec7acc2ca08e1a13c7";
        assert_eq!(builder.address().as_str(), expected);
        assert_eq!(t.header.inputs, vec![expected.to_string()]);
        assert_eq!(t.header.outputs, vec![expected.to_string()]);
        assert_eq!(t.payload, b"clear".to_vec());
    }

    #[test]
    fn random_nonces_differ() {
        let builder = TransactionBuilder::new(KEY);
        let a = builder.build_random(&Operation::Eat { amount: 1 });
        let b = builder.build_random(&Operation::Eat { amount: 1 });
        assert_eq!(a.header.nonce.len(), 16);
        assert_ne!(a.header.nonce, b.header.nonce);
    }
}
