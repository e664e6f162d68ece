use serde::{Deserialize, Serialize};

/// Header of a submitted transaction.
///
/// The signature over the header is verified by the validator before the
/// transaction reaches a handler, so `signer_public_key` is trusted here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Hex public key of the signer; the account identity.
    pub signer_public_key: String,
    /// Transaction family the payload belongs to.
    pub family_name: String,
    /// Family version the payload was encoded for.
    pub family_version: String,
    /// Addresses (or prefixes) the transaction may read.
    pub inputs: Vec<String>,
    /// Addresses (or prefixes) the transaction may write.
    pub outputs: Vec<String>,
    /// Hex SHA-512 of the payload bytes.
    pub payload_sha512: String,
    /// Client-chosen value making otherwise identical transactions distinct.
    pub nonce: String,
}

/// A transaction as delivered to a handler: header plus opaque payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub header: TransactionHeader,
    pub payload: Vec<u8>,
}

impl Transaction {
    pub fn new(header: TransactionHeader, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            header,
            payload: payload.into(),
        }
    }

    /// The signer's public key.
    pub fn signer_public_key(&self) -> &str {
        &self.header.signer_public_key
    }

    /// Payload as text, when it is valid UTF-8.
    pub fn payload_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}
