use sha2::{Digest, Sha512};

/// SHA-512 hasher producing lowercase hex digests.
pub struct Sha512Hasher;

impl Sha512Hasher {
    /// Hash raw bytes and return the 128-character hex digest.
    pub fn hash_hex(data: &[u8]) -> String {
        hex::encode(Sha512::digest(data))
    }

    /// Hash raw bytes and return the first `len` hex characters.
    ///
    /// `len` is clamped to the full digest length.
    pub fn hash_hex_prefix(data: &[u8], len: usize) -> String {
        let mut digest = Self::hash_hex(data);
        digest.truncate(len);
        digest
    }

    /// Verify that `data` hashes to `expected_hex` (case-insensitive).
    pub fn verify(data: &[u8], expected_hex: &str) -> bool {
        Self::hash_hex(data).eq_ignore_ascii_case(expected_hex)
    }
}
