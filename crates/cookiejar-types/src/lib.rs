//! Foundation types for the CookieJar transaction family.
//!
//! This crate provides the identifiers shared by every other CookieJar crate.
//! It performs no hashing itself; addresses are derived in `cookiejar-crypto`
//! and only validated here.
//!
//! # Key Types
//!
//! - [`Namespace`] -- 6-character hex prefix reserved for the family
//! - [`Address`] -- 70-character state key (namespace + account suffix)
//! - [`FAMILY_NAME`] / [`FAMILY_VERSION`] -- registration constants

pub mod address;
pub mod error;
pub mod family;
pub mod namespace;

pub use address::Address;
pub use error::TypeError;
pub use family::{ADDRESS_LEN, ADDRESS_SUFFIX_LEN, FAMILY_NAME, FAMILY_VERSION, NAMESPACE_LEN};
pub use namespace::Namespace;

/// Returns `true` if every byte of `s` is a lowercase hex digit.
pub(crate) fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
