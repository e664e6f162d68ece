//! Hashing and address derivation for the CookieJar transaction family.
//!
//! All hashing is SHA-512 rendered as lowercase hex, matching the address
//! scheme every validator in the network uses. Nothing here is secret and
//! nothing here can fail.

pub mod deriver;
pub mod hasher;

pub use deriver::AddressDeriver;
pub use hasher::Sha512Hasher;
