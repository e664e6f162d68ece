//! Registration constants for the CookieJar transaction family.

/// Transaction family name advertised to the validator.
pub const FAMILY_NAME: &str = "cookiejar";

/// The single family version this crate implements.
pub const FAMILY_VERSION: &str = "1.0";

/// Length in hex characters of the namespace prefix.
pub const NAMESPACE_LEN: usize = 6;

/// Length in hex characters of the per-account address suffix.
pub const ADDRESS_SUFFIX_LEN: usize = 64;

/// Total length in hex characters of a state address.
pub const ADDRESS_LEN: usize = NAMESPACE_LEN + ADDRESS_SUFFIX_LEN;
