use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::family::{ADDRESS_LEN, ADDRESS_SUFFIX_LEN, NAMESPACE_LEN};
use crate::namespace::Namespace;

/// State-store key for a single account.
///
/// An `Address` is the concatenation of a [`Namespace`] and a 64-character
/// hex suffix. Construction validates shape only; the suffix is derived from
/// the signer's public key by `cookiejar-crypto`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Build an address from a namespace and a 64-character hex suffix.
    pub fn new(namespace: &Namespace, suffix: &str) -> Result<Self, TypeError> {
        if suffix.len() != ADDRESS_SUFFIX_LEN {
            return Err(TypeError::InvalidLength {
                expected: ADDRESS_SUFFIX_LEN,
                actual: suffix.len(),
            });
        }
        if !crate::is_lower_hex(suffix) {
            return Err(TypeError::InvalidHex(suffix.to_string()));
        }
        Ok(Self(format!("{}{}", namespace.as_str(), suffix)))
    }

    /// Build an address from parts already known to be well-formed.
    ///
    /// Used by the address deriver, whose suffix is always lowercase hex of
    /// the right length.
    pub fn from_derived(namespace: &Namespace, suffix: &str) -> Self {
        debug_assert_eq!(suffix.len(), ADDRESS_SUFFIX_LEN);
        debug_assert!(crate::is_lower_hex(suffix));
        Self(format!("{}{}", namespace.as_str(), suffix))
    }

    /// Parse a full 70-character address.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.len() != ADDRESS_LEN {
            return Err(TypeError::InvalidLength {
                expected: ADDRESS_LEN,
                actual: s.len(),
            });
        }
        if !crate::is_lower_hex(s) {
            return Err(TypeError::InvalidHex(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// The full hex key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 6-character namespace prefix.
    pub fn namespace_prefix(&self) -> &str {
        &self.0[..NAMESPACE_LEN]
    }

    /// The 64-character account suffix.
    pub fn suffix(&self) -> &str {
        &self.0[NAMESPACE_LEN..]
    }

    /// Returns `true` if the address starts with `prefix`.
    ///
    /// Header input/output lists may hold full addresses or shorter prefixes.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Short identifier for log output (namespace plus 8 suffix characters).
    pub fn short(&self) -> String {
        format!("{}..{}", self.namespace_prefix(), &self.suffix()[..8])
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.short())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
