use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::family::NAMESPACE_LEN;

/// Address prefix reserved for a transaction family.
///
/// A `Namespace` is always exactly [`NAMESPACE_LEN`] lowercase hex
/// characters. The validator uses it to route transactions and to restrict
/// which state addresses a handler may touch.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Parse a namespace from its hex representation.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.len() != NAMESPACE_LEN {
            return Err(TypeError::InvalidLength {
                expected: NAMESPACE_LEN,
                actual: s.len(),
            });
        }
        if !crate::is_lower_hex(s) {
            return Err(TypeError::InvalidHex(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Wrap a prefix already known to be well-formed (derived from a hash).
    pub fn from_derived(prefix: &str) -> Self {
        debug_assert_eq!(prefix.len(), NAMESPACE_LEN);
        debug_assert!(crate::is_lower_hex(prefix));
        Self(prefix.to_string())
    }

    /// The hex prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `key` falls inside this namespace.
    pub fn contains(&self, key: &str) -> bool {
        key.starts_with(&self.0)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({})", self.0)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Namespace {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Namespace {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}
