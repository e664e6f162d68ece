//! CSV payload codec.
//!
//! Wire format: `operation[,amount]`, ASCII, no whitespace. `operation` is
//! one of `bake`, `eat`, `clear` (case-sensitive). `amount` is a decimal
//! non-negative integer, required for `bake` and `eat` and not allowed for
//! `clear`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ApplyError, ApplyResult};

const MAX_FIELDS: usize = 2;

/// A parsed CookieJar operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    /// Add `amount` cookies, creating the jar if needed.
    Bake { amount: u64 },
    /// Remove `amount` cookies; never below zero.
    Eat { amount: u64 },
    /// Reset an existing jar to zero.
    Clear,
}

impl Operation {
    /// Wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bake { .. } => "bake",
            Self::Eat { .. } => "eat",
            Self::Clear => "clear",
        }
    }

    /// The amount carried by `bake`/`eat`.
    pub fn amount(&self) -> Option<u64> {
        match self {
            Self::Bake { amount } | Self::Eat { amount } => Some(*amount),
            Self::Clear => None,
        }
    }

    /// Parse a raw payload, which must be UTF-8.
    pub fn from_bytes(payload: &[u8]) -> ApplyResult<Self> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| ApplyError::InvalidPayload(format!("payload is not UTF-8: {e}")))?;
        Self::parse(text)
    }

    /// Parse a payload string.
    ///
    /// The field count is checked before the operation name, so a payload
    /// with too many fields is `InvalidPayload` even when the name is unknown.
    pub fn parse(payload: &str) -> ApplyResult<Self> {
        let fields: Vec<&str> = if payload.is_empty() {
            Vec::new()
        } else {
            payload.split(',').collect()
        };
        if fields.is_empty() || fields.len() > MAX_FIELDS {
            return Err(ApplyError::InvalidPayload(format!(
                "invalid number of arguments: expected 1 or 2, got {}",
                fields.len()
            )));
        }

        match fields[0] {
            "bake" => Ok(Self::Bake {
                amount: required_amount("bake", fields.get(1).copied())?,
            }),
            "eat" => Ok(Self::Eat {
                amount: required_amount("eat", fields.get(1).copied())?,
            }),
            "clear" => match fields.get(1) {
                None => Ok(Self::Clear),
                Some(extra) => Err(ApplyError::InvalidPayload(format!(
                    "clear takes no amount, got {extra:?}"
                ))),
            },
            other => Err(ApplyError::UnsupportedOperation(other.to_string())),
        }
    }

    /// Encode to the wire form.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(amount) => write!(f, "{},{amount}", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

impl FromStr for Operation {
    type Err = ApplyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn required_amount(operation: &str, field: Option<&str>) -> ApplyResult<u64> {
    let field = field.ok_or_else(|| {
        ApplyError::InvalidPayload(format!("{operation} requires an amount"))
    })?;
    parse_decimal(field).ok_or_else(|| {
        ApplyError::InvalidPayload(format!("amount {field:?} is not a non-negative integer"))
    })
}

/// Parse a strictly decimal `u64`: ASCII digits only, no sign, no whitespace.
pub fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
