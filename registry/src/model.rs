use std::fmt;

use serde::{Deserialize, Serialize};

pub type TokenId = u64;

/// Opaque holder identity (wallet address, account name, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for Address {
    fn from(v: String) -> Self {
        Self(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub owner: Address,
    pub minted_at_ms: u64,
}
