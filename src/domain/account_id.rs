//! Validated account identifier.
//!
//! [`AccountId`] names the author of a message and, through
//! [`AccountId::collection_key`], the persistent deque holding that
//! author's messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum accepted length in bytes.
pub const MIN_LEN: usize = 2;
/// Maximum accepted length in bytes.
pub const MAX_LEN: usize = 64;

/// Reasons an account identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountIdError {
    /// Length outside `MIN_LEN..=MAX_LEN`.
    #[error("account id must be 2-64 characters, got {0}")]
    Length(usize),
    /// A character outside `[a-z0-9._-]`.
    #[error("account id contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Identity of a message author or caller.
///
/// Lowercase ASCII letters, digits, `-`, `_` and `.`, between 2 and 64
/// characters (e.g. `alice.testnet`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Validates and wraps `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountIdError`] if `raw` is too short, too long, or
    /// contains a disallowed character.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountIdError> {
        let raw = raw.into();
        if !(MIN_LEN..=MAX_LEN).contains(&raw.len()) {
            return Err(AccountIdError::Length(raw.len()));
        }
        if let Some(bad) = raw
            .chars()
            .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '-' | '_' | '.'))
        {
            return Err(AccountIdError::InvalidChar(bad));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Collection key of this account's message deque under `prefix`.
    #[must_use]
    pub fn collection_key(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}
