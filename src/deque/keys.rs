//! Store key derivation for a single collection.
//!
//! Every key is the collection key, the `::` separator, and a suffix that
//! is either a decimal index or the literal `meta`. Neither suffix can
//! contain `::`, so distinct collection keys never share a store key.

use std::fmt;

use super::DequeError;

const SEPARATOR: &str = "::";
const META_SUFFIX: &str = "meta";

/// Derives store keys for one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DequeKeys {
    collection: String,
}

impl DequeKeys {
    /// Creates the key scheme for `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidCollectionKey`] if `collection` is empty.
    pub fn new(collection: impl Into<String>) -> Result<Self, DequeError> {
        let collection = collection.into();
        if collection.is_empty() {
            return Err(DequeError::InvalidCollectionKey(collection));
        }
        Ok(Self { collection })
    }

    /// The collection key these keys are derived from.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Key holding the `(head, tail)` metadata.
    #[must_use]
    pub fn meta(&self) -> String {
        format!("{}{SEPARATOR}{META_SUFFIX}", self.collection)
    }

    /// Key holding the element at `index`.
    #[must_use]
    pub fn element(&self, index: i64) -> String {
        format!("{}{SEPARATOR}{index}", self.collection)
    }
}

impl fmt::Display for DequeKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.collection)
    }
}
