//! Persistent double-ended queue over a [`KeyValueStore`].
//!
//! A [`PersistentDeque`] keeps no state of its own between calls. Every
//! operation reads the collection's [`DequeMeta`] from the store, performs
//! its slot reads and writes, and persists the updated metadata. Keys are
//! derived by [`DequeKeys`]:
//!
//! ```text
//! {collection}::meta      -> {"head": i64, "tail": i64}
//! {collection}::{index}   -> element bytes, for index in [head, tail)
//! ```
//!
//! [`KeyValueStore`]: crate::store::KeyValueStore

pub mod error;
pub mod keys;
pub mod meta;
pub mod persistent_deque;

pub use error::DequeError;
pub use keys::DequeKeys;
pub use meta::DequeMeta;
pub use persistent_deque::PersistentDeque;
