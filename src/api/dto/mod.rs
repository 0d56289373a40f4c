//! Data Transfer Objects for REST request/response serialization.
//!
//! Account ids cross the wire as plain strings and are validated into
//! [`crate::domain::AccountId`] by the handlers.

pub mod message_dto;
pub mod system_dto;

pub use message_dto::*;
pub use system_dto::*;
