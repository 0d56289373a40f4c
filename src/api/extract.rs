//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::AccountId;
use crate::error::GatewayError;

/// Header carrying the caller's account id.
pub const CALLER_HEADER: &str = "x-caller-id";

/// Caller identity taken from the [`CALLER_HEADER`] header.
///
/// Absent header yields `Caller(None)`; a present but malformed header is
/// rejected with [`GatewayError::InvalidAccountId`] or
/// [`GatewayError::InvalidRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Option<AccountId>);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(CALLER_HEADER) else {
            return Ok(Self(None));
        };
        let raw = value.to_str().map_err(|_| {
            GatewayError::InvalidRequest(format!("{CALLER_HEADER} header is not valid ASCII"))
        })?;
        Ok(Self(Some(raw.parse::<AccountId>()?)))
    }
}

/// Parses an optional account id supplied in a body or query string.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidAccountId`] if `raw` is present but
/// malformed.
pub fn parse_sender(raw: Option<&str>) -> Result<Option<AccountId>, GatewayError> {
    raw.map(str::parse::<AccountId>)
        .transpose()
        .map_err(GatewayError::from)
}
