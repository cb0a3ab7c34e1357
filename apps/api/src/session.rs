//! Per-request caller session.
//!
//! The bearer token is pulled out of the `Authorization` header by the extractor and
//! handed to the record source as an argument. Nothing about the caller is stored
//! outside the request.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum::http::header::AUTHORIZATION;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub bearer_token: String,
}

impl Session {
    /// Parses `Bearer <token>`. The scheme is case-insensitive; the token must be non-empty.
    pub fn from_authorization(value: &str) -> Option<Session> {
        let (scheme, token) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        Some(Session {
            bearer_token: token.to_string(),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(Session::from_authorization)
            .ok_or(AppError::Unauthorized)
    }
}
