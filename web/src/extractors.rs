//! Custom Axum extractors.
//!
//! - [`Caller`]: the out-of-band caller identity from the `X-User-Id`
//!   header. The header only names a user id; whether that id resolves to
//!   a real user is the service's first check on every operation.
//! - [`CorrelationId`]: request correlation id for tracing.

use crate::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use repairdesk_service::UserId;
use uuid::Uuid;

/// Header carrying the caller identity.
pub const CALLER_HEADER: &str = "X-User-Id";

/// Caller identity extracted from the `X-User-Id` header.
///
/// Rejects with 401 when the header is missing or not an integer, before
/// the handler body runs.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                AppError::unauthorized(format!("missing or malformed {CALLER_HEADER} header"))
            })?;

        Ok(Self(UserId(id)))
    }
}

/// Correlation ID for request tracing.
///
/// Extracts the correlation ID from the `X-Correlation-ID` header,
/// or generates a new UUID v4 if not present.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .headers
            .get("X-Correlation-ID")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}
