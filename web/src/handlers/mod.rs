//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod comments;
pub mod health;
pub mod requests;
pub mod stats;

use serde::Serialize;

/// Generic success body for mutations that return no data.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
