//! Error types for the repairdesk service core.

use thiserror::Error;

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Error taxonomy for the request lifecycle and permission engine.
///
/// Every operation fails with exactly one of these kinds; nothing is
/// silently swallowed or retried. Store-level failures that do not map to
/// a domain condition surface as [`ServiceError::Internal`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    // ═══════════════════════════════════════════════════════════
    // Authentication
    // ═══════════════════════════════════════════════════════════

    /// Caller identity is missing or does not resolve to a user.
    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    // ═══════════════════════════════════════════════════════════
    // Authorization
    // ═══════════════════════════════════════════════════════════

    /// Resolved identity lacks permission for the action, or an
    /// ownership/assignment constraint failed.
    ///
    /// Carries the caller's resolved role name for diagnostics.
    #[error("Access denied for role: {role}")]
    Forbidden {
        /// Resolved role name of the denied caller.
        role: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Validation
    // ═══════════════════════════════════════════════════════════

    /// Malformed payload, e.g. an unknown status name.
    #[error("Validation failed: {0}")]
    Validation(String),

    // ═══════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════

    /// Referenced request/user/part does not exist.
    #[error("{what} with id {id} not found")]
    NotFound {
        /// Kind of entity that was looked up.
        what: &'static str,
        /// Identifier that failed to resolve.
        id: i64,
    },

    // ═══════════════════════════════════════════════════════════
    // Conflicts
    // ═══════════════════════════════════════════════════════════

    /// Uniqueness violation, e.g. a duplicate login.
    #[error("Conflict: {0}")]
    Conflict(String),

    // ═══════════════════════════════════════════════════════════
    // System
    // ═══════════════════════════════════════════════════════════

    /// Unexpected store or runtime failure, distinct from the domain
    /// taxonomy above.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable machine-readable code for this error kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}
