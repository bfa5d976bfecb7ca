//! Request repository trait.

use crate::error::Result;
use crate::model::{Comment, NewRequest, Part, RepairRequest, RequestId, UserId};
use std::future::Future;

/// Request store: requests, their comments, and their part associations.
///
/// Mutating operations must be atomic: a parts replacement or a combined
/// status + completion-date update is never observable half-applied.
pub trait RequestRepository: Send + Sync {
    /// Insert a request with default lifecycle fields (`open`, no master,
    /// no completion date), allocating the next monotonic id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn insert(&self, request: NewRequest) -> impl Future<Output = Result<RepairRequest>> + Send;

    /// Fetch a request by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn get(&self, id: RequestId) -> impl Future<Output = Result<Option<RepairRequest>>> + Send;

    /// Write back a full request row.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the store fails
    /// - the request does not exist → `ServiceError::NotFound`
    fn update(&self, request: &RepairRequest) -> impl Future<Output = Result<()>> + Send;

    /// List requests ordered by ascending id, optionally restricted to one
    /// owning client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn list(
        &self,
        owner: Option<UserId>,
    ) -> impl Future<Output = Result<Vec<RepairRequest>>> + Send;

    /// Append a comment to a request. Comments are never edited or
    /// deleted individually; they go away with their request.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the store fails
    /// - the request does not exist → `ServiceError::NotFound`
    fn add_comment(
        &self,
        request_id: RequestId,
        author_id: UserId,
        message: &str,
    ) -> impl Future<Output = Result<Comment>> + Send;

    /// Comments for a request in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn comments(&self, request_id: RequestId) -> impl Future<Output = Result<Vec<Comment>>> + Send;

    /// Atomically replace the set of parts associated with a request.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the store fails
    /// - the request does not exist → `ServiceError::NotFound`
    fn replace_parts(
        &self,
        request_id: RequestId,
        parts: &[Part],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Part names currently associated with a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn parts(&self, request_id: RequestId) -> impl Future<Output = Result<Vec<Part>>> + Send;
}
