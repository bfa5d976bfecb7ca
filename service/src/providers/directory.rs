//! Directory repository trait.

use crate::error::Result;
use crate::model::{NewUser, Part, User, UserId};
use std::future::Future;

/// Directory store: users and the part catalog.
pub trait DirectoryRepository: Send + Sync {
    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails. A missing user is
    /// `Ok(None)`, not an error: the caller decides whether that means
    /// "unauthenticated" or "not found".
    fn find_user(&self, id: UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Look up a user by login.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn find_user_by_login(&self, login: &str)
    -> impl Future<Output = Result<Option<User>>> + Send;

    /// Create a user, allocating the next id.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the store fails
    /// - the login already exists → `ServiceError::Conflict`
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User>> + Send;

    /// Resolve a part by name, creating the catalog row on first use.
    ///
    /// Idempotent: a repeated name resolves to the existing row, never a
    /// duplicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn upsert_part(&self, name: &str) -> impl Future<Output = Result<Part>> + Send;
}
