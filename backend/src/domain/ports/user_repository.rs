//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::RepositoryError;

/// Port for storing user accounts.
///
/// # Revision Semantics
///
/// [`update`](Self::update) writes only when the stored revision equals
/// `expected_revision`; otherwise [`RepositoryError::RevisionMismatch`] is
/// returned and nothing changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned identifier.
    ///
    /// Duplicate emails or usernames fail with
    /// [`RepositoryError::UniqueViolation`].
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Overwrite a user if its stored revision is still `expected_revision`.
    async fn update(&self, user: &User, expected_revision: u32) -> Result<(), RepositoryError>;

    /// Delete a user together with its websites and AI sessions.
    ///
    /// Returns `Ok(false)` when the user did not exist.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;
}
