//! Port abstraction for AI builder session persistence adapters.
use async_trait::async_trait;

use crate::domain::{AiBuilderSession, NewAiSession, UserId};

use super::RepositoryError;

/// Port for storing AI builder sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiSessionRepository: Send + Sync {
    /// Insert a new session.
    ///
    /// A missing user or website fails with
    /// [`RepositoryError::MissingReference`]; a reused correlation key with
    /// [`RepositoryError::UniqueViolation`].
    async fn create(&self, session: &NewAiSession) -> Result<AiBuilderSession, RepositoryError>;

    /// Fetch a session by its correlation key.
    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<AiBuilderSession>, RepositoryError>;

    /// List a user's sessions, newest first.
    async fn list_by_user(&self, user_id: UserId)
    -> Result<Vec<AiBuilderSession>, RepositoryError>;

    /// Overwrite a session if its stored revision is still
    /// `expected_revision`.
    async fn update(
        &self,
        session: &AiBuilderSession,
        expected_revision: u32,
    ) -> Result<(), RepositoryError>;
}
