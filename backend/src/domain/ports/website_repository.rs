//! Port abstraction for website persistence adapters.
use async_trait::async_trait;

use crate::domain::{NewWebsite, UserId, Website, WebsiteId};

use super::RepositoryError;

/// Port for storing websites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebsiteRepository: Send + Sync {
    /// Insert a new website.
    ///
    /// A missing owner fails with [`RepositoryError::MissingReference`]; a
    /// taken domain with [`RepositoryError::UniqueViolation`].
    async fn create(&self, website: &NewWebsite) -> Result<Website, RepositoryError>;

    /// Fetch a website by identifier.
    async fn find_by_id(&self, id: WebsiteId) -> Result<Option<Website>, RepositoryError>;

    /// List an owner's websites ordered by identifier.
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Website>, RepositoryError>;

    /// Overwrite a website if its stored revision is still
    /// `expected_revision`.
    async fn update(
        &self,
        website: &Website,
        expected_revision: u32,
    ) -> Result<(), RepositoryError>;

    /// Delete a website, its pages, blocks and navigation items, detaching
    /// its AI sessions.
    ///
    /// Returns `Ok(false)` when the website did not exist.
    async fn delete(&self, id: WebsiteId) -> Result<bool, RepositoryError>;
}
