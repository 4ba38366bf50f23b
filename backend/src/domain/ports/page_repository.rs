//! Port abstraction for page persistence adapters.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewPage, Page, PageId, WebsiteId};

use super::RepositoryError;

/// Port for storing pages.
///
/// Adapters keep at most one homepage per website: inserting a homepage or
/// calling [`set_homepage`](Self::set_homepage) demotes the previous one in
/// the same atomic write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Insert a new page.
    ///
    /// A missing website fails with [`RepositoryError::MissingReference`]; a
    /// slug already used in the website with
    /// [`RepositoryError::UniqueViolation`].
    async fn create(&self, page: &NewPage) -> Result<Page, RepositoryError>;

    /// Fetch a page by identifier.
    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>, RepositoryError>;

    /// Fetch a page by its slug within a website.
    async fn find_by_slug(
        &self,
        website_id: WebsiteId,
        slug: &str,
    ) -> Result<Option<Page>, RepositoryError>;

    /// List a website's pages ordered by identifier.
    async fn list_by_website(&self, website_id: WebsiteId) -> Result<Vec<Page>, RepositoryError>;

    /// Overwrite a page if its stored revision is still `expected_revision`.
    ///
    /// The homepage flag is not written by this call.
    async fn update(&self, page: &Page, expected_revision: u32) -> Result<(), RepositoryError>;

    /// Make `id` its website's only homepage and return the updated page.
    async fn set_homepage(&self, id: PageId, now: DateTime<Utc>) -> Result<Page, RepositoryError>;

    /// Delete a page and its content blocks.
    ///
    /// Returns `Ok(false)` when the page did not exist.
    async fn delete(&self, id: PageId) -> Result<bool, RepositoryError>;
}
