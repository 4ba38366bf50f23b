//! Port abstraction for content block persistence adapters.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BlockPosition, ContentBlock, ContentBlockId, NewContentBlock, PageId};

use super::RepositoryError;

/// Port for storing a page's content blocks.
///
/// Every listing is sorted by `(position, id)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentBlockRepository: Send + Sync {
    /// Insert a new block.
    ///
    /// A missing page fails with [`RepositoryError::MissingReference`].
    async fn create(&self, block: &NewContentBlock) -> Result<ContentBlock, RepositoryError>;

    /// Fetch a block by identifier.
    async fn find_by_id(&self, id: ContentBlockId)
    -> Result<Option<ContentBlock>, RepositoryError>;

    /// List a page's blocks in render order.
    async fn list_by_page(&self, page_id: PageId) -> Result<Vec<ContentBlock>, RepositoryError>;

    /// Overwrite a block if its stored revision is still `expected_revision`.
    async fn update(
        &self,
        block: &ContentBlock,
        expected_revision: u32,
    ) -> Result<(), RepositoryError>;

    /// Rewrite positions in one atomic write and return the page's blocks in
    /// their new order.
    ///
    /// Naming a block that is not on `page_id` fails with
    /// [`RepositoryError::Inconsistent`] and changes nothing.
    async fn reorder(
        &self,
        page_id: PageId,
        moves: &[BlockPosition],
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentBlock>, RepositoryError>;

    /// Delete a block.
    ///
    /// Returns `Ok(false)` when the block did not exist.
    async fn delete(&self, id: ContentBlockId) -> Result<bool, RepositoryError>;
}
