//! Content block service: per-page blocks in `(position, id)` order.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use super::ports::ContentBlockRepository;
use super::service_support::{check_expected_revision, map_repository_error, not_found};
use super::{
    BlockPosition, ContentBlock, ContentBlockCreate, ContentBlockId, ContentBlockUpdate, Error,
    NewContentBlock, PageId, validate_reorder,
};

const ENTITY: &str = "content block";

/// Adds, edits and orders the blocks of a page.
#[derive(Clone)]
pub struct ContentBlockService<B> {
    blocks: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<B> ContentBlockService<B> {
    /// Create a new service over the given repository.
    pub fn new(blocks: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self { blocks, clock }
    }
}

impl<B> ContentBlockService<B>
where
    B: ContentBlockRepository,
{
    /// Append a block to a page.
    pub async fn add(
        &self,
        page_id: PageId,
        draft: ContentBlockCreate,
    ) -> Result<ContentBlock, Error> {
        let new_block = NewContentBlock::try_new(page_id, draft, self.clock.utc())?;
        let block = self
            .blocks
            .create(&new_block)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        debug!(
            block_id = %block.id,
            page_id = %page_id,
            position = block.position,
            "content block added"
        );
        Ok(block)
    }

    /// Fetch a block.
    pub async fn get(&self, id: ContentBlockId) -> Result<ContentBlock, Error> {
        self.blocks
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Every block of a page in render order.
    pub async fn list(&self, page_id: PageId) -> Result<Vec<ContentBlock>, Error> {
        self.blocks
            .list_by_page(page_id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))
    }

    /// Only the visible blocks of a page, in render order.
    pub async fn visible(&self, page_id: PageId) -> Result<Vec<ContentBlock>, Error> {
        let mut blocks = self.list(page_id).await?;
        blocks.retain(|block| block.is_visible);
        Ok(blocks)
    }

    /// Apply a partial update.
    pub async fn update(
        &self,
        id: ContentBlockId,
        update: &ContentBlockUpdate,
        expected_revision: Option<u32>,
    ) -> Result<ContentBlock, Error> {
        let current = self.get(id).await?;
        check_expected_revision(expected_revision, current.revision)?;
        let next = current.apply(update, self.clock.utc())?;
        self.blocks
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        Ok(next)
    }

    /// Move several blocks at once and return the page in its new order.
    ///
    /// The whole request is rejected if it names a block twice or a block
    /// from another page.
    pub async fn reorder(
        &self,
        page_id: PageId,
        moves: &[BlockPosition],
    ) -> Result<Vec<ContentBlock>, Error> {
        validate_reorder(moves)?;
        let blocks = self
            .blocks
            .reorder(page_id, moves, self.clock.utc())
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        info!(page_id = %page_id, moved = moves.len(), "content blocks reordered");
        Ok(blocks)
    }

    /// Remove a block.
    pub async fn delete(&self, id: ContentBlockId) -> Result<(), Error> {
        let deleted = self
            .blocks
            .delete(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        if deleted {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }
}
