//! `ContentBlockRepository` over the in-memory tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{ContentBlockRepository, RepositoryError, references};
use crate::domain::{
    BlockPosition, ContentBlock, ContentBlockId, NewContentBlock, PageId, sort_blocks,
};

use super::{InMemorySiteStore, SiteState, check_revision, missing_reference};

fn blocks_of(state: &SiteState, page_id: PageId) -> Vec<ContentBlock> {
    let mut blocks: Vec<ContentBlock> = state
        .blocks
        .values()
        .filter(|block| block.page_id == page_id)
        .cloned()
        .collect();
    sort_blocks(&mut blocks);
    blocks
}

#[async_trait]
impl ContentBlockRepository for InMemorySiteStore {
    async fn create(&self, block: &NewContentBlock) -> Result<ContentBlock, RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.pages.contains_key(&block.page_id) {
            return Err(missing_reference(references::BLOCK_PAGE));
        }
        let id = ContentBlockId::new(state.block_ids.next());
        let stored = block.clone().into_block(id);
        state.blocks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: ContentBlockId,
    ) -> Result<Option<ContentBlock>, RepositoryError> {
        Ok(self.state.lock().await.blocks.get(&id).cloned())
    }

    async fn list_by_page(&self, page_id: PageId) -> Result<Vec<ContentBlock>, RepositoryError> {
        Ok(blocks_of(&*self.state.lock().await, page_id))
    }

    async fn update(
        &self,
        block: &ContentBlock,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let stored = state
            .blocks
            .get_mut(&block.id)
            .ok_or_else(|| RepositoryError::not_found("content block"))?;
        check_revision(stored.revision, expected_revision)?;
        *stored = block.clone();
        Ok(())
    }

    async fn reorder(
        &self,
        page_id: PageId,
        moves: &[BlockPosition],
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentBlock>, RepositoryError> {
        let mut state = self.state.lock().await;
        for entry in moves {
            let on_page = state
                .blocks
                .get(&entry.block_id)
                .is_some_and(|block| block.page_id == page_id);
            if !on_page {
                return Err(RepositoryError::inconsistent(format!(
                    "block {} is not on page {page_id}",
                    entry.block_id
                )));
            }
        }
        for entry in moves {
            if let Some(block) = state.blocks.get_mut(&entry.block_id) {
                *block = block.moved_to(entry.position, now);
            }
        }
        Ok(blocks_of(&state, page_id))
    }

    async fn delete(&self, id: ContentBlockId) -> Result<bool, RepositoryError> {
        Ok(self.state.lock().await.blocks.remove(&id).is_some())
    }
}
