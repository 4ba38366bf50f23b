//! PostgreSQL-backed `ContentBlockRepository` implementation using Diesel ORM.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{ContentBlockRepository, RepositoryError};
use crate::domain::{BlockPosition, ContentBlock, ContentBlockId, NewContentBlock, PageId};
use crate::query_optional;
use crate::query_vec;
use crate::update_with_revision;

use super::diesel_helpers::{TxError, collect_rows, map_diesel_error, map_pool_error};
use super::models::{ContentBlockChangeset, ContentBlockRow, NewContentBlockRow};
use super::pool::DbPool;
use super::schema::content_blocks;

/// Diesel-backed implementation of the content block repository port.
#[derive(Clone)]
pub struct DieselContentBlockRepository {
    pool: DbPool,
}

impl DieselContentBlockRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentBlockRepository for DieselContentBlockRepository {
    async fn create(&self, block: &NewContentBlock) -> Result<ContentBlock, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ContentBlockRow = diesel::insert_into(content_blocks::table)
            .values(NewContentBlockRow::from(block))
            .returning(ContentBlockRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        ContentBlock::try_from(row)
    }

    async fn find_by_id(
        &self,
        id: ContentBlockId,
    ) -> Result<Option<ContentBlock>, RepositoryError> {
        query_optional!(
            self,
            content_blocks::table,
            content_blocks::id.eq(id.get()),
            ContentBlockRow,
            ContentBlock::try_from
        )
    }

    async fn list_by_page(&self, page_id: PageId) -> Result<Vec<ContentBlock>, RepositoryError> {
        query_vec!(
            self,
            content_blocks::table,
            content_blocks::page_id.eq(page_id.get()),
            (content_blocks::position.asc(), content_blocks::id.asc()),
            ContentBlockRow,
            ContentBlock::try_from
        )
    }

    async fn update(
        &self,
        block: &ContentBlock,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        update_with_revision!(
            self,
            table: content_blocks::table,
            id: content_blocks::id => block.id.get(),
            revision: content_blocks::revision => expected_revision,
            changeset: ContentBlockChangeset::from(block),
            entity: "content block"
        )
    }

    async fn reorder(
        &self,
        page_id: PageId,
        moves: &[BlockPosition],
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentBlock>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let moves = moves.to_vec();

        let rows = conn
            .transaction::<Vec<ContentBlockRow>, TxError, _>(|conn| {
                async move {
                    let on_page: HashSet<i64> = content_blocks::table
                        .filter(content_blocks::page_id.eq(page_id.get()))
                        .select(content_blocks::id)
                        .for_update()
                        .load::<i64>(conn)
                        .await?
                        .into_iter()
                        .collect();
                    if let Some(stray) = moves
                        .iter()
                        .find(|entry| !on_page.contains(&entry.block_id.get()))
                    {
                        return Err(RepositoryError::inconsistent(format!(
                            "block {} is not on page {page_id}",
                            stray.block_id
                        ))
                        .into());
                    }
                    for entry in &moves {
                        diesel::update(
                            content_blocks::table
                                .filter(content_blocks::id.eq(entry.block_id.get())),
                        )
                        .set((
                            content_blocks::position.eq(entry.position),
                            content_blocks::updated_at.eq(now),
                            content_blocks::revision.eq(content_blocks::revision + 1),
                        ))
                        .execute(conn)
                        .await?;
                    }
                    let rows = content_blocks::table
                        .filter(content_blocks::page_id.eq(page_id.get()))
                        .select(ContentBlockRow::as_select())
                        .order_by((content_blocks::position.asc(), content_blocks::id.asc()))
                        .load(conn)
                        .await?;
                    Ok(rows)
                }
                .scope_boxed()
            })
            .await?;

        collect_rows(rows, ContentBlock::try_from)
    }

    async fn delete(&self, id: ContentBlockId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted =
            diesel::delete(content_blocks::table.filter(content_blocks::id.eq(id.get())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
