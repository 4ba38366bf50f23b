//! PostgreSQL-backed `PageRepository` implementation using Diesel ORM.
//!
//! Homepage changes run in one transaction so a website never observes two
//! homepages; the partial unique index on `(website_id) WHERE is_homepage`
//! backs this up.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PageRepository, RepositoryError};
use crate::domain::{NewPage, Page, PageId, WebsiteId};
use crate::query_optional;
use crate::query_vec;
use crate::update_with_revision;

use super::diesel_helpers::{TxError, map_diesel_error, map_pool_error};
use super::models::{NewPageRow, PageChangeset, PageRow};
use super::pool::DbPool;
use super::schema::pages;

/// Diesel-backed implementation of the page repository port.
#[derive(Clone)]
pub struct DieselPageRepository {
    pool: DbPool,
}

impl DieselPageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Clear the homepage flag on every page of `website_id` except `keep`.
async fn demote_homepages(
    conn: &mut AsyncPgConnection,
    website_id: i64,
    keep: Option<i64>,
    now: DateTime<Utc>,
) -> Result<usize, diesel::result::Error> {
    diesel::update(
        pages::table.filter(
            pages::website_id
                .eq(website_id)
                .and(pages::is_homepage.eq(true))
                .and(pages::id.ne(keep.unwrap_or(0))),
        ),
    )
    .set((
        pages::is_homepage.eq(false),
        pages::updated_at.eq(now),
        pages::revision.eq(pages::revision + 1),
    ))
    .execute(conn)
    .await
}

#[async_trait]
impl PageRepository for DieselPageRepository {
    async fn create(&self, page: &NewPage) -> Result<Page, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPageRow::from(page);

        let row = conn
            .transaction::<PageRow, TxError, _>(|conn| {
                async move {
                    if new_row.is_homepage {
                        demote_homepages(conn, new_row.website_id, None, new_row.created_at)
                            .await?;
                    }
                    let row = diesel::insert_into(pages::table)
                        .values(&new_row)
                        .returning(PageRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;

        Page::try_from(row)
    }

    async fn find_by_id(&self, id: PageId) -> Result<Option<Page>, RepositoryError> {
        query_optional!(
            self,
            pages::table,
            pages::id.eq(id.get()),
            PageRow,
            Page::try_from
        )
    }

    async fn find_by_slug(
        &self,
        website_id: WebsiteId,
        slug: &str,
    ) -> Result<Option<Page>, RepositoryError> {
        query_optional!(
            self,
            pages::table,
            pages::website_id
                .eq(website_id.get())
                .and(pages::slug.eq(slug)),
            PageRow,
            Page::try_from
        )
    }

    async fn list_by_website(&self, website_id: WebsiteId) -> Result<Vec<Page>, RepositoryError> {
        query_vec!(
            self,
            pages::table,
            pages::website_id.eq(website_id.get()),
            pages::id.asc(),
            PageRow,
            Page::try_from
        )
    }

    async fn update(&self, page: &Page, expected_revision: u32) -> Result<(), RepositoryError> {
        update_with_revision!(
            self,
            table: pages::table,
            id: pages::id => page.id.get(),
            revision: pages::revision => expected_revision,
            changeset: PageChangeset::from(page),
            entity: "page"
        )
    }

    async fn set_homepage(&self, id: PageId, now: DateTime<Utc>) -> Result<Page, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<PageRow, TxError, _>(|conn| {
                async move {
                    let current: PageRow = pages::table
                        .filter(pages::id.eq(id.get()))
                        .select(PageRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?
                        .ok_or_else(|| RepositoryError::not_found("page"))?;
                    demote_homepages(conn, current.website_id, Some(current.id), now).await?;
                    if current.is_homepage {
                        return Ok(current);
                    }
                    let promoted = diesel::update(pages::table.filter(pages::id.eq(current.id)))
                        .set((
                            pages::is_homepage.eq(true),
                            pages::updated_at.eq(now),
                            pages::revision.eq(pages::revision + 1),
                        ))
                        .returning(PageRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(promoted)
                }
                .scope_boxed()
            })
            .await?;

        Page::try_from(row)
    }

    async fn delete(&self, id: PageId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(pages::table.filter(pages::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
