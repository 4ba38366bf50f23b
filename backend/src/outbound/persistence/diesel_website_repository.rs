//! PostgreSQL-backed `WebsiteRepository` implementation using Diesel ORM.
//!
//! Deleting a website relies on the schema's `ON DELETE` rules: pages,
//! blocks and navigation cascade, AI sessions are detached.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, WebsiteRepository};
use crate::domain::{NewWebsite, UserId, Website, WebsiteId};
use crate::query_optional;
use crate::query_vec;
use crate::update_with_revision;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{NewWebsiteRow, WebsiteChangeset, WebsiteRow};
use super::pool::DbPool;
use super::schema::websites;

/// Diesel-backed implementation of the website repository port.
#[derive(Clone)]
pub struct DieselWebsiteRepository {
    pool: DbPool,
}

impl DieselWebsiteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WebsiteRepository for DieselWebsiteRepository {
    async fn create(&self, website: &NewWebsite) -> Result<Website, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: WebsiteRow = diesel::insert_into(websites::table)
            .values(NewWebsiteRow::from(website))
            .returning(WebsiteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Website::try_from(row)
    }

    async fn find_by_id(&self, id: WebsiteId) -> Result<Option<Website>, RepositoryError> {
        query_optional!(
            self,
            websites::table,
            websites::id.eq(id.get()),
            WebsiteRow,
            Website::try_from
        )
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Website>, RepositoryError> {
        query_vec!(
            self,
            websites::table,
            websites::owner_id.eq(owner_id.get()),
            websites::id.asc(),
            WebsiteRow,
            Website::try_from
        )
    }

    async fn update(
        &self,
        website: &Website,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        update_with_revision!(
            self,
            table: websites::table,
            id: websites::id => website.id.get(),
            revision: websites::revision => expected_revision,
            changeset: WebsiteChangeset::from(website),
            entity: "website"
        )
    }

    async fn delete(&self, id: WebsiteId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(websites::table.filter(websites::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
