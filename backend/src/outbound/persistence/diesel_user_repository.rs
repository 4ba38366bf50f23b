//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{NewUser, User, UserId};
use crate::query_optional;
use crate::update_with_revision;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, RepositoryError> {
    Ok(row.into())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        query_optional!(
            self,
            users::table,
            users::id.eq(id.get()),
            UserRow,
            row_to_user
        )
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        query_optional!(
            self,
            users::table,
            users::username.eq(username),
            UserRow,
            row_to_user
        )
    }

    async fn update(&self, user: &User, expected_revision: u32) -> Result<(), RepositoryError> {
        update_with_revision!(
            self,
            table: users::table,
            id: users::id => user.id.get(),
            revision: users::revision => expected_revision,
            changeset: UserChangeset::from(user),
            entity: "user"
        )
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
