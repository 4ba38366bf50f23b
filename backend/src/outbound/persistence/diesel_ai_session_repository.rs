//! PostgreSQL-backed `AiSessionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AiSessionRepository, RepositoryError};
use crate::domain::{AiBuilderSession, NewAiSession, UserId};
use crate::query_optional;
use crate::query_vec;
use crate::update_with_revision;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{AiSessionChangeset, AiSessionRow, NewAiSessionRow};
use super::pool::DbPool;
use super::schema::ai_builder_sessions;

/// Diesel-backed implementation of the AI session repository port.
#[derive(Clone)]
pub struct DieselAiSessionRepository {
    pool: DbPool,
}

impl DieselAiSessionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AiSessionRepository for DieselAiSessionRepository {
    async fn create(&self, session: &NewAiSession) -> Result<AiBuilderSession, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AiSessionRow = diesel::insert_into(ai_builder_sessions::table)
            .values(NewAiSessionRow::from(session))
            .returning(AiSessionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        AiBuilderSession::try_from(row)
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<AiBuilderSession>, RepositoryError> {
        query_optional!(
            self,
            ai_builder_sessions::table,
            ai_builder_sessions::session_id.eq(session_id),
            AiSessionRow,
            AiBuilderSession::try_from
        )
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<AiBuilderSession>, RepositoryError> {
        query_vec!(
            self,
            ai_builder_sessions::table,
            ai_builder_sessions::user_id.eq(user_id.get()),
            (
                ai_builder_sessions::created_at.desc(),
                ai_builder_sessions::id.desc()
            ),
            AiSessionRow,
            AiBuilderSession::try_from
        )
    }

    async fn update(
        &self,
        session: &AiBuilderSession,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        update_with_revision!(
            self,
            table: ai_builder_sessions::table,
            id: ai_builder_sessions::id => session.id.get(),
            revision: ai_builder_sessions::revision => expected_revision,
            changeset: AiSessionChangeset::from(session),
            entity: "AI builder session"
        )
    }
}
