//! PostgreSQL-backed template and feature repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{FeatureRepository, RepositoryError, TemplateRepository};
use crate::domain::{Feature, FeatureId, NewFeature, NewTemplate, Template, TemplateId};
use crate::query_optional;
use crate::query_vec;
use crate::update_with_revision;

use super::diesel_helpers::{TxError, collect_rows, map_diesel_error, map_pool_error};
use super::models::{
    FeatureChangeset, FeatureRow, NewFeatureRow, NewTemplateRow, TemplateChangeset, TemplateRow,
};
use super::pool::DbPool;
use super::schema::{features, templates};

/// Diesel-backed implementation of the template repository port.
#[derive(Clone)]
pub struct DieselTemplateRepository {
    pool: DbPool,
}

impl DieselTemplateRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Diesel-backed implementation of the feature repository port.
#[derive(Clone)]
pub struct DieselFeatureRepository {
    pool: DbPool,
}

impl DieselFeatureRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for DieselTemplateRepository {
    async fn create(&self, template: &NewTemplate) -> Result<Template, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: TemplateRow = diesel::insert_into(templates::table)
            .values(NewTemplateRow::from(template))
            .returning(TemplateRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Template::try_from(row)
    }

    async fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, RepositoryError> {
        query_optional!(
            self,
            templates::table,
            templates::id.eq(id.get()),
            TemplateRow,
            Template::try_from
        )
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Template>, RepositoryError> {
        query_optional!(
            self,
            templates::table,
            templates::name.eq(name),
            TemplateRow,
            Template::try_from
        )
    }

    async fn list_active(
        &self,
        category: Option<String>,
    ) -> Result<Vec<Template>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = templates::table
            .filter(templates::is_active.eq(true))
            .select(TemplateRow::as_select())
            .order_by(templates::id.asc())
            .into_boxed();
        if let Some(category) = category {
            query = query.filter(templates::category.eq(category));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;

        collect_rows(rows, Template::try_from)
    }

    async fn update(
        &self,
        template: &Template,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        update_with_revision!(
            self,
            table: templates::table,
            id: templates::id => template.id.get(),
            revision: templates::revision => expected_revision,
            changeset: TemplateChangeset::from(template),
            entity: "template"
        )
    }

    async fn increment_usage(
        &self,
        id: TemplateId,
        now: DateTime<Utc>,
    ) -> Result<Template, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<Template, TxError, _>(|conn| {
            async move {
                let row: TemplateRow = templates::table
                    .filter(templates::id.eq(id.get()))
                    .select(TemplateRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?
                    .ok_or_else(|| RepositoryError::not_found("template"))?;
                let next = Template::try_from(row)?.used(now);
                diesel::update(templates::table.filter(templates::id.eq(id.get())))
                    .set(&TemplateChangeset::from(&next))
                    .execute(conn)
                    .await?;
                Ok(next)
            }
            .scope_boxed()
        })
        .await
        .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl FeatureRepository for DieselFeatureRepository {
    async fn create(&self, feature: &NewFeature) -> Result<Feature, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: FeatureRow = diesel::insert_into(features::table)
            .values(NewFeatureRow::from(feature))
            .returning(FeatureRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Feature::try_from(row)
    }

    async fn find_by_id(&self, id: FeatureId) -> Result<Option<Feature>, RepositoryError> {
        query_optional!(
            self,
            features::table,
            features::id.eq(id.get()),
            FeatureRow,
            Feature::try_from
        )
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Feature>, RepositoryError> {
        query_optional!(
            self,
            features::table,
            features::name.eq(name),
            FeatureRow,
            Feature::try_from
        )
    }

    async fn list_active(&self) -> Result<Vec<Feature>, RepositoryError> {
        query_vec!(
            self,
            features::table,
            features::is_active.eq(true),
            (features::sort_order.asc(), features::id.asc()),
            FeatureRow,
            Feature::try_from
        )
    }

    async fn update(
        &self,
        feature: &Feature,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        update_with_revision!(
            self,
            table: features::table,
            id: features::id => feature.id.get(),
            revision: features::revision => expected_revision,
            changeset: FeatureChangeset::from(feature),
            entity: "feature"
        )
    }
}
