//! PostgreSQL-backed `NavigationRepository` implementation using Diesel ORM.
//!
//! The foreign key on `parent_id` cannot express "same website" or "no
//! loops", so writes that set a parent check it inside the same transaction
//! as the write. A reparenting locks every item of the website first, which
//! serialises concurrent moves within one menu.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{NavigationRepository, RepositoryError, check_reparent, references};
use crate::domain::{NavigationItem, NavigationItemId, NewNavigationItem, WebsiteId};
use crate::query_optional;
use crate::query_vec;

use super::diesel_helpers::{
    TxError, cast_revision_for_db, disambiguate_update_failure, map_diesel_error, map_pool_error,
};
use super::models::{NavigationItemChangeset, NavigationItemRow, NewNavigationItemRow};
use super::pool::DbPool;
use super::schema::navigation_items;

const ENTITY: &str = "navigation item";

/// Diesel-backed implementation of the navigation repository port.
#[derive(Clone)]
pub struct DieselNavigationRepository {
    pool: DbPool,
}

impl DieselNavigationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_item(row: NavigationItemRow) -> Result<NavigationItem, RepositoryError> {
    Ok(row.into())
}

/// Ensure `parent_id`, when set, names an item of `website_id`.
async fn check_parent(
    conn: &mut AsyncPgConnection,
    website_id: i64,
    parent_id: Option<i64>,
) -> Result<(), TxError> {
    let Some(parent) = parent_id else {
        return Ok(());
    };
    let parent_site: Option<i64> = navigation_items::table
        .filter(navigation_items::id.eq(parent))
        .select(navigation_items::website_id)
        .first(conn)
        .await
        .optional()?;
    if parent_site == Some(website_id) {
        Ok(())
    } else {
        Err(RepositoryError::missing_reference(references::NAVIGATION_PARENT).into())
    }
}

#[async_trait]
impl NavigationRepository for DieselNavigationRepository {
    async fn create(&self, item: &NewNavigationItem) -> Result<NavigationItem, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewNavigationItemRow::from(item);

        let row = conn
            .transaction::<NavigationItemRow, TxError, _>(|conn| {
                async move {
                    check_parent(conn, new_row.website_id, new_row.parent_id).await?;
                    let row = diesel::insert_into(navigation_items::table)
                        .values(&new_row)
                        .returning(NavigationItemRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(
        &self,
        id: NavigationItemId,
    ) -> Result<Option<NavigationItem>, RepositoryError> {
        query_optional!(
            self,
            navigation_items::table,
            navigation_items::id.eq(id.get()),
            NavigationItemRow,
            row_to_item
        )
    }

    async fn list_by_website(
        &self,
        website_id: WebsiteId,
    ) -> Result<Vec<NavigationItem>, RepositoryError> {
        query_vec!(
            self,
            navigation_items::table,
            navigation_items::website_id.eq(website_id.get()),
            navigation_items::id.asc(),
            NavigationItemRow,
            row_to_item
        )
    }

    async fn update(
        &self,
        item: &NavigationItem,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = item.id.get();
        let website_id = item.website_id.get();
        let parent_id = item.parent_id;
        let changeset = NavigationItemChangeset::from(item);

        conn.transaction::<(), TxError, _>(|conn| {
            async move {
                let locked: Vec<NavigationItemRow> = navigation_items::table
                    .filter(navigation_items::website_id.eq(website_id))
                    .select(NavigationItemRow::as_select())
                    .for_update()
                    .load(conn)
                    .await?;
                let siblings: Vec<NavigationItem> =
                    locked.into_iter().map(NavigationItem::from).collect();
                let moved = siblings
                    .iter()
                    .find(|stored| stored.id.get() == id)
                    .is_some_and(|stored| stored.parent_id != parent_id);
                if moved {
                    check_reparent(&siblings, NavigationItemId::new(id), parent_id)?;
                }
                let updated_rows = diesel::update(
                    navigation_items::table.filter(
                        navigation_items::id.eq(id).and(
                            navigation_items::revision
                                .eq(cast_revision_for_db(expected_revision)),
                        ),
                    ),
                )
                .set(&changeset)
                .execute(conn)
                .await?;
                if updated_rows > 0 {
                    return Ok(());
                }
                let current = navigation_items::table
                    .filter(navigation_items::id.eq(id))
                    .select(navigation_items::revision)
                    .first::<i32>(conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error);
                let failure = disambiguate_update_failure(current, expected_revision, ENTITY);
                Err(failure.into())
            }
            .scope_boxed()
        })
        .await
        .map_err(RepositoryError::from)
    }

    async fn delete(
        &self,
        id: NavigationItemId,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<bool, TxError, _>(|conn| {
            async move {
                let removed: Option<Option<i64>> = navigation_items::table
                    .filter(navigation_items::id.eq(id.get()))
                    .select(navigation_items::parent_id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                let Some(grandparent) = removed else {
                    return Ok(false);
                };
                diesel::update(
                    navigation_items::table.filter(navigation_items::parent_id.eq(id.get())),
                )
                .set((
                    navigation_items::parent_id.eq(grandparent),
                    navigation_items::updated_at.eq(now),
                    navigation_items::revision.eq(navigation_items::revision + 1),
                ))
                .execute(conn)
                .await?;
                diesel::delete(navigation_items::table.filter(navigation_items::id.eq(id.get())))
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(RepositoryError::from)
    }
}
