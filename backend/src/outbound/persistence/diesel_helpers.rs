//! Plumbing shared by the Diesel site repositories.
//!
//! Covers translation of Diesel and pool failures into [`RepositoryError`],
//! the `i32` column conversions for revisions and counters, the [`TxError`]
//! carried out of transactions, and three macros for the select-one,
//! select-many and revision-checked update shapes every repository repeats.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
///
/// Constraint violations carry the database's constraint name, which the
/// schema keeps equal to the names in
/// [`constraints`](crate::domain::ports::constraints) and
/// [`references`](crate::domain::ports::references).
pub fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                RepositoryError::unique_violation(constraint_or_unknown(info.constraint_name()))
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                RepositoryError::missing_reference(constraint_or_unknown(info.constraint_name()))
            }
            DatabaseErrorKind::ClosedConnection => {
                RepositoryError::connection("database connection error")
            }
            _ => RepositoryError::query("database error"),
        },
        _ => RepositoryError::query("database error"),
    }
}

fn constraint_or_unknown(name: Option<&str>) -> String {
    name.map_or_else(
        || {
            warn!("constraint violation reported without a constraint name");
            "unknown".to_owned()
        },
        str::to_owned,
    )
}

/// Cast database revision (i32) to domain revision (u32).
///
/// Database stores revisions as `i32` but domain uses `u32`. Revisions are
/// always positive, enforced by a check constraint.
#[expect(
    clippy::cast_sign_loss,
    reason = "revision is always non-negative in database"
)]
pub fn cast_revision(revision: i32) -> u32 {
    revision as u32
}

/// Cast domain revision (u32) to database revision (i32).
#[expect(
    clippy::cast_possible_wrap,
    reason = "revision values are always small positive integers"
)]
pub fn cast_revision_for_db(revision: u32) -> i32 {
    revision as i32
}

/// Cast a stored non-negative counter to its domain type.
pub fn cast_count(count: i32) -> u32 {
    u32::try_from(count).unwrap_or(0)
}

/// Cast a domain counter for storage, saturating at `i32::MAX`.
pub fn cast_count_for_db(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Failure inside a Diesel transaction closure.
///
/// Diesel requires the closure's error to be constructible from its own
/// error type; domain checks made inside the transaction use the second arm
/// and roll the transaction back.
#[derive(Debug)]
pub enum TxError {
    /// The database rejected a statement.
    Diesel(DieselError),
    /// A domain check failed mid-transaction.
    Domain(RepositoryError),
}

impl From<DieselError> for TxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl From<RepositoryError> for TxError {
    fn from(error: RepositoryError) -> Self {
        Self::Domain(error)
    }
}

impl From<TxError> for RepositoryError {
    fn from(error: TxError) -> Self {
        match error {
            TxError::Diesel(err) => map_diesel_error(err),
            TxError::Domain(err) => err,
        }
    }
}

/// Whether a revision-guarded update matched a row.
///
/// Zero means either a stale revision or a deleted record.
pub fn updated_any(updated_rows: usize) -> bool {
    updated_rows > 0
}

/// Disambiguate update failure by checking if it's a revision mismatch or
/// missing record.
///
/// `current_revision` is the stored revision read after the failed update,
/// or `None` when the record does not exist.
pub fn disambiguate_update_failure(
    current_revision: Result<Option<i32>, RepositoryError>,
    expected_revision: u32,
    entity: &str,
) -> RepositoryError {
    match current_revision {
        Ok(Some(actual)) => {
            RepositoryError::revision_mismatch(expected_revision, cast_revision(actual))
        }
        Ok(None) => RepositoryError::not_found(entity),
        Err(err) => err,
    }
}

/// Convert loaded rows, failing on the first row that does not decode.
pub fn collect_rows<R, T>(
    rows: Vec<R>,
    convert: impl FnMut(R) -> Result<T, RepositoryError>,
) -> Result<Vec<T>, RepositoryError> {
    rows.into_iter().map(convert).collect()
}

/// Select at most one row matching `$filter` and convert it.
///
/// The converter returns `Result<T, RepositoryError>`.
#[macro_export]
macro_rules! query_optional {
    (
        $self:ident,
        $table:expr,
        $filter:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;
        use $crate::outbound::persistence::diesel_helpers::map_pool_error;

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        result.map($converter).transpose()
    }};
}

/// Select every row matching `$filter` in `$order_by` order and convert
/// each one; the first failed conversion aborts the call.
#[macro_export]
macro_rules! query_vec {
    (
        $self:ident,
        $table:expr,
        $filter:expr,
        $order_by:expr,
        $row_type:ty,
        $converter:expr
    ) => {{
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::collect_rows;
        use $crate::outbound::persistence::diesel_helpers::map_diesel_error;
        use $crate::outbound::persistence::diesel_helpers::map_pool_error;

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .order_by($order_by)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        collect_rows(rows, $converter)
    }};
}

/// Write `$changeset` only if the stored revision is still `$expected`.
///
/// Handles: acquire connection, update the row whose id and revision match,
/// then read the stored revision to tell a stale write from a missing row.
#[macro_export]
macro_rules! update_with_revision {
    (
        $self:ident,
        table: $table:expr,
        id: $id_column:expr => $id:expr,
        revision: $revision_column:expr => $expected:expr,
        changeset: $changeset:expr,
        entity: $entity:expr
    ) => {{
        #[allow(unused_imports, reason = "prelude may be imported at call site")]
        use diesel::prelude::*;
        use diesel_async::RunQueryDsl;
        use $crate::outbound::persistence::diesel_helpers::{
            cast_revision_for_db, disambiguate_update_failure, map_diesel_error, map_pool_error,
            updated_any,
        };

        let mut conn = $self.pool.get().await.map_err(map_pool_error)?;
        let changeset = $changeset;
        let updated_rows = diesel::update($table)
            .filter(
                $id_column
                    .eq($id)
                    .and($revision_column.eq(cast_revision_for_db($expected))),
            )
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_any(updated_rows) {
            Ok(())
        } else {
            let current = $table
                .filter($id_column.eq($id))
                .select($revision_column)
                .first::<i32>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error);
            Err(disambiguate_update_failure(current, $expected, $entity))
        }
    }};
}
