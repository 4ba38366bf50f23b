//! Shared plumbing for the domain services: error mapping and revision
//! checks.

use std::fmt::Display;

use serde_json::json;
use tracing::debug;

use super::Error;
use super::ports::RepositoryError;

/// Translate a repository failure into a domain error.
///
/// `entity` names the aggregate the call was about and appears in messages.
pub(crate) fn map_repository_error(entity: &'static str, error: RepositoryError) -> Error {
    debug!(entity, error = %error, "repository call failed");
    match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("{entity} repository unavailable: {message}"))
        }
        RepositoryError::Query { message } => {
            Error::internal(format!("{entity} repository error: {message}"))
        }
        RepositoryError::UniqueViolation { constraint } => {
            Error::unique_constraint(format!("{entity} already exists"))
                .with_details(json!({ "constraint": constraint }))
        }
        RepositoryError::MissingReference { reference } => {
            Error::referential_integrity(format!("{entity} references a missing record"))
                .with_details(json!({ "reference": reference }))
        }
        RepositoryError::RevisionMismatch { expected, actual } => {
            Error::revision_mismatch(expected, actual)
        }
        RepositoryError::NotFound { entity: missing } => {
            Error::not_found(format!("{missing} not found"))
        }
        RepositoryError::Inconsistent { message } => Error::consistency(message),
    }
}

/// Domain error for a lookup that found nothing.
pub(crate) fn not_found(entity: &'static str, id: impl Display) -> Error {
    Error::not_found(format!("{entity} {id} not found"))
        .with_details(json!({ "entity": entity, "id": id.to_string() }))
}

/// Reject a caller whose view of the record is stale.
pub(crate) fn check_expected_revision(expected: Option<u32>, actual: u32) -> Result<(), Error> {
    match expected {
        Some(expected) if expected != actual => Err(Error::revision_mismatch(expected, actual)),
        _ => Ok(()),
    }
}
