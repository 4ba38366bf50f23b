//! Tests for the user service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockUserRepository, RepositoryError};
use crate::domain::service_test_support::{clock_start, fixture_clock, sample_user};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo), fixture_clock())
}

#[fixture]
fn draft() -> UserCreate {
    UserCreate {
        email: "grace@example.com".to_owned(),
        username: "grace".to_owned(),
        full_name: "Grace Hopper".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn register_stores_validated_user(draft: UserCreate) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .withf(|new_user| new_user.username == "grace" && new_user.is_active)
        .returning(|new_user| Ok(new_user.clone().into_user(UserId::new(11))));

    let user = make_service(repo)
        .register(draft)
        .await
        .expect("registered");

    assert_eq!(user.id, UserId::new(11));
    assert_eq!(user.created_at, clock_start());
}

#[rstest]
#[tokio::test]
async fn register_rejects_bad_email_without_touching_storage(mut draft: UserCreate) {
    draft.email = "not-an-email".to_owned();
    let mut repo = MockUserRepository::new();
    repo.expect_create().never();

    let error = make_service(repo)
        .register(draft)
        .await
        .expect_err("invalid");

    assert_eq!(error.code(), ErrorCode::Validation);
}

#[rstest]
#[tokio::test]
async fn register_surfaces_duplicate_username(draft: UserCreate) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(RepositoryError::unique_violation("users_username_key")));

    let error = make_service(repo)
        .register(draft)
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::UniqueConstraint);
}

#[rstest]
#[tokio::test]
async fn update_rejects_stale_revision() {
    let mut stored = sample_user(1);
    stored.revision = 3;
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(UserId::new(1)))
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_update().never();

    let error = make_service(repo)
        .update(UserId::new(1), &UserUpdate::default(), Some(2))
        .await
        .expect_err("stale");

    assert_eq!(error.code(), ErrorCode::RevisionMismatch);
}

#[rstest]
#[tokio::test]
async fn deactivate_writes_against_read_revision() {
    let stored = sample_user(1);
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_update()
        .times(1)
        .withf(|user, expected| !user.is_active && user.revision == 2 && *expected == 1)
        .return_once(|_, _| Ok(()));

    let user = make_service(repo)
        .deactivate(UserId::new(1), Some(1))
        .await
        .expect("deactivated");

    assert!(!user.is_active);
    assert!(user.updated_at > user.created_at);
}

#[rstest]
#[tokio::test]
async fn delete_reports_missing_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().return_once(|_| Ok(false));

    let error = make_service(repo)
        .delete(UserId::new(5))
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn get_maps_connection_failures() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(RepositoryError::connection("refused")));

    let error = make_service(repo)
        .get(UserId::new(1))
        .await
        .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
