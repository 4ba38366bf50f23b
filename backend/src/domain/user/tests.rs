//! Tests for the user model and its transfer schemas.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn draft() -> UserCreate {
    UserCreate {
        email: "ada@example.com".to_owned(),
        username: "ada".to_owned(),
        full_name: "Ada Lovelace".to_owned(),
    }
}

#[rstest]
fn create_applies_defaults(draft: UserCreate, now: DateTime<Utc>) {
    let user = User::create(UserId::new(7), draft, now).expect("valid draft");
    assert_eq!(user.id, UserId::new(7));
    assert!(user.is_active);
    assert!(!user.is_premium);
    assert_eq!(user.created_at, now);
    assert_eq!(user.updated_at, now);
    assert_eq!(user.revision, 1);
}

#[rstest]
fn create_rejects_malformed_email(mut draft: UserCreate, now: DateTime<Utc>) {
    draft.email = "not-an-email".to_owned();
    let error = User::create(UserId::new(1), draft, now).expect_err("invalid email");
    assert_eq!(error, ValidationError::InvalidEmail { field: "email" });
}

#[rstest]
#[case("", "username")]
#[case("has space", "username")]
fn create_rejects_bad_usernames(
    mut draft: UserCreate,
    now: DateTime<Utc>,
    #[case] username: &str,
    #[case] field: &str,
) {
    draft.username = username.to_owned();
    let error = User::create(UserId::new(1), draft, now).expect_err("invalid username");
    assert_eq!(error.field(), field);
}

#[rstest]
fn create_rejects_overlong_full_name(mut draft: UserCreate, now: DateTime<Utc>) {
    draft.full_name = "n".repeat(FULL_NAME_MAX + 1);
    let error = User::create(UserId::new(1), draft, now).expect_err("too long");
    assert!(matches!(
        error,
        ValidationError::TooLong {
            field: "full_name",
            ..
        }
    ));
}

#[rstest]
fn apply_overwrites_provided_fields_only(draft: UserCreate, now: DateTime<Utc>) {
    let user = User::create(UserId::new(1), draft, now).expect("valid draft");
    let later = now + chrono::Duration::minutes(5);
    let update = UserUpdate {
        is_premium: Some(true),
        ..UserUpdate::default()
    };

    let updated = user.apply(&update, later).expect("valid update");

    assert!(updated.is_premium);
    assert_eq!(updated.full_name, user.full_name);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.updated_at, later);
    assert_eq!(updated.created_at, now);
    assert_eq!(updated.revision, 2);
}

#[rstest]
fn apply_rejects_blank_full_name(draft: UserCreate, now: DateTime<Utc>) {
    let user = User::create(UserId::new(1), draft, now).expect("valid draft");
    let update = UserUpdate {
        full_name: Some("  ".to_owned()),
        ..UserUpdate::default()
    };
    assert_eq!(
        user.apply(&update, now),
        Err(ValidationError::Blank { field: "full_name" })
    );
}

#[rstest]
fn create_schema_rejects_unknown_fields() {
    let payload = json!({
        "email": "ada@example.com",
        "username": "ada",
        "full_name": "Ada",
        "is_premium": true,
    });
    let result: Result<UserCreate, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn response_uses_snake_case_fields(draft: UserCreate, now: DateTime<Utc>) {
    let user = User::create(UserId::new(3), draft, now).expect("valid draft");
    let value = serde_json::to_value(UserResponse::from(&user)).expect("serialises");
    assert_eq!(value["id"], json!(3));
    assert_eq!(value["full_name"], json!("Ada Lovelace"));
    assert_eq!(value["is_active"], json!(true));
}
