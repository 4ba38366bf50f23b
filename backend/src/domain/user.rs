//! Account holders who own websites and AI builder sessions.
//!
//! Emails and usernames are globally unique; storage enforces that, this
//! module only enforces field shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;
use super::validation::{self, ValidationError};

/// Maximum length of a username.
pub const USERNAME_MAX: usize = 50;
/// Maximum length of a full name.
pub const FULL_NAME_MAX: usize = 100;

pub(crate) fn validate_email(value: &str) -> Result<(), ValidationError> {
    validation::email("email", value)
}

pub(crate) fn validate_username(value: &str) -> Result<(), ValidationError> {
    validation::token("username", value, USERNAME_MAX)
}

pub(crate) fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    validation::required_text("full_name", value, FULL_NAME_MAX)
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Storage-assigned identifier.
    pub id: UserId,
    /// Unique email address.
    pub email: String,
    /// Unique handle.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Whether the account is on a paid plan.
    pub is_premium: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UserCreate {
    /// Email address in `local@domain.tld` form.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Unique handle without whitespace.
    #[schema(example = "ada")]
    pub username: String,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
}

impl UserCreate {
    /// Check every field constraint without side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_username(&self.username)?;
        validate_full_name(&self.full_name)
    }
}

/// A validated user awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique email address.
    pub email: String,
    /// Unique handle.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Whether the account is on a paid plan.
    pub is_premium: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Validate `draft` and apply defaults.
    pub fn try_new(draft: UserCreate, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            email: draft.email,
            username: draft.username,
            full_name: draft.full_name,
            is_active: true,
            is_premium: false,
            created_at: now,
        })
    }

    /// Attach the storage-assigned identifier.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            username: self.username,
            full_name: self.full_name,
            is_active: self.is_active,
            is_premium: self.is_premium,
            created_at: self.created_at,
            updated_at: self.created_at,
            revision: 1,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UserUpdate {
    /// New display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// New plan flag.
    #[serde(default)]
    pub is_premium: Option<bool>,
    /// Activate or deactivate the account.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Check the provided fields only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.full_name
            .as_deref()
            .map_or(Ok(()), validate_full_name)
    }
}

impl User {
    /// Build a user from a registration payload.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use sitecraft::domain::{User, UserCreate, UserId};
    ///
    /// let draft = UserCreate {
    ///     email: "ada@example.com".into(),
    ///     username: "ada".into(),
    ///     full_name: "Ada Lovelace".into(),
    /// };
    /// let user = User::create(UserId::new(1), draft, Utc::now()).unwrap();
    /// assert!(user.is_active);
    /// assert_eq!(user.revision, 1);
    /// ```
    pub fn create(
        id: UserId,
        draft: UserCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(NewUser::try_new(draft, now)?.into_user(id))
    }

    /// Return a copy with the provided fields overwritten and the revision
    /// bumped.
    pub fn apply(&self, update: &UserUpdate, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        update.validate()?;
        let mut next = self.clone();
        if let Some(full_name) = &update.full_name {
            next.full_name.clone_from(full_name);
        }
        if let Some(is_premium) = update.is_premium {
            next.is_premium = is_premium;
        }
        if let Some(is_active) = update.is_active {
            next.is_active = is_active;
        }
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        Ok(next)
    }
}

/// Read-only projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Identifier.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Handle.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Whether the account is on a paid plan.
    pub is_premium: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            is_premium: user.is_premium,
            created_at: user.created_at,
            updated_at: user.updated_at,
            revision: user.revision,
        }
    }
}

#[cfg(test)]
mod tests;
