//! User account service.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::UserRepository;
use super::service_support::{check_expected_revision, map_repository_error, not_found};
use super::{Error, NewUser, User, UserCreate, UserId, UserUpdate};

const ENTITY: &str = "user";

/// Registers, updates and removes user accounts.
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Validate and store a new account.
    ///
    /// A taken email or username fails with
    /// [`ErrorCode::UniqueConstraint`](super::ErrorCode::UniqueConstraint).
    pub async fn register(&self, draft: UserCreate) -> Result<User, Error> {
        let new_user = NewUser::try_new(draft, self.clock.utc())?;
        let user = self
            .users
            .create(&new_user)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    /// Fetch an account.
    pub async fn get(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Apply a partial update.
    ///
    /// When `expected_revision` is given it must match the stored revision.
    pub async fn update(
        &self,
        id: UserId,
        update: &UserUpdate,
        expected_revision: Option<u32>,
    ) -> Result<User, Error> {
        let current = self.get(id).await?;
        check_expected_revision(expected_revision, current.revision)?;
        let next = current.apply(update, self.clock.utc())?;
        self.users
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        Ok(next)
    }

    /// Mark an account inactive.
    pub async fn deactivate(
        &self,
        id: UserId,
        expected_revision: Option<u32>,
    ) -> Result<User, Error> {
        let update = UserUpdate {
            is_active: Some(false),
            ..UserUpdate::default()
        };
        self.update(id, &update, expected_revision).await
    }

    /// Delete an account with its websites and AI sessions.
    pub async fn delete(&self, id: UserId) -> Result<(), Error> {
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        if !deleted {
            return Err(not_found(ENTITY, id));
        }
        info!(user_id = %id, "user deleted with websites and sessions");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
