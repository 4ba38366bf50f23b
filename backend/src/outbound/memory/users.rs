//! `UserRepository` over the in-memory tables.

use async_trait::async_trait;

use crate::domain::ports::{RepositoryError, UserRepository, constraints};
use crate::domain::{NewUser, User, UserId};

use super::{InMemorySiteStore, check_revision, unique_violation};

#[async_trait]
impl UserRepository for InMemorySiteStore {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(unique_violation(constraints::USERS_EMAIL));
        }
        if state.users.values().any(|u| u.username == user.username) {
            return Err(unique_violation(constraints::USERS_USERNAME));
        }
        let id = UserId::new(state.user_ids.next());
        let stored = user.clone().into_user(id);
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update(&self, user: &User, expected_revision: u32) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let others = || state.users.values().filter(|other| other.id != user.id);
        if others().any(|other| other.email == user.email) {
            return Err(unique_violation(constraints::USERS_EMAIL));
        }
        if others().any(|other| other.username == user.username) {
            return Err(unique_violation(constraints::USERS_USERNAME));
        }
        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or_else(|| RepositoryError::not_found("user"))?;
        check_revision(stored.revision, expected_revision)?;
        *stored = user.clone();
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        Ok(self.state.lock().await.remove_user(id))
    }
}
