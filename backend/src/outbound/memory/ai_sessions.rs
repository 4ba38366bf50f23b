//! `AiSessionRepository` over the in-memory tables.

use std::cmp::Reverse;

use async_trait::async_trait;

use crate::domain::ports::{AiSessionRepository, RepositoryError, constraints, references};
use crate::domain::{AiBuilderSession, AiSessionId, NewAiSession, UserId};

use super::{InMemorySiteStore, check_revision, missing_reference, unique_violation};

#[async_trait]
impl AiSessionRepository for InMemorySiteStore {
    async fn create(&self, session: &NewAiSession) -> Result<AiBuilderSession, RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&session.user_id) {
            return Err(missing_reference(references::AI_SESSION_USER));
        }
        if let Some(website_id) = session.website_id
            && !state.websites.contains_key(&website_id)
        {
            return Err(missing_reference(references::AI_SESSION_WEBSITE));
        }
        if state
            .sessions
            .values()
            .any(|s| s.session_id == session.session_id)
        {
            return Err(unique_violation(constraints::AI_SESSIONS_SESSION_ID));
        }
        let id = AiSessionId::new(state.session_ids.next());
        let stored = session.clone().into_session(id);
        state.sessions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<AiBuilderSession>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .values()
            .find(|s| s.session_id == session_id)
            .cloned())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<AiBuilderSession>, RepositoryError> {
        let state = self.state.lock().await;
        let mut sessions: Vec<AiBuilderSession> = state
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| Reverse((s.created_at, s.id)));
        Ok(sessions)
    }

    async fn update(
        &self,
        session: &AiBuilderSession,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let stored = state
            .sessions
            .get_mut(&session.id)
            .ok_or_else(|| RepositoryError::not_found("ai session"))?;
        check_revision(stored.revision, expected_revision)?;
        *stored = session.clone();
        Ok(())
    }
}
