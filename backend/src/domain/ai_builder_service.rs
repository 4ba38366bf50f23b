//! AI builder service: prompt in, generated content and a recorded session
//! out.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::ports::{
    AiSessionRepository, ContentGenerator, ContentGeneratorError, GenerationRequest, UserRepository,
    WebsiteRepository,
};
use super::service_support::{map_repository_error, not_found};
use super::{AiBuilderRequest, AiBuilderResponse, AiBuilderSession, Error, NewAiSession, UserId};

const ENTITY: &str = "ai session";

fn map_generator_error(error: ContentGeneratorError) -> Error {
    warn!(error = %error, "content generation failed");
    match error {
        ContentGeneratorError::Unavailable { message } => Error::service_unavailable(message),
        ContentGeneratorError::Rejected { message } => Error::validation(message),
    }
}

/// Drives content generation and keeps the session history.
#[derive(Clone)]
pub struct AiBuilderService<S, U, W, G> {
    sessions: Arc<S>,
    users: Arc<U>,
    websites: Arc<W>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<S, U, W, G> AiBuilderService<S, U, W, G> {
    /// Create a new service.
    pub fn new(
        sessions: Arc<S>,
        users: Arc<U>,
        websites: Arc<W>,
        generator: Arc<G>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            users,
            websites,
            generator,
            clock,
        }
    }
}

impl<S, U, W, G> AiBuilderService<S, U, W, G>
where
    S: AiSessionRepository,
    U: UserRepository,
    W: WebsiteRepository,
    G: ContentGenerator,
{
    /// Generate content for `user_id` and record the session.
    ///
    /// A target website must exist and belong to the requesting user.
    pub async fn generate(
        &self,
        user_id: UserId,
        request: AiBuilderRequest,
    ) -> Result<AiBuilderResponse, Error> {
        request.validate()?;
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        if user.is_none() {
            return Err(Error::referential_integrity("requesting user does not exist")
                .with_details(json!({ "userId": user_id })));
        }
        let website_name = match request.website_id {
            Some(website_id) => {
                let website = self
                    .websites
                    .find_by_id(website_id)
                    .await
                    .map_err(|err| map_repository_error("website", err))?;
                match website {
                    Some(website) if website.owner_id == user_id => Some(website.name),
                    _ => {
                        return Err(Error::referential_integrity(
                            "target website does not exist for this user",
                        )
                        .with_details(json!({ "websiteId": website_id })));
                    }
                }
            }
            None => None,
        };

        let session_id = Uuid::new_v4().to_string();
        let generated = self
            .generator
            .generate(&GenerationRequest {
                session_id: session_id.clone(),
                prompt: request.prompt.clone(),
                website_name,
            })
            .await
            .map_err(map_generator_error)?;

        let new_session = NewAiSession::try_new(
            session_id,
            user_id,
            request,
            generated.content,
            self.clock.utc(),
        )?;
        let session = self
            .sessions
            .create(&new_session)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        info!(session_id = %session.session_id, user_id = %user_id, "ai builder session recorded");
        Ok(AiBuilderResponse {
            session_id: session.session_id,
            generated_content: session.generated_content,
            suggestions: generated.suggestions,
        })
    }

    /// Fetch a session by its correlation key.
    pub async fn find(&self, session_id: &str) -> Result<AiBuilderSession, Error> {
        self.sessions
            .find_by_session_id(session_id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?
            .ok_or_else(|| not_found(ENTITY, session_id))
    }

    /// A user's sessions, newest first.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<AiBuilderSession>, Error> {
        self.sessions
            .list_by_user(user_id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))
    }

    /// Attach user feedback to a session.
    pub async fn record_feedback(
        &self,
        session_id: &str,
        feedback: &str,
    ) -> Result<AiBuilderSession, Error> {
        let current = self.find(session_id).await?;
        let next = current.with_feedback(feedback, self.clock.utc())?;
        self.sessions
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        Ok(next)
    }

    /// Mark a session's content as applied to its website.
    pub async fn mark_applied(&self, session_id: &str) -> Result<AiBuilderSession, Error> {
        let current = self.find(session_id).await?;
        if current.is_applied {
            return Ok(current);
        }
        let next = current.applied(self.clock.utc());
        self.sessions
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        info!(session_id = %session_id, "ai builder session applied");
        Ok(next)
    }
}
