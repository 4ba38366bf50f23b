//! AI builder sessions: one prompt, one generated payload, optional feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{self, ValidationError};
use super::{AiSessionId, JsonObject, UserId, WebsiteId};

/// Maximum length of a session correlation key.
pub const SESSION_ID_MAX: usize = 100;
/// Maximum length of a prompt.
pub const PROMPT_MAX: usize = 2000;
/// Maximum length of user feedback.
pub const FEEDBACK_MAX: usize = 1000;

pub(crate) fn validate_session_id(value: &str) -> Result<(), ValidationError> {
    validation::token("session_id", value, SESSION_ID_MAX)
}

pub(crate) fn validate_prompt(value: &str) -> Result<(), ValidationError> {
    validation::required_text("prompt", value, PROMPT_MAX)
}

pub(crate) fn validate_feedback(value: &str) -> Result<(), ValidationError> {
    validation::required_text("user_feedback", value, FEEDBACK_MAX)
}

/// A recorded generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiBuilderSession {
    /// Storage-assigned identifier.
    pub id: AiSessionId,
    /// External correlation key, unique across sessions.
    pub session_id: String,
    /// Requesting user.
    pub user_id: UserId,
    /// Website the content was generated for, if any.
    pub website_id: Option<WebsiteId>,
    /// Prompt sent to the generator.
    pub prompt: String,
    /// Opaque generator output.
    pub generated_content: JsonObject,
    /// Free-text feedback from the user.
    pub user_feedback: Option<String>,
    /// Whether the output was applied to a site.
    pub is_applied: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl AiBuilderSession {
    /// Return a copy carrying `feedback` with the revision bumped.
    pub fn with_feedback(
        &self,
        feedback: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        validate_feedback(feedback)?;
        let mut next = self.clone();
        next.user_feedback = Some(feedback.to_owned());
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        Ok(next)
    }

    /// Return a copy marked as applied with the revision bumped.
    pub fn applied(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.is_applied = true;
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        next
    }
}

/// Generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AiBuilderRequest {
    /// Natural-language description of the desired content.
    #[schema(example = "A landing page for a neighbourhood bakery")]
    pub prompt: String,
    /// Website the content is for.
    #[serde(default)]
    pub website_id: Option<WebsiteId>,
}

impl AiBuilderRequest {
    /// Check every field constraint without side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_prompt(&self.prompt)
    }
}

/// Output of a content generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedContent {
    /// Opaque generated payload.
    pub content: JsonObject,
    /// Follow-up ideas for the user.
    pub suggestions: Vec<String>,
}

/// A validated session awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAiSession {
    /// External correlation key.
    pub session_id: String,
    /// Requesting user.
    pub user_id: UserId,
    /// Target website.
    pub website_id: Option<WebsiteId>,
    /// Prompt sent to the generator.
    pub prompt: String,
    /// Generator output.
    pub generated_content: JsonObject,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewAiSession {
    /// Validate the request and correlation key.
    pub fn try_new(
        session_id: String,
        user_id: UserId,
        request: AiBuilderRequest,
        generated_content: JsonObject,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        validate_session_id(&session_id)?;
        request.validate()?;
        Ok(Self {
            session_id,
            user_id,
            website_id: request.website_id,
            prompt: request.prompt,
            generated_content,
            created_at: now,
        })
    }

    /// Attach the storage-assigned identifier.
    pub fn into_session(self, id: AiSessionId) -> AiBuilderSession {
        AiBuilderSession {
            id,
            session_id: self.session_id,
            user_id: self.user_id,
            website_id: self.website_id,
            prompt: self.prompt,
            generated_content: self.generated_content,
            user_feedback: None,
            is_applied: false,
            created_at: self.created_at,
            updated_at: self.created_at,
            revision: 1,
        }
    }
}

/// Feedback payload for a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AiSessionFeedback {
    /// Free-text feedback.
    pub user_feedback: String,
}

/// Result of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AiBuilderResponse {
    /// Correlation key of the recorded session.
    pub session_id: String,
    /// Generated payload.
    #[schema(value_type = Object)]
    pub generated_content: JsonObject,
    /// Follow-up ideas.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Read-only projection of an [`AiBuilderSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AiSessionResponse {
    /// Identifier.
    pub id: AiSessionId,
    /// Correlation key.
    pub session_id: String,
    /// Requesting user.
    pub user_id: UserId,
    /// Target website.
    pub website_id: Option<WebsiteId>,
    /// Prompt.
    pub prompt: String,
    /// Generated payload.
    #[schema(value_type = Object)]
    pub generated_content: JsonObject,
    /// User feedback.
    pub user_feedback: Option<String>,
    /// Whether the output was applied.
    pub is_applied: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl From<&AiBuilderSession> for AiSessionResponse {
    fn from(session: &AiBuilderSession) -> Self {
        Self {
            id: session.id,
            session_id: session.session_id.clone(),
            user_id: session.user_id,
            website_id: session.website_id,
            prompt: session.prompt.clone(),
            generated_content: session.generated_content.clone(),
            user_feedback: session.user_feedback.clone(),
            is_applied: session.is_applied,
            created_at: session.created_at,
            updated_at: session.updated_at,
            revision: session.revision,
        }
    }
}
