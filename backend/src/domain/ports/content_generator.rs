//! Port for the external AI content generation backend.

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::domain::{GeneratedContent, JsonObject};

use super::define_port_error;

define_port_error! {
    /// Errors raised by content generator adapters.
    pub enum ContentGeneratorError {
        /// The generator could not be reached.
        Unavailable { message: String } => "content generator unavailable: {message}",
        /// The generator refused the prompt.
        Rejected { message: String } => "content generator rejected prompt: {message}",
    }
}

/// Input handed to a content generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Correlation key recorded with the session.
    pub session_id: String,
    /// User prompt.
    pub prompt: String,
    /// Name of the target website, when one was given.
    pub website_name: Option<String>,
}

/// Port for producing site content from a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate content for `request`.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedContent, ContentGeneratorError>;
}

/// Deterministic generator that echoes the prompt into a hero section.
///
/// Use it for local runs and tests that do not exercise a real backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContentGenerator;

#[async_trait]
impl ContentGenerator for FixtureContentGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedContent, ContentGeneratorError> {
        let title = request
            .website_name
            .clone()
            .unwrap_or_else(|| "Your new site".to_owned());
        let mut content = Map::new();
        content.insert(
            "hero".to_owned(),
            json!({ "title": title, "subtitle": request.prompt }),
        );
        content.insert("blocks".to_owned(), Value::Array(Vec::new()));
        Ok(GeneratedContent {
            content: JsonObject::from(content),
            suggestions: vec![
                "Add a call to action".to_owned(),
                "Describe your services".to_owned(),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_echoes_prompt() {
        let request = GenerationRequest {
            session_id: "s-1".to_owned(),
            prompt: "A bakery".to_owned(),
            website_name: Some("Crumbs".to_owned()),
        };
        let generated = FixtureContentGenerator
            .generate(&request)
            .await
            .expect("fixture never fails");
        assert_eq!(
            generated.content.get("hero"),
            Some(&json!({"title": "Crumbs", "subtitle": "A bakery"}))
        );
        assert_eq!(generated.suggestions.len(), 2);
    }
}
