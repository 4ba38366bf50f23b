//! Port abstraction for catalogue template persistence adapters.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewTemplate, Template, TemplateId};

use super::RepositoryError;

/// Port for storing templates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Insert a new template; a taken name fails with
    /// [`RepositoryError::UniqueViolation`].
    async fn create(&self, template: &NewTemplate) -> Result<Template, RepositoryError>;

    /// Fetch a template by identifier.
    async fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, RepositoryError>;

    /// Fetch a template by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Template>, RepositoryError>;

    /// List active templates ordered by identifier, optionally restricted to
    /// one category.
    async fn list_active(&self, category: Option<String>)
    -> Result<Vec<Template>, RepositoryError>;

    /// Overwrite a template if its stored revision is still
    /// `expected_revision`.
    async fn update(
        &self,
        template: &Template,
        expected_revision: u32,
    ) -> Result<(), RepositoryError>;

    /// Atomically add one to the usage counter, saturating at the maximum,
    /// and return the updated template.
    async fn increment_usage(
        &self,
        id: TemplateId,
        now: DateTime<Utc>,
    ) -> Result<Template, RepositoryError>;
}
