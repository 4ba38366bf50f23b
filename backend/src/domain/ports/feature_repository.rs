//! Port abstraction for catalogue feature persistence adapters.
use async_trait::async_trait;

use crate::domain::{Feature, FeatureId, NewFeature};

use super::RepositoryError;

/// Port for storing features.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureRepository: Send + Sync {
    /// Insert a new feature; a taken name fails with
    /// [`RepositoryError::UniqueViolation`].
    async fn create(&self, feature: &NewFeature) -> Result<Feature, RepositoryError>;

    /// Fetch a feature by identifier.
    async fn find_by_id(&self, id: FeatureId) -> Result<Option<Feature>, RepositoryError>;

    /// Fetch a feature by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Feature>, RepositoryError>;

    /// List active features ordered by `(sort_order, id)`.
    async fn list_active(&self) -> Result<Vec<Feature>, RepositoryError>;

    /// Overwrite a feature if its stored revision is still
    /// `expected_revision`.
    async fn update(&self, feature: &Feature, expected_revision: u32)
    -> Result<(), RepositoryError>;
}
