//! Template and feature repositories over the in-memory tables.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{FeatureRepository, RepositoryError, TemplateRepository, constraints};
use crate::domain::{Feature, FeatureId, NewFeature, NewTemplate, Template, TemplateId};

use super::{InMemorySiteStore, check_revision, unique_violation};

#[async_trait]
impl TemplateRepository for InMemorySiteStore {
    async fn create(&self, template: &NewTemplate) -> Result<Template, RepositoryError> {
        let mut state = self.state.lock().await;
        if state.templates.values().any(|t| t.name == template.name) {
            return Err(unique_violation(constraints::TEMPLATES_NAME));
        }
        let id = TemplateId::new(state.template_ids.next());
        let stored = template.clone().into_template(id);
        state.templates.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: TemplateId) -> Result<Option<Template>, RepositoryError> {
        Ok(self.state.lock().await.templates.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Template>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.templates.values().find(|t| t.name == name).cloned())
    }

    async fn list_active(
        &self,
        category: Option<String>,
    ) -> Result<Vec<Template>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .templates
            .values()
            .filter(|t| t.is_active)
            .filter(|t| category.as_deref().is_none_or(|c| t.category == c))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        template: &Template,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let stored = state
            .templates
            .get_mut(&template.id)
            .ok_or_else(|| RepositoryError::not_found("template"))?;
        check_revision(stored.revision, expected_revision)?;
        *stored = template.clone();
        Ok(())
    }

    async fn increment_usage(
        &self,
        id: TemplateId,
        now: DateTime<Utc>,
    ) -> Result<Template, RepositoryError> {
        let mut state = self.state.lock().await;
        let stored = state
            .templates
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("template"))?;
        *stored = stored.used(now);
        Ok(stored.clone())
    }
}

#[async_trait]
impl FeatureRepository for InMemorySiteStore {
    async fn create(&self, feature: &NewFeature) -> Result<Feature, RepositoryError> {
        let mut state = self.state.lock().await;
        if state.features.values().any(|f| f.name == feature.name) {
            return Err(unique_violation(constraints::FEATURES_NAME));
        }
        let id = FeatureId::new(state.feature_ids.next());
        let stored = feature.clone().into_feature(id);
        state.features.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: FeatureId) -> Result<Option<Feature>, RepositoryError> {
        Ok(self.state.lock().await.features.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Feature>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.features.values().find(|f| f.name == name).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Feature>, RepositoryError> {
        let state = self.state.lock().await;
        let mut features: Vec<Feature> = state
            .features
            .values()
            .filter(|f| f.is_active)
            .cloned()
            .collect();
        features.sort_by_key(Feature::order_key);
        Ok(features)
    }

    async fn update(
        &self,
        feature: &Feature,
        expected_revision: u32,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        let stored = state
            .features
            .get_mut(&feature.id)
            .ok_or_else(|| RepositoryError::not_found("feature"))?;
        check_revision(stored.revision, expected_revision)?;
        *stored = feature.clone();
        Ok(())
    }
}
