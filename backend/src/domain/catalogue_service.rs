//! Catalogue service: templates, marketing features and the landing page.

use std::sync::Arc;

use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ports::{FeatureRepository, TemplateRepository};
use super::service_support::{check_expected_revision, map_repository_error, not_found};
use super::{
    Error, Feature, FeatureCreate, FeatureId, FeatureUpdate, LandingContent, LandingPageData,
    NewFeature, NewTemplate, Template, TemplateCreate, TemplateId, TemplateUpdate,
};

const TEMPLATE: &str = "template";
const FEATURE: &str = "feature";

/// Catalogue entries and landing copy loaded from a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogueSeed {
    /// Templates to ensure exist.
    #[serde(default)]
    pub templates: Vec<TemplateCreate>,
    /// Features to ensure exist.
    #[serde(default)]
    pub features: Vec<FeatureCreate>,
    /// Static landing page copy.
    #[serde(default)]
    pub landing: LandingContent,
}

/// Counts of entries a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Templates created by this run.
    pub templates_created: usize,
    /// Features created by this run.
    pub features_created: usize,
}

/// Maintains templates and features.
#[derive(Clone)]
pub struct CatalogueService<T, F> {
    templates: Arc<T>,
    features: Arc<F>,
    clock: Arc<dyn Clock>,
}

impl<T, F> CatalogueService<T, F> {
    /// Create a new service over the given repositories.
    pub fn new(templates: Arc<T>, features: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            templates,
            features,
            clock,
        }
    }
}

impl<T, F> CatalogueService<T, F>
where
    T: TemplateRepository,
    F: FeatureRepository,
{
    /// Add a template; names are unique.
    pub async fn create_template(&self, draft: TemplateCreate) -> Result<Template, Error> {
        let new_template = NewTemplate::try_new(draft, self.clock.utc())?;
        self.templates
            .create(&new_template)
            .await
            .map_err(|err| map_repository_error(TEMPLATE, err))
    }

    /// Fetch a template.
    pub async fn get_template(&self, id: TemplateId) -> Result<Template, Error> {
        self.templates
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(TEMPLATE, err))?
            .ok_or_else(|| not_found(TEMPLATE, id))
    }

    /// Apply a partial update to a template.
    pub async fn update_template(
        &self,
        id: TemplateId,
        update: &TemplateUpdate,
        expected_revision: Option<u32>,
    ) -> Result<Template, Error> {
        let current = self.get_template(id).await?;
        check_expected_revision(expected_revision, current.revision)?;
        let next = current.apply(update, self.clock.utc())?;
        self.templates
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(TEMPLATE, err))?;
        Ok(next)
    }

    /// Active templates, optionally restricted to one category.
    pub async fn list_templates(&self, category: Option<String>) -> Result<Vec<Template>, Error> {
        self.templates
            .list_active(category)
            .await
            .map_err(|err| map_repository_error(TEMPLATE, err))
    }

    /// Count one more use of a template.
    pub async fn record_usage(&self, id: TemplateId) -> Result<Template, Error> {
        self.templates
            .increment_usage(id, self.clock.utc())
            .await
            .map_err(|err| map_repository_error(TEMPLATE, err))
    }

    /// Add a feature; names are unique.
    pub async fn create_feature(&self, draft: FeatureCreate) -> Result<Feature, Error> {
        let new_feature = NewFeature::try_new(draft, self.clock.utc())?;
        self.features
            .create(&new_feature)
            .await
            .map_err(|err| map_repository_error(FEATURE, err))
    }

    /// Apply a partial update to a feature.
    pub async fn update_feature(
        &self,
        id: FeatureId,
        update: &FeatureUpdate,
        expected_revision: Option<u32>,
    ) -> Result<Feature, Error> {
        let current = self
            .features
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(FEATURE, err))?
            .ok_or_else(|| not_found(FEATURE, id))?;
        check_expected_revision(expected_revision, current.revision)?;
        let next = current.apply(update, self.clock.utc())?;
        self.features
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(FEATURE, err))?;
        Ok(next)
    }

    /// Active features ordered by `(sort_order, id)`.
    pub async fn list_features(&self) -> Result<Vec<Feature>, Error> {
        let mut features = self
            .features
            .list_active()
            .await
            .map_err(|err| map_repository_error(FEATURE, err))?;
        features.sort_by_key(Feature::order_key);
        Ok(features)
    }

    /// Landing page data from static copy and the active features.
    pub async fn landing_page(&self, content: LandingContent) -> Result<LandingPageData, Error> {
        let features = self.list_features().await?;
        Ok(LandingPageData::assemble(content, &features))
    }

    /// Insert every seed entry whose name is not yet taken.
    ///
    /// Running the same seed twice creates nothing the second time.
    pub async fn seed(&self, seed: &CatalogueSeed) -> Result<SeedOutcome, Error> {
        let mut outcome = SeedOutcome::default();
        for draft in &seed.templates {
            let existing = self
                .templates
                .find_by_name(&draft.name)
                .await
                .map_err(|err| map_repository_error(TEMPLATE, err))?;
            if existing.is_none() {
                self.create_template(draft.clone()).await?;
                outcome.templates_created += 1;
            }
        }
        for draft in &seed.features {
            let existing = self
                .features
                .find_by_name(&draft.name)
                .await
                .map_err(|err| map_repository_error(FEATURE, err))?;
            if existing.is_none() {
                self.create_feature(draft.clone()).await?;
                outcome.features_created += 1;
            }
        }
        info!(
            templates_created = outcome.templates_created,
            features_created = outcome.features_created,
            "catalogue seeded"
        );
        Ok(outcome)
    }
}
