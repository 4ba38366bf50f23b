//! Reusable page templates offered in the catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{self, ValidationError};
use super::{JsonObject, TemplateId};

/// Maximum length of a template name.
pub const NAME_MAX: usize = 100;
/// Maximum length of a template title.
pub const TITLE_MAX: usize = 200;
/// Maximum length of a template description.
pub const DESCRIPTION_MAX: usize = 500;
/// Maximum length of a category label.
pub const CATEGORY_MAX: usize = 50;
/// Maximum length of a preview image reference.
pub const PREVIEW_IMAGE_MAX: usize = 500;

pub(crate) fn validate_name(value: &str) -> Result<(), ValidationError> {
    validation::token("name", value, NAME_MAX)
}

pub(crate) fn validate_title(value: &str) -> Result<(), ValidationError> {
    validation::required_text("title", value, TITLE_MAX)
}

pub(crate) fn validate_description(value: &str) -> Result<(), ValidationError> {
    validation::required_text("description", value, DESCRIPTION_MAX)
}

pub(crate) fn validate_category(value: &str) -> Result<(), ValidationError> {
    validation::required_text("category", value, CATEGORY_MAX)
}

pub(crate) fn validate_preview_image(value: Option<&str>) -> Result<(), ValidationError> {
    validation::optional_text("preview_image", value, PREVIEW_IMAGE_MAX)
}

/// A catalogue template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Storage-assigned identifier.
    pub id: TemplateId,
    /// Unique machine name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Grouping label.
    pub category: String,
    /// Optional preview image reference.
    pub preview_image: Option<String>,
    /// Opaque page structure.
    pub structure: JsonObject,
    /// Opaque default styling.
    pub default_styling: JsonObject,
    /// Whether the template needs a paid plan.
    pub is_premium: bool,
    /// Whether the template is offered.
    pub is_active: bool,
    /// How many times the template was used; never decreases.
    pub usage_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl Template {
    /// Build a template from a creation payload.
    pub fn create(
        id: TemplateId,
        draft: TemplateCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(NewTemplate::try_new(draft, now)?.into_template(id))
    }

    /// Return a copy with the provided fields overwritten and the revision
    /// bumped.
    pub fn apply(
        &self,
        update: &TemplateUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        update.validate()?;
        let mut next = self.clone();
        if let Some(title) = &update.title {
            next.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            next.description.clone_from(description);
        }
        if let Some(category) = &update.category {
            next.category.clone_from(category);
        }
        if let Some(preview_image) = &update.preview_image {
            next.preview_image = Some(preview_image.clone());
        }
        if let Some(structure) = &update.structure {
            next.structure = structure.clone();
        }
        if let Some(default_styling) = &update.default_styling {
            next.default_styling = default_styling.clone();
        }
        if let Some(is_premium) = update.is_premium {
            next.is_premium = is_premium;
        }
        if let Some(is_active) = update.is_active {
            next.is_active = is_active;
        }
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        Ok(next)
    }

    /// Return a copy with one more recorded use.
    ///
    /// The counter saturates instead of wrapping.
    pub fn used(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.usage_count = self.usage_count.saturating_add(1);
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        next
    }
}

/// Creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TemplateCreate {
    /// Unique machine name.
    #[schema(example = "bakery-classic")]
    pub name: String,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Grouping label.
    #[schema(example = "food")]
    pub category: String,
    /// Optional preview image reference.
    #[serde(default)]
    pub preview_image: Option<String>,
    /// Page structure.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub structure: JsonObject,
    /// Default styling.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub default_styling: JsonObject,
    /// Whether the template needs a paid plan.
    #[serde(default)]
    pub is_premium: bool,
}

impl TemplateCreate {
    /// Check every field constraint without side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_category(&self.category)?;
        validate_preview_image(self.preview_image.as_deref())
    }
}

/// A validated template awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplate {
    /// Unique machine name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Grouping label.
    pub category: String,
    /// Preview image reference.
    pub preview_image: Option<String>,
    /// Page structure.
    pub structure: JsonObject,
    /// Default styling.
    pub default_styling: JsonObject,
    /// Whether the template needs a paid plan.
    pub is_premium: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewTemplate {
    /// Validate `draft` and apply defaults.
    pub fn try_new(draft: TemplateCreate, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            name: draft.name,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            preview_image: draft.preview_image,
            structure: draft.structure,
            default_styling: draft.default_styling,
            is_premium: draft.is_premium,
            created_at: now,
        })
    }

    /// Attach the storage-assigned identifier.
    pub fn into_template(self, id: TemplateId) -> Template {
        Template {
            id,
            name: self.name,
            title: self.title,
            description: self.description,
            category: self.category,
            preview_image: self.preview_image,
            structure: self.structure,
            default_styling: self.default_styling,
            is_premium: self.is_premium,
            is_active: true,
            usage_count: 0,
            created_at: self.created_at,
            updated_at: self.created_at,
            revision: 1,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TemplateUpdate {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New preview image reference.
    #[serde(default)]
    pub preview_image: Option<String>,
    /// Replacement structure.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub structure: Option<JsonObject>,
    /// Replacement default styling.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub default_styling: Option<JsonObject>,
    /// New plan requirement.
    #[serde(default)]
    pub is_premium: Option<bool>,
    /// Offer or withdraw the template.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TemplateUpdate {
    /// Check the provided fields only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        validate_preview_image(self.preview_image.as_deref())
    }
}

/// Read-only projection of a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TemplateResponse {
    /// Identifier.
    pub id: TemplateId,
    /// Machine name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Grouping label.
    pub category: String,
    /// Preview image reference.
    pub preview_image: Option<String>,
    /// Page structure.
    #[schema(value_type = Object)]
    pub structure: JsonObject,
    /// Default styling.
    #[schema(value_type = Object)]
    pub default_styling: JsonObject,
    /// Whether the template needs a paid plan.
    pub is_premium: bool,
    /// Whether the template is offered.
    pub is_active: bool,
    /// Recorded uses.
    pub usage_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl From<&Template> for TemplateResponse {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            title: template.title.clone(),
            description: template.description.clone(),
            category: template.category.clone(),
            preview_image: template.preview_image.clone(),
            structure: template.structure.clone(),
            default_styling: template.default_styling.clone(),
            is_premium: template.is_premium,
            is_active: template.is_active,
            usage_count: template.usage_count,
            created_at: template.created_at,
            updated_at: template.updated_at,
            revision: template.revision,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Template schema and usage counter coverage.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn template() -> Template {
        let draft = TemplateCreate {
            name: "bakery-classic".to_owned(),
            title: "Classic bakery".to_owned(),
            description: "Warm colours and a menu section".to_owned(),
            category: "food".to_owned(),
            preview_image: None,
            structure: JsonObject::new(),
            default_styling: JsonObject::new(),
            is_premium: false,
        };
        Template::create(TemplateId::new(1), draft, DateTime::<Utc>::UNIX_EPOCH)
            .expect("valid draft")
    }

    #[rstest]
    fn starts_active_and_unused(template: Template) {
        assert!(template.is_active);
        assert_eq!(template.usage_count, 0);
    }

    #[rstest]
    fn usage_never_decreases(mut template: Template) {
        let now = DateTime::<Utc>::UNIX_EPOCH;
        let once = template.used(now);
        assert_eq!(once.usage_count, 1);

        template.usage_count = u32::MAX;
        assert_eq!(template.used(now).usage_count, u32::MAX);
    }

    #[rstest]
    fn update_validates_category(template: Template) {
        let update = TemplateUpdate {
            category: Some(String::new()),
            ..TemplateUpdate::default()
        };
        let error = template
            .apply(&update, DateTime::<Utc>::UNIX_EPOCH)
            .expect_err("blank category");
        assert_eq!(error.field(), "category");
    }
}
