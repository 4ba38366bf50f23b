//! Marketing feature entries shown on the landing page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::define_text_enum;
use super::validation::{self, ValidationError};
use super::{FeatureId, JsonObject};

/// Maximum length of a feature name.
pub const NAME_MAX: usize = 100;
/// Maximum length of a feature title.
pub const TITLE_MAX: usize = 200;
/// Maximum length of a feature description.
pub const DESCRIPTION_MAX: usize = 500;
/// Maximum length of an icon reference.
pub const ICON_MAX: usize = 100;

define_text_enum! {
    /// Product area a feature belongs to.
    pub enum FeatureType {
        /// Core site building.
        Core => "core",
        /// AI-assisted generation.
        AiBuilder => "ai_builder",
        /// Content management.
        Cms => "cms",
        /// Power-user tooling.
        Advanced => "advanced",
    }
}

pub(crate) fn validate_name(value: &str) -> Result<(), ValidationError> {
    validation::token("name", value, NAME_MAX)
}

pub(crate) fn validate_title(value: &str) -> Result<(), ValidationError> {
    validation::required_text("title", value, TITLE_MAX)
}

pub(crate) fn validate_description(value: &str) -> Result<(), ValidationError> {
    validation::required_text("description", value, DESCRIPTION_MAX)
}

pub(crate) fn validate_icon(value: Option<&str>) -> Result<(), ValidationError> {
    validation::optional_text("icon", value, ICON_MAX)
}

/// A catalogue feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Storage-assigned identifier.
    pub id: FeatureId,
    /// Unique machine name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Product area.
    pub feature_type: FeatureType,
    /// Optional icon reference.
    pub icon: Option<String>,
    /// Whether the feature is listed.
    pub is_active: bool,
    /// Display order key.
    pub sort_order: i32,
    /// Opaque presentation metadata.
    pub feature_metadata: JsonObject,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl Feature {
    /// Display order: `(sort_order, id)` ascending.
    pub const fn order_key(&self) -> (i32, FeatureId) {
        (self.sort_order, self.id)
    }

    /// Build a feature from a creation payload.
    pub fn create(
        id: FeatureId,
        draft: FeatureCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(NewFeature::try_new(draft, now)?.into_feature(id))
    }

    /// Return a copy with the provided fields overwritten and the revision
    /// bumped.
    pub fn apply(
        &self,
        update: &FeatureUpdate,
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
        if let Some(feature_type) = update.feature_type {
            next.feature_type = feature_type;
        }
        if let Some(icon) = &update.icon {
            next.icon = Some(icon.clone());
        }
        if let Some(is_active) = update.is_active {
            next.is_active = is_active;
        }
        if let Some(sort_order) = update.sort_order {
            next.sort_order = sort_order;
        }
        if let Some(feature_metadata) = &update.feature_metadata {
            next.feature_metadata = feature_metadata.clone();
        }
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        Ok(next)
    }
}

/// Creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct FeatureCreate {
    /// Unique machine name.
    #[schema(example = "drag-and-drop")]
    pub name: String,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Product area.
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    /// Optional icon reference.
    #[serde(default)]
    pub icon: Option<String>,
    /// Display order key, `0` when omitted.
    #[serde(default)]
    pub sort_order: i32,
    /// Presentation metadata.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub feature_metadata: JsonObject,
}

impl FeatureCreate {
    /// Check every field constraint without side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_icon(self.icon.as_deref())
    }
}

/// A validated feature awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeature {
    /// Unique machine name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Product area.
    pub feature_type: FeatureType,
    /// Icon reference.
    pub icon: Option<String>,
    /// Display order key.
    pub sort_order: i32,
    /// Presentation metadata.
    pub feature_metadata: JsonObject,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewFeature {
    /// Validate `draft` and apply defaults.
    pub fn try_new(draft: FeatureCreate, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            name: draft.name,
            title: draft.title,
            description: draft.description,
            feature_type: draft.feature_type,
            icon: draft.icon,
            sort_order: draft.sort_order,
            feature_metadata: draft.feature_metadata,
            created_at: now,
        })
    }

    /// Attach the storage-assigned identifier.
    pub fn into_feature(self, id: FeatureId) -> Feature {
        Feature {
            id,
            name: self.name,
            title: self.title,
            description: self.description,
            feature_type: self.feature_type,
            icon: self.icon,
            is_active: true,
            sort_order: self.sort_order,
            feature_metadata: self.feature_metadata,
            created_at: self.created_at,
            updated_at: self.created_at,
            revision: 1,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct FeatureUpdate {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New product area.
    #[serde(default, rename = "type")]
    pub feature_type: Option<FeatureType>,
    /// New icon reference.
    #[serde(default)]
    pub icon: Option<String>,
    /// List or hide the feature.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// New display order key.
    #[serde(default)]
    pub sort_order: Option<i32>,
    /// Replacement metadata.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub feature_metadata: Option<JsonObject>,
}

impl FeatureUpdate {
    /// Check the provided fields only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        validate_icon(self.icon.as_deref())
    }
}

/// Public projection of a [`Feature`]; listing controls stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeatureResponse {
    /// Identifier.
    pub id: FeatureId,
    /// Machine name.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Marketing description.
    pub description: String,
    /// Product area.
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    /// Icon reference.
    pub icon: Option<String>,
    /// Presentation metadata.
    #[schema(value_type = Object)]
    pub feature_metadata: JsonObject,
}

impl From<&Feature> for FeatureResponse {
    fn from(feature: &Feature) -> Self {
        Self {
            id: feature.id,
            name: feature.name.clone(),
            title: feature.title.clone(),
            description: feature.description.clone(),
            feature_type: feature.feature_type,
            icon: feature.icon.clone(),
            feature_metadata: feature.feature_metadata.clone(),
        }
    }
}
