//! Websites owned by a user; the root of the page and navigation trees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::define_text_enum;
use super::validation::{self, ValidationError};
use super::{JsonObject, UserId, WebsiteId};

/// Maximum length of a website name.
pub const NAME_MAX: usize = 100;
/// Maximum length of a custom domain.
pub const DOMAIN_MAX: usize = 255;
/// Maximum length of a website description.
pub const DESCRIPTION_MAX: usize = 500;
/// Maximum length of a theme name.
pub const THEME_MAX: usize = 50;
/// Theme applied when none is requested.
pub const DEFAULT_THEME: &str = "modern";

define_text_enum! {
    /// Lifecycle state of a website.
    #[derive(Default)]
    pub enum WebsiteStatus {
        /// Publicly served.
        Active => "active",
        /// Taken offline by the owner.
        Inactive => "inactive",
        /// Still being assembled.
        #[default]
        Building => "building",
    }
}

fn default_theme() -> String {
    DEFAULT_THEME.to_owned()
}

pub(crate) fn validate_name(value: &str) -> Result<(), ValidationError> {
    validation::required_text("name", value, NAME_MAX)
}

pub(crate) fn validate_domain(value: &str) -> Result<(), ValidationError> {
    validation::token("domain", value, DOMAIN_MAX)
}

pub(crate) fn validate_description(value: Option<&str>) -> Result<(), ValidationError> {
    validation::optional_text("description", value, DESCRIPTION_MAX)
}

pub(crate) fn validate_theme(value: &str) -> Result<(), ValidationError> {
    validation::required_text("theme", value, THEME_MAX)
}

/// A site under construction or in service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Website {
    /// Storage-assigned identifier.
    pub id: WebsiteId,
    /// Owning user.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// Optional custom domain, unique across all websites.
    pub domain: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle state.
    pub status: WebsiteStatus,
    /// Theme name.
    pub theme: String,
    /// Optional stylesheet appended to the theme.
    pub custom_css: Option<String>,
    /// Opaque SEO configuration.
    pub seo_settings: JsonObject,
    /// Opaque analytics configuration.
    pub analytics_config: JsonObject,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// First time the site went active.
    pub published_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

/// Creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct WebsiteCreate {
    /// Display name.
    #[schema(example = "Bakery")]
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional custom domain.
    #[serde(default)]
    #[schema(example = "bakery.example.com")]
    pub domain: Option<String>,
    /// Theme name, `modern` when omitted.
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl WebsiteCreate {
    /// Payload with only a name; every other field takes its default.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            domain: None,
            theme: default_theme(),
        }
    }

    /// Check every field constraint without side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_description(self.description.as_deref())?;
        if let Some(domain) = &self.domain {
            validate_domain(domain)?;
        }
        validate_theme(&self.theme)
    }
}

/// A validated website awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWebsite {
    /// Owning user.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// Optional custom domain.
    pub domain: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle state.
    pub status: WebsiteStatus,
    /// Theme name.
    pub theme: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewWebsite {
    /// Validate `draft` and apply defaults.
    pub fn try_new(
        owner_id: UserId,
        draft: WebsiteCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            owner_id,
            name: draft.name,
            domain: draft.domain,
            description: draft.description,
            status: WebsiteStatus::default(),
            theme: draft.theme,
            created_at: now,
        })
    }

    /// Attach the storage-assigned identifier.
    pub fn into_website(self, id: WebsiteId) -> Website {
        Website {
            id,
            owner_id: self.owner_id,
            name: self.name,
            domain: self.domain,
            description: self.description,
            status: self.status,
            theme: self.theme,
            custom_css: None,
            seo_settings: JsonObject::new(),
            analytics_config: JsonObject::new(),
            created_at: self.created_at,
            updated_at: self.created_at,
            published_at: None,
            revision: 1,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct WebsiteUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New custom domain.
    #[serde(default)]
    pub domain: Option<String>,
    /// New lifecycle state.
    #[serde(default)]
    pub status: Option<WebsiteStatus>,
    /// New theme.
    #[serde(default)]
    pub theme: Option<String>,
    /// New stylesheet.
    #[serde(default)]
    pub custom_css: Option<String>,
    /// Replacement SEO configuration.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub seo_settings: Option<JsonObject>,
    /// Replacement analytics configuration.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub analytics_config: Option<JsonObject>,
}

impl WebsiteUpdate {
    /// Check the provided fields only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_description(self.description.as_deref())?;
        if let Some(domain) = &self.domain {
            validate_domain(domain)?;
        }
        if let Some(theme) = &self.theme {
            validate_theme(theme)?;
        }
        Ok(())
    }
}

impl Website {
    /// Build a website for `owner_id` from a creation payload.
    pub fn create(
        id: WebsiteId,
        owner_id: UserId,
        draft: WebsiteCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(NewWebsite::try_new(owner_id, draft, now)?.into_website(id))
    }

    /// Return a copy with the provided fields overwritten and the revision
    /// bumped.
    ///
    /// Moving to [`WebsiteStatus::Active`] stamps `published_at` the first
    /// time only.
    pub fn apply(
        &self,
        update: &WebsiteUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        update.validate()?;
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name.clone_from(name);
        }
        if let Some(description) = &update.description {
            next.description = Some(description.clone());
        }
        if let Some(domain) = &update.domain {
            next.domain = Some(domain.clone());
        }
        if let Some(status) = update.status {
            next.status = status;
            if status == WebsiteStatus::Active && next.published_at.is_none() {
                next.published_at = Some(now);
            }
        }
        if let Some(theme) = &update.theme {
            next.theme.clone_from(theme);
        }
        if let Some(custom_css) = &update.custom_css {
            next.custom_css = Some(custom_css.clone());
        }
        if let Some(seo_settings) = &update.seo_settings {
            next.seo_settings = seo_settings.clone();
        }
        if let Some(analytics_config) = &update.analytics_config {
            next.analytics_config = analytics_config.clone();
        }
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        Ok(next)
    }
}

/// Read-only projection of a [`Website`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WebsiteResponse {
    /// Identifier.
    pub id: WebsiteId,
    /// Owning user.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// Custom domain.
    pub domain: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Lifecycle state.
    pub status: WebsiteStatus,
    /// Theme name.
    pub theme: String,
    /// Stylesheet appended to the theme.
    pub custom_css: Option<String>,
    /// SEO configuration.
    #[schema(value_type = Object)]
    pub seo_settings: JsonObject,
    /// Analytics configuration.
    #[schema(value_type = Object)]
    pub analytics_config: JsonObject,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// First time the site went active.
    pub published_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl From<&Website> for WebsiteResponse {
    fn from(website: &Website) -> Self {
        Self {
            id: website.id,
            owner_id: website.owner_id,
            name: website.name.clone(),
            domain: website.domain.clone(),
            description: website.description.clone(),
            status: website.status,
            theme: website.theme.clone(),
            custom_css: website.custom_css.clone(),
            seo_settings: website.seo_settings.clone(),
            analytics_config: website.analytics_config.clone(),
            created_at: website.created_at,
            updated_at: website.updated_at,
            published_at: website.published_at,
            revision: website.revision,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Website schema coverage.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn website(now: DateTime<Utc>) -> Website {
        Website::create(
            WebsiteId::new(1),
            UserId::new(9),
            WebsiteCreate::named("Bakery"),
            now,
        )
        .expect("valid draft")
    }

    #[rstest]
    fn create_applies_defaults(website: Website, now: DateTime<Utc>) {
        assert_eq!(website.status, WebsiteStatus::Building);
        assert_eq!(website.theme, DEFAULT_THEME);
        assert!(website.seo_settings.is_empty());
        assert!(website.published_at.is_none());
        assert_eq!(website.updated_at, now);
    }

    #[rstest]
    fn status_defaults_to_building() {
        assert_eq!(WebsiteStatus::default(), WebsiteStatus::Building);
    }

    #[rstest]
    fn deserialising_create_defaults_theme() {
        let draft: WebsiteCreate =
            serde_json::from_value(json!({"name": "Bakery"})).expect("valid payload");
        assert_eq!(draft.theme, "modern");
        assert!(draft.domain.is_none());
    }

    #[rstest]
    #[case(json!({"name": " "}), "name")]
    #[case(json!({"name": "Bakery", "domain": "my site.com"}), "domain")]
    #[case(json!({"name": "Bakery", "theme": "t".repeat(THEME_MAX + 1)}), "theme")]
    fn create_rejects_invalid_fields(#[case] payload: serde_json::Value, #[case] field: &str) {
        let draft: WebsiteCreate = serde_json::from_value(payload).expect("payload parses");
        let error = draft.validate().expect_err("invalid");
        assert_eq!(error.field(), field);
    }

    #[rstest]
    fn activating_stamps_published_at_once(website: Website, now: DateTime<Utc>) {
        let activate = WebsiteUpdate {
            status: Some(WebsiteStatus::Active),
            ..WebsiteUpdate::default()
        };
        let first = website.apply(&activate, now).expect("valid");
        assert_eq!(first.published_at, Some(now));

        let later = now + chrono::Duration::days(1);
        let deactivated = first
            .apply(
                &WebsiteUpdate {
                    status: Some(WebsiteStatus::Inactive),
                    ..WebsiteUpdate::default()
                },
                later,
            )
            .expect("valid");
        let reactivated = deactivated.apply(&activate, later).expect("valid");
        assert_eq!(reactivated.published_at, Some(now));
        assert_eq!(reactivated.revision, 4);
    }

    #[rstest]
    fn analytics_config_is_replaced_verbatim(website: Website, now: DateTime<Utc>) {
        let config: JsonObject =
            serde_json::from_value(json!({"provider": "plausible", "nested": {"a": [1]}}))
                .expect("object");
        let updated = website
            .apply(
                &WebsiteUpdate {
                    analytics_config: Some(config.clone()),
                    ..WebsiteUpdate::default()
                },
                now,
            )
            .expect("valid");
        assert_eq!(updated.analytics_config, config);
        assert_eq!(updated.name, website.name);
    }

    #[rstest]
    fn status_parses_from_stored_text() {
        let parsed = "building".parse::<WebsiteStatus>();
        assert_eq!(parsed, Ok(WebsiteStatus::Building));
        assert!("live".parse::<WebsiteStatus>().is_err());
    }
}
