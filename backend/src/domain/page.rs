//! Pages of a website, addressed by a slug unique within the site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::define_text_enum;
use super::validation::{self, ValidationError};
use super::{JsonObject, PageId, WebsiteId};

/// Maximum length of a page title.
pub const TITLE_MAX: usize = 200;
/// Maximum length of a page slug.
pub const SLUG_MAX: usize = 100;
/// Maximum length of the meta description.
pub const META_DESCRIPTION_MAX: usize = 300;
/// Maximum length of a template name.
pub const TEMPLATE_MAX: usize = 50;
/// Template applied when none is requested.
pub const DEFAULT_TEMPLATE: &str = "landing";

define_text_enum! {
    /// Publication state of a page.
    #[derive(Default)]
    pub enum PageStatus {
        /// Work in progress.
        #[default]
        Draft => "draft",
        /// Publicly visible.
        Published => "published",
        /// Retired but retained.
        Archived => "archived",
    }
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_owned()
}

pub(crate) fn validate_title(value: &str) -> Result<(), ValidationError> {
    validation::required_text("title", value, TITLE_MAX)
}

pub(crate) fn validate_slug(value: &str) -> Result<(), ValidationError> {
    validation::slug("slug", value, SLUG_MAX)
}

pub(crate) fn validate_meta_description(value: Option<&str>) -> Result<(), ValidationError> {
    validation::optional_text("meta_description", value, META_DESCRIPTION_MAX)
}

pub(crate) fn validate_template(value: &str) -> Result<(), ValidationError> {
    validation::required_text("template", value, TEMPLATE_MAX)
}

/// A page within a website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Storage-assigned identifier.
    pub id: PageId,
    /// Owning website.
    pub website_id: WebsiteId,
    /// Display title.
    pub title: String,
    /// URL segment, unique within the website.
    pub slug: String,
    /// Optional meta description.
    pub meta_description: Option<String>,
    /// Opaque page content.
    pub content: JsonObject,
    /// Publication state.
    pub status: PageStatus,
    /// Whether this is the website's landing page.
    pub is_homepage: bool,
    /// Template name.
    pub template: String,
    /// Optional stylesheet.
    pub custom_css: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// First time the page was published.
    pub published_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

/// Creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PageCreate {
    /// Display title.
    #[schema(example = "About us")]
    pub title: String,
    /// URL segment.
    #[schema(example = "about-us")]
    pub slug: String,
    /// Optional meta description.
    #[serde(default)]
    pub meta_description: Option<String>,
    /// Template name, `landing` when omitted.
    #[serde(default = "default_template")]
    pub template: String,
    /// Whether the page becomes the website's homepage.
    #[serde(default)]
    pub is_homepage: bool,
}

impl PageCreate {
    /// Payload with a title and slug; every other field takes its default.
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            meta_description: None,
            template: default_template(),
            is_homepage: false,
        }
    }

    /// Check every field constraint without side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_slug(&self.slug)?;
        validate_meta_description(self.meta_description.as_deref())?;
        validate_template(&self.template)
    }
}

/// A validated page awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    /// Owning website.
    pub website_id: WebsiteId,
    /// Display title.
    pub title: String,
    /// URL segment.
    pub slug: String,
    /// Optional meta description.
    pub meta_description: Option<String>,
    /// Template name.
    pub template: String,
    /// Whether this is the website's landing page.
    pub is_homepage: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewPage {
    /// Validate `draft` and apply defaults.
    pub fn try_new(
        website_id: WebsiteId,
        draft: PageCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            website_id,
            title: draft.title,
            slug: draft.slug,
            meta_description: draft.meta_description,
            template: draft.template,
            is_homepage: draft.is_homepage,
            created_at: now,
        })
    }

    /// Attach the storage-assigned identifier.
    pub fn into_page(self, id: PageId) -> Page {
        Page {
            id,
            website_id: self.website_id,
            title: self.title,
            slug: self.slug,
            meta_description: self.meta_description,
            content: JsonObject::new(),
            status: PageStatus::default(),
            is_homepage: self.is_homepage,
            template: self.template,
            custom_css: None,
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
pub struct PageUpdate {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// New meta description.
    #[serde(default)]
    pub meta_description: Option<String>,
    /// Replacement content.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub content: Option<JsonObject>,
    /// New publication state.
    #[serde(default)]
    pub status: Option<PageStatus>,
    /// New template.
    #[serde(default)]
    pub template: Option<String>,
    /// New stylesheet.
    #[serde(default)]
    pub custom_css: Option<String>,
}

impl PageUpdate {
    /// Check the provided fields only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        validate_meta_description(self.meta_description.as_deref())?;
        if let Some(template) = &self.template {
            validate_template(template)?;
        }
        Ok(())
    }
}

impl Page {
    /// Build a page in `website_id` from a creation payload.
    pub fn create(
        id: PageId,
        website_id: WebsiteId,
        draft: PageCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(NewPage::try_new(website_id, draft, now)?.into_page(id))
    }

    /// Return a copy with the provided fields overwritten and the revision
    /// bumped.
    ///
    /// Moving to [`PageStatus::Published`] stamps `published_at` the first
    /// time only.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use sitecraft::domain::{Page, PageCreate, PageId, PageUpdate, WebsiteId};
    ///
    /// let draft = PageCreate::new("Home", "home");
    /// let page = Page::create(PageId::new(1), WebsiteId::new(1), draft, Utc::now()).unwrap();
    /// let update = PageUpdate { title: Some("New".into()), ..PageUpdate::default() };
    /// let renamed = page.apply(&update, Utc::now()).unwrap();
    /// assert_eq!(renamed.title, "New");
    /// assert_eq!(renamed.slug, "home");
    /// ```
    pub fn apply(&self, update: &PageUpdate, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        update.validate()?;
        let mut next = self.clone();
        if let Some(title) = &update.title {
            next.title.clone_from(title);
        }
        if let Some(slug) = &update.slug {
            next.slug.clone_from(slug);
        }
        if let Some(meta_description) = &update.meta_description {
            next.meta_description = Some(meta_description.clone());
        }
        if let Some(content) = &update.content {
            next.content = content.clone();
        }
        if let Some(status) = update.status {
            next.status = status;
            if status == PageStatus::Published && next.published_at.is_none() {
                next.published_at = Some(now);
            }
        }
        if let Some(template) = &update.template {
            next.template.clone_from(template);
        }
        if let Some(custom_css) = &update.custom_css {
            next.custom_css = Some(custom_css.clone());
        }
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        Ok(next)
    }

    /// Return a copy with the homepage flag changed and the revision bumped.
    pub(crate) fn with_homepage(&self, is_homepage: bool, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.is_homepage = is_homepage;
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        next
    }
}

/// Read-only projection of a [`Page`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageResponse {
    /// Identifier.
    pub id: PageId,
    /// Owning website.
    pub website_id: WebsiteId,
    /// Display title.
    pub title: String,
    /// URL segment.
    pub slug: String,
    /// Meta description.
    pub meta_description: Option<String>,
    /// Page content.
    #[schema(value_type = Object)]
    pub content: JsonObject,
    /// Publication state.
    pub status: PageStatus,
    /// Whether this is the website's landing page.
    pub is_homepage: bool,
    /// Template name.
    pub template: String,
    /// Stylesheet.
    pub custom_css: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// First time the page was published.
    pub published_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl From<&Page> for PageResponse {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id,
            website_id: page.website_id,
            title: page.title.clone(),
            slug: page.slug.clone(),
            meta_description: page.meta_description.clone(),
            content: page.content.clone(),
            status: page.status,
            is_homepage: page.is_homepage,
            template: page.template.clone(),
            custom_css: page.custom_css.clone(),
            created_at: page.created_at,
            updated_at: page.updated_at,
            published_at: page.published_at,
            revision: page.revision,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Page schema coverage.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 8, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn page(now: DateTime<Utc>) -> Page {
        let mut page = Page::create(
            PageId::new(4),
            WebsiteId::new(2),
            PageCreate::new("Home", "home"),
            now,
        )
        .expect("valid draft");
        page.content = serde_json::from_value(json!({"hero": {"title": "Hi"}})).expect("object");
        page
    }

    #[rstest]
    fn title_update_leaves_other_fields_unchanged(page: Page, now: DateTime<Utc>) {
        let later = now + chrono::Duration::seconds(30);
        let update = PageUpdate {
            title: Some("New".to_owned()),
            ..PageUpdate::default()
        };

        let updated = page.apply(&update, later).expect("valid update");

        assert_eq!(updated.title, "New");
        assert_eq!(updated.slug, page.slug);
        assert_eq!(updated.content, page.content);
        assert_eq!(updated.status, page.status);
        assert_eq!(updated.updated_at, later);
        assert_ne!(updated.updated_at, page.updated_at);
    }

    #[rstest]
    #[case("About Us")]
    #[case("about_us")]
    #[case("")]
    fn rejects_invalid_slugs(#[case] slug: &str) {
        let draft = PageCreate::new("About", slug);
        assert_eq!(draft.validate().expect_err("invalid slug").field(), "slug");
    }

    #[rstest]
    fn publishing_stamps_published_at_once(page: Page, now: DateTime<Utc>) {
        let publish = PageUpdate {
            status: Some(PageStatus::Published),
            ..PageUpdate::default()
        };
        let published = page.apply(&publish, now).expect("valid");
        assert_eq!(published.published_at, Some(now));

        let later = now + chrono::Duration::hours(1);
        let again = published.apply(&publish, later).expect("valid");
        assert_eq!(again.published_at, Some(now));
    }

    #[rstest]
    fn update_schema_rejects_unknown_fields() {
        let result: Result<PageUpdate, _> =
            serde_json::from_value(json!({"title": "x", "website_id": 3}));
        assert!(result.is_err());
    }

    #[rstest]
    fn create_schema_applies_defaults() {
        let draft: PageCreate =
            serde_json::from_value(json!({"title": "Home", "slug": "home"})).expect("parses");
        assert_eq!(draft.template, DEFAULT_TEMPLATE);
        assert!(!draft.is_homepage);
    }

    #[rstest]
    fn new_pages_start_as_drafts() {
        assert_eq!(PageStatus::default(), PageStatus::Draft);
        assert_eq!(PageStatus::default().as_str(), "draft");
    }
}
