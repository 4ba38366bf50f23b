//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Read rows convert into domain entities
//! through `TryFrom`, since stored enums and JSON columns may fail to parse;
//! write rows are built from domain values with `From`.
//!
//! Write rows use `treat_none_as_null` so clearing an optional column is
//! persisted rather than skipped.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    AiBuilderSession, AiSessionId, ContentBlock, ContentBlockId, Feature, FeatureId, JsonObject,
    NavigationItem, NavigationItemId, NewAiSession, NewContentBlock, NewFeature, NewNavigationItem,
    NewPage, NewTemplate, NewUser, NewWebsite, Page, PageId, Template, TemplateId, User, UserId,
    Website, WebsiteId,
};

use super::diesel_helpers::{cast_count, cast_count_for_db, cast_revision, cast_revision_for_db};
use super::schema::{
    ai_builder_sessions, content_blocks, features, navigation_items, pages, templates, users,
    websites,
};

fn decode_object(column: &str, value: Value) -> Result<JsonObject, RepositoryError> {
    JsonObject::try_from(value)
        .map_err(|err| RepositoryError::query(format!("decode {column}: {err}")))
}

fn decode_enum<T>(column: &str, value: &str) -> Result<T, RepositoryError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|err: T::Err| RepositoryError::query(format!("decode {column}: {err}")))
}

fn encode_object(value: &JsonObject) -> Value {
    value.clone().into_value()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            email: row.email,
            username: row.username,
            full_name: row.full_name,
            is_active: row.is_active,
            is_premium: row.is_premium,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: cast_revision(row.revision),
        }
    }
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&NewUser> for NewUserRow {
    fn from(user: &NewUser) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            is_premium: user.is_premium,
            created_at: user.created_at,
            updated_at: user.created_at,
            revision: 1,
        }
    }
}

/// Changeset struct for updating user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_premium: bool,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&User> for UserChangeset {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            is_premium: user.is_premium,
            updated_at: user.updated_at,
            revision: cast_revision_for_db(user.revision),
        }
    }
}

// ---------------------------------------------------------------------------
// Websites
// ---------------------------------------------------------------------------

/// Row struct for reading from the websites table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = websites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WebsiteRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub theme: String,
    pub custom_css: Option<String>,
    pub seo_settings: Value,
    pub analytics_config: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub revision: i32,
}

impl TryFrom<WebsiteRow> for Website {
    type Error = RepositoryError;

    fn try_from(row: WebsiteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: WebsiteId::new(row.id),
            owner_id: UserId::new(row.owner_id),
            name: row.name,
            domain: row.domain,
            description: row.description,
            status: decode_enum("websites.status", &row.status)?,
            theme: row.theme,
            custom_css: row.custom_css,
            seo_settings: decode_object("websites.seo_settings", row.seo_settings)?,
            analytics_config: decode_object("websites.analytics_config", row.analytics_config)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            published_at: row.published_at,
            revision: cast_revision(row.revision),
        })
    }
}

/// Insertable struct for creating website records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = websites)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewWebsiteRow {
    pub owner_id: i64,
    pub name: String,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub theme: String,
    pub custom_css: Option<String>,
    pub seo_settings: Value,
    pub analytics_config: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub revision: i32,
}

impl From<&NewWebsite> for NewWebsiteRow {
    fn from(website: &NewWebsite) -> Self {
        let draft = website.clone().into_website(WebsiteId::new(0));
        Self {
            owner_id: draft.owner_id.get(),
            name: draft.name,
            domain: draft.domain,
            description: draft.description,
            status: draft.status.as_str().to_owned(),
            theme: draft.theme,
            custom_css: draft.custom_css,
            seo_settings: encode_object(&draft.seo_settings),
            analytics_config: encode_object(&draft.analytics_config),
            created_at: draft.created_at,
            updated_at: draft.updated_at,
            published_at: draft.published_at,
            revision: cast_revision_for_db(draft.revision),
        }
    }
}

/// Changeset struct for updating website records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = websites)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct WebsiteChangeset {
    pub name: String,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub status: String,
    pub theme: String,
    pub custom_css: Option<String>,
    pub seo_settings: Value,
    pub analytics_config: Value,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub revision: i32,
}

impl From<&Website> for WebsiteChangeset {
    fn from(website: &Website) -> Self {
        Self {
            name: website.name.clone(),
            domain: website.domain.clone(),
            description: website.description.clone(),
            status: website.status.as_str().to_owned(),
            theme: website.theme.clone(),
            custom_css: website.custom_css.clone(),
            seo_settings: encode_object(&website.seo_settings),
            analytics_config: encode_object(&website.analytics_config),
            updated_at: website.updated_at,
            published_at: website.published_at,
            revision: cast_revision_for_db(website.revision),
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Row struct for reading from the pages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PageRow {
    pub id: i64,
    pub website_id: i64,
    pub title: String,
    pub slug: String,
    pub meta_description: Option<String>,
    pub content: Value,
    pub status: String,
    pub is_homepage: bool,
    pub template: String,
    pub custom_css: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub revision: i32,
}

impl TryFrom<PageRow> for Page {
    type Error = RepositoryError;

    fn try_from(row: PageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PageId::new(row.id),
            website_id: WebsiteId::new(row.website_id),
            title: row.title,
            slug: row.slug,
            meta_description: row.meta_description,
            content: decode_object("pages.content", row.content)?,
            status: decode_enum("pages.status", &row.status)?,
            is_homepage: row.is_homepage,
            template: row.template,
            custom_css: row.custom_css,
            created_at: row.created_at,
            updated_at: row.updated_at,
            published_at: row.published_at,
            revision: cast_revision(row.revision),
        })
    }
}

/// Insertable struct for creating page records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pages)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewPageRow {
    pub website_id: i64,
    pub title: String,
    pub slug: String,
    pub meta_description: Option<String>,
    pub content: Value,
    pub status: String,
    pub is_homepage: bool,
    pub template: String,
    pub custom_css: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub revision: i32,
}

impl From<&NewPage> for NewPageRow {
    fn from(page: &NewPage) -> Self {
        let draft = page.clone().into_page(PageId::new(0));
        Self {
            website_id: draft.website_id.get(),
            title: draft.title,
            slug: draft.slug,
            meta_description: draft.meta_description,
            content: encode_object(&draft.content),
            status: draft.status.as_str().to_owned(),
            is_homepage: draft.is_homepage,
            template: draft.template,
            custom_css: draft.custom_css,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
            published_at: draft.published_at,
            revision: cast_revision_for_db(draft.revision),
        }
    }
}

/// Changeset struct for updating page records.
///
/// `is_homepage` is absent: only `set_homepage` moves the flag.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = pages)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PageChangeset {
    pub title: String,
    pub slug: String,
    pub meta_description: Option<String>,
    pub content: Value,
    pub status: String,
    pub template: String,
    pub custom_css: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub revision: i32,
}

impl From<&Page> for PageChangeset {
    fn from(page: &Page) -> Self {
        Self {
            title: page.title.clone(),
            slug: page.slug.clone(),
            meta_description: page.meta_description.clone(),
            content: encode_object(&page.content),
            status: page.status.as_str().to_owned(),
            template: page.template.clone(),
            custom_css: page.custom_css.clone(),
            updated_at: page.updated_at,
            published_at: page.published_at,
            revision: cast_revision_for_db(page.revision),
        }
    }
}

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

/// Row struct for reading from the content_blocks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content_blocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentBlockRow {
    pub id: i64,
    pub page_id: i64,
    pub block_type: String,
    pub title: Option<String>,
    pub content: Value,
    pub position: i32,
    pub is_visible: bool,
    pub styling: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl TryFrom<ContentBlockRow> for ContentBlock {
    type Error = RepositoryError;

    fn try_from(row: ContentBlockRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContentBlockId::new(row.id),
            page_id: PageId::new(row.page_id),
            block_type: decode_enum("content_blocks.block_type", &row.block_type)?,
            title: row.title,
            content: decode_object("content_blocks.content", row.content)?,
            position: row.position,
            is_visible: row.is_visible,
            styling: decode_object("content_blocks.styling", row.styling)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: cast_revision(row.revision),
        })
    }
}

/// Insertable struct for creating content block records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = content_blocks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewContentBlockRow {
    pub page_id: i64,
    pub block_type: String,
    pub title: Option<String>,
    pub content: Value,
    pub position: i32,
    pub is_visible: bool,
    pub styling: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&NewContentBlock> for NewContentBlockRow {
    fn from(block: &NewContentBlock) -> Self {
        Self {
            page_id: block.page_id.get(),
            block_type: block.block_type.as_str().to_owned(),
            title: block.title.clone(),
            content: encode_object(&block.content),
            position: block.position,
            is_visible: block.is_visible,
            styling: encode_object(&block.styling),
            created_at: block.created_at,
            updated_at: block.created_at,
            revision: 1,
        }
    }
}

/// Changeset struct for updating content block records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = content_blocks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContentBlockChangeset {
    pub title: Option<String>,
    pub content: Value,
    pub position: i32,
    pub is_visible: bool,
    pub styling: Value,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&ContentBlock> for ContentBlockChangeset {
    fn from(block: &ContentBlock) -> Self {
        Self {
            title: block.title.clone(),
            content: encode_object(&block.content),
            position: block.position,
            is_visible: block.is_visible,
            styling: encode_object(&block.styling),
            updated_at: block.updated_at,
            revision: cast_revision_for_db(block.revision),
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation items
// ---------------------------------------------------------------------------

/// Row struct for reading from the navigation_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = navigation_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NavigationItemRow {
    pub id: i64,
    pub website_id: i64,
    pub parent_id: Option<i64>,
    pub label: String,
    pub url: String,
    pub position: i32,
    pub is_external: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<NavigationItemRow> for NavigationItem {
    fn from(row: NavigationItemRow) -> Self {
        Self {
            id: NavigationItemId::new(row.id),
            website_id: WebsiteId::new(row.website_id),
            parent_id: row.parent_id.map(NavigationItemId::new),
            label: row.label,
            url: row.url,
            position: row.position,
            is_external: row.is_external,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: cast_revision(row.revision),
        }
    }
}

/// Insertable struct for creating navigation item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = navigation_items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewNavigationItemRow {
    pub website_id: i64,
    pub parent_id: Option<i64>,
    pub label: String,
    pub url: String,
    pub position: i32,
    pub is_external: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&NewNavigationItem> for NewNavigationItemRow {
    fn from(item: &NewNavigationItem) -> Self {
        Self {
            website_id: item.website_id.get(),
            parent_id: item.parent_id.map(NavigationItemId::get),
            label: item.label.clone(),
            url: item.url.clone(),
            position: item.position,
            is_external: item.is_external,
            is_active: item.is_active,
            created_at: item.created_at,
            updated_at: item.created_at,
            revision: 1,
        }
    }
}

/// Changeset struct for updating navigation item records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = navigation_items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NavigationItemChangeset {
    pub parent_id: Option<i64>,
    pub label: String,
    pub url: String,
    pub position: i32,
    pub is_external: bool,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&NavigationItem> for NavigationItemChangeset {
    fn from(item: &NavigationItem) -> Self {
        Self {
            parent_id: item.parent_id.map(NavigationItemId::get),
            label: item.label.clone(),
            url: item.url.clone(),
            position: item.position,
            is_external: item.is_external,
            is_active: item.is_active,
            updated_at: item.updated_at,
            revision: cast_revision_for_db(item.revision),
        }
    }
}

// ---------------------------------------------------------------------------
// AI builder sessions
// ---------------------------------------------------------------------------

/// Row struct for reading from the ai_builder_sessions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ai_builder_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AiSessionRow {
    pub id: i64,
    pub session_id: String,
    pub user_id: i64,
    pub website_id: Option<i64>,
    pub prompt: String,
    pub generated_content: Value,
    pub user_feedback: Option<String>,
    pub is_applied: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl TryFrom<AiSessionRow> for AiBuilderSession {
    type Error = RepositoryError;

    fn try_from(row: AiSessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AiSessionId::new(row.id),
            session_id: row.session_id,
            user_id: UserId::new(row.user_id),
            website_id: row.website_id.map(WebsiteId::new),
            prompt: row.prompt,
            generated_content: decode_object(
                "ai_builder_sessions.generated_content",
                row.generated_content,
            )?,
            user_feedback: row.user_feedback,
            is_applied: row.is_applied,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: cast_revision(row.revision),
        })
    }
}

/// Insertable struct for creating AI session records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ai_builder_sessions)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewAiSessionRow {
    pub session_id: String,
    pub user_id: i64,
    pub website_id: Option<i64>,
    pub prompt: String,
    pub generated_content: Value,
    pub is_applied: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&NewAiSession> for NewAiSessionRow {
    fn from(session: &NewAiSession) -> Self {
        Self {
            session_id: session.session_id.clone(),
            user_id: session.user_id.get(),
            website_id: session.website_id.map(WebsiteId::get),
            prompt: session.prompt.clone(),
            generated_content: encode_object(&session.generated_content),
            is_applied: false,
            created_at: session.created_at,
            updated_at: session.created_at,
            revision: 1,
        }
    }
}

/// Changeset struct for updating AI session records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = ai_builder_sessions)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AiSessionChangeset {
    pub website_id: Option<i64>,
    pub generated_content: Value,
    pub user_feedback: Option<String>,
    pub is_applied: bool,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&AiBuilderSession> for AiSessionChangeset {
    fn from(session: &AiBuilderSession) -> Self {
        Self {
            website_id: session.website_id.map(WebsiteId::get),
            generated_content: encode_object(&session.generated_content),
            user_feedback: session.user_feedback.clone(),
            is_applied: session.is_applied,
            updated_at: session.updated_at,
            revision: cast_revision_for_db(session.revision),
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Row struct for reading from the templates table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TemplateRow {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub preview_image: Option<String>,
    pub structure: Value,
    pub default_styling: Value,
    pub is_premium: bool,
    pub is_active: bool,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl TryFrom<TemplateRow> for Template {
    type Error = RepositoryError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TemplateId::new(row.id),
            name: row.name,
            title: row.title,
            description: row.description,
            category: row.category,
            preview_image: row.preview_image,
            structure: decode_object("templates.structure", row.structure)?,
            default_styling: decode_object("templates.default_styling", row.default_styling)?,
            is_premium: row.is_premium,
            is_active: row.is_active,
            usage_count: cast_count(row.usage_count),
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: cast_revision(row.revision),
        })
    }
}

/// Insertable struct for creating template records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = templates)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewTemplateRow {
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub preview_image: Option<String>,
    pub structure: Value,
    pub default_styling: Value,
    pub is_premium: bool,
    pub is_active: bool,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&NewTemplate> for NewTemplateRow {
    fn from(template: &NewTemplate) -> Self {
        Self {
            name: template.name.clone(),
            title: template.title.clone(),
            description: template.description.clone(),
            category: template.category.clone(),
            preview_image: template.preview_image.clone(),
            structure: encode_object(&template.structure),
            default_styling: encode_object(&template.default_styling),
            is_premium: template.is_premium,
            is_active: true,
            usage_count: 0,
            created_at: template.created_at,
            updated_at: template.created_at,
            revision: 1,
        }
    }
}

/// Changeset struct for updating template records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = templates)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TemplateChangeset {
    pub title: String,
    pub description: String,
    pub category: String,
    pub preview_image: Option<String>,
    pub structure: Value,
    pub default_styling: Value,
    pub is_premium: bool,
    pub is_active: bool,
    pub usage_count: i32,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&Template> for TemplateChangeset {
    fn from(template: &Template) -> Self {
        Self {
            title: template.title.clone(),
            description: template.description.clone(),
            category: template.category.clone(),
            preview_image: template.preview_image.clone(),
            structure: encode_object(&template.structure),
            default_styling: encode_object(&template.default_styling),
            is_premium: template.is_premium,
            is_active: template.is_active,
            usage_count: cast_count_for_db(template.usage_count),
            updated_at: template.updated_at,
            revision: cast_revision_for_db(template.revision),
        }
    }
}

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

/// Row struct for reading from the features table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = features)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeatureRow {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub description: String,
    pub feature_type: String,
    pub icon: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub feature_metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl TryFrom<FeatureRow> for Feature {
    type Error = RepositoryError;

    fn try_from(row: FeatureRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: FeatureId::new(row.id),
            name: row.name,
            title: row.title,
            description: row.description,
            feature_type: decode_enum("features.feature_type", &row.feature_type)?,
            icon: row.icon,
            is_active: row.is_active,
            sort_order: row.sort_order,
            feature_metadata: decode_object("features.feature_metadata", row.feature_metadata)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            revision: cast_revision(row.revision),
        })
    }
}

/// Insertable struct for creating feature records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = features)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct NewFeatureRow {
    pub name: String,
    pub title: String,
    pub description: String,
    pub feature_type: String,
    pub icon: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub feature_metadata: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&NewFeature> for NewFeatureRow {
    fn from(feature: &NewFeature) -> Self {
        Self {
            name: feature.name.clone(),
            title: feature.title.clone(),
            description: feature.description.clone(),
            feature_type: feature.feature_type.as_str().to_owned(),
            icon: feature.icon.clone(),
            is_active: true,
            sort_order: feature.sort_order,
            feature_metadata: encode_object(&feature.feature_metadata),
            created_at: feature.created_at,
            updated_at: feature.created_at,
            revision: 1,
        }
    }
}

/// Changeset struct for updating feature records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = features)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FeatureChangeset {
    pub title: String,
    pub description: String,
    pub feature_type: String,
    pub icon: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub feature_metadata: Value,
    pub updated_at: DateTime<Utc>,
    pub revision: i32,
}

impl From<&Feature> for FeatureChangeset {
    fn from(feature: &Feature) -> Self {
        Self {
            title: feature.title.clone(),
            description: feature.description.clone(),
            feature_type: feature.feature_type.as_str().to_owned(),
            icon: feature.icon.clone(),
            is_active: feature.is_active,
            sort_order: feature.sort_order,
            feature_metadata: encode_object(&feature.feature_metadata),
            updated_at: feature.updated_at,
            revision: cast_revision_for_db(feature.revision),
        }
    }
}
