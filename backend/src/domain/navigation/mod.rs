//! Website navigation menus.
//!
//! Items reference an optional parent within the same website, forming a
//! forest. [`NavigationForest`] assembles the flat rows into trees and
//! [`ensure_acyclic`] guards every reparenting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{self, ValidationError, double_option};
use super::{NavigationItemId, WebsiteId};

mod forest;

pub use forest::{NavigationError, NavigationForest, NavigationNode, ensure_acyclic};

/// Maximum length of a menu label.
pub const LABEL_MAX: usize = 100;
/// Maximum length of a link target.
pub const URL_MAX: usize = 500;

pub(crate) fn validate_label(value: &str) -> Result<(), ValidationError> {
    validation::required_text("label", value, LABEL_MAX)
}

pub(crate) fn validate_url(value: &str) -> Result<(), ValidationError> {
    validation::required_text("url", value, URL_MAX)
}

/// A link in a website's navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    /// Storage-assigned identifier.
    pub id: NavigationItemId,
    /// Owning website.
    pub website_id: WebsiteId,
    /// Parent item; `None` for top-level entries.
    pub parent_id: Option<NavigationItemId>,
    /// Visible text.
    pub label: String,
    /// Link target.
    pub url: String,
    /// Ordering key among siblings.
    pub position: i32,
    /// Whether the link leaves the site.
    pub is_external: bool,
    /// Whether the item is rendered.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl NavigationItem {
    /// Sort key among siblings.
    pub const fn order_key(&self) -> (i32, NavigationItemId) {
        (self.position, self.id)
    }

    /// Build an item in `website_id` from a creation payload.
    pub fn create(
        id: NavigationItemId,
        website_id: WebsiteId,
        draft: NavigationItemCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(NewNavigationItem::try_new(website_id, draft, now)?.into_item(id))
    }

    /// Return a copy with the provided fields overwritten and the revision
    /// bumped.
    ///
    /// Does not check the new parent; callers run [`ensure_acyclic`] first.
    pub fn apply(
        &self,
        update: &NavigationItemUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        update.validate()?;
        let mut next = self.clone();
        if let Some(label) = &update.label {
            next.label.clone_from(label);
        }
        if let Some(url) = &update.url {
            next.url.clone_from(url);
        }
        if let Some(position) = update.position {
            next.position = position;
        }
        if let Some(is_external) = update.is_external {
            next.is_external = is_external;
        }
        if let Some(is_active) = update.is_active {
            next.is_active = is_active;
        }
        if let Some(parent_id) = update.parent_id {
            next.parent_id = parent_id;
        }
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        Ok(next)
    }
}

/// Creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NavigationItemCreate {
    /// Visible text.
    #[schema(example = "Pricing")]
    pub label: String,
    /// Link target.
    #[schema(example = "/pricing")]
    pub url: String,
    /// Ordering key, `0` when omitted.
    #[serde(default)]
    pub position: i32,
    /// Whether the link leaves the site.
    #[serde(default)]
    pub is_external: bool,
    /// Optional parent item.
    #[serde(default)]
    pub parent_id: Option<NavigationItemId>,
}

impl NavigationItemCreate {
    /// Top-level link at position `0`.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            position: 0,
            is_external: false,
            parent_id: None,
        }
    }

    /// Place the link under `parent_id`.
    pub fn under(mut self, parent_id: NavigationItemId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Check every field constraint without side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_label(&self.label)?;
        validate_url(&self.url)
    }
}

/// A validated item awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNavigationItem {
    /// Owning website.
    pub website_id: WebsiteId,
    /// Parent item.
    pub parent_id: Option<NavigationItemId>,
    /// Visible text.
    pub label: String,
    /// Link target.
    pub url: String,
    /// Ordering key among siblings.
    pub position: i32,
    /// Whether the link leaves the site.
    pub is_external: bool,
    /// Whether the item is rendered.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewNavigationItem {
    /// Validate `draft` and apply defaults.
    pub fn try_new(
        website_id: WebsiteId,
        draft: NavigationItemCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            website_id,
            parent_id: draft.parent_id,
            label: draft.label,
            url: draft.url,
            position: draft.position,
            is_external: draft.is_external,
            is_active: true,
            created_at: now,
        })
    }

    /// Attach the storage-assigned identifier.
    pub fn into_item(self, id: NavigationItemId) -> NavigationItem {
        NavigationItem {
            id,
            website_id: self.website_id,
            parent_id: self.parent_id,
            label: self.label,
            url: self.url,
            position: self.position,
            is_external: self.is_external,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.created_at,
            revision: 1,
        }
    }
}

/// Partial update; absent fields are left untouched.
///
/// `parent_id` distinguishes an absent key (keep the parent) from an explicit
/// `null` (move to the top level).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NavigationItemUpdate {
    /// New visible text.
    #[serde(default)]
    pub label: Option<String>,
    /// New link target.
    #[serde(default)]
    pub url: Option<String>,
    /// New ordering key.
    #[serde(default)]
    pub position: Option<i32>,
    /// New external flag.
    #[serde(default)]
    pub is_external: Option<bool>,
    /// Show or hide the item.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// New parent; `null` moves the item to the top level.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>, nullable)]
    pub parent_id: Option<Option<NavigationItemId>>,
}

impl NavigationItemUpdate {
    /// Check the provided fields only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(label) = &self.label {
            validate_label(label)?;
        }
        if let Some(url) = &self.url {
            validate_url(url)?;
        }
        Ok(())
    }
}

/// Read-only projection of a [`NavigationItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NavigationItemResponse {
    /// Identifier.
    pub id: NavigationItemId,
    /// Owning website.
    pub website_id: WebsiteId,
    /// Parent item.
    pub parent_id: Option<NavigationItemId>,
    /// Visible text.
    pub label: String,
    /// Link target.
    pub url: String,
    /// Ordering key among siblings.
    pub position: i32,
    /// Whether the link leaves the site.
    pub is_external: bool,
    /// Whether the item is rendered.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl From<&NavigationItem> for NavigationItemResponse {
    fn from(item: &NavigationItem) -> Self {
        Self {
            id: item.id,
            website_id: item.website_id,
            parent_id: item.parent_id,
            label: item.label.clone(),
            url: item.url.clone(),
            position: item.position,
            is_external: item.is_external,
            is_active: item.is_active,
            created_at: item.created_at,
            updated_at: item.updated_at,
            revision: item.revision,
        }
    }
}
