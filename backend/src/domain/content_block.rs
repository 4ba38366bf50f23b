//! Ordered content blocks that make up a page.
//!
//! Render order is `(position, id)` ascending. Positions may repeat or leave
//! gaps; the identifier breaks ties so the order is always total.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::define_text_enum;
use super::validation::{self, ValidationError};
use super::{ContentBlockId, JsonObject, PageId};

/// Maximum length of a block title.
pub const TITLE_MAX: usize = 200;

define_text_enum! {
    /// Kind of content a block renders.
    pub enum ContentType {
        /// Rich text.
        Text => "text",
        /// Single image.
        Image => "image",
        /// Embedded video.
        Video => "video",
        /// Page header banner.
        Hero => "hero",
        /// Feature highlight.
        Feature => "feature",
        /// Call to action.
        Cta => "cta",
        /// In-page navigation.
        Navigation => "navigation",
        /// Page footer.
        Footer => "footer",
    }
}

pub(crate) fn validate_title(value: Option<&str>) -> Result<(), ValidationError> {
    validation::optional_text("title", value, TITLE_MAX)
}

const fn default_visible() -> bool {
    true
}

/// A block of content on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Storage-assigned identifier.
    pub id: ContentBlockId,
    /// Owning page.
    pub page_id: PageId,
    /// Kind of content.
    pub block_type: ContentType,
    /// Optional heading.
    pub title: Option<String>,
    /// Opaque block content.
    pub content: JsonObject,
    /// Ordering key within the page.
    pub position: i32,
    /// Whether the block is rendered.
    pub is_visible: bool,
    /// Opaque styling overrides.
    pub styling: JsonObject,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl ContentBlock {
    /// Sort key used for every retrieval.
    pub const fn order_key(&self) -> (i32, ContentBlockId) {
        (self.position, self.id)
    }

    /// Build a block on `page_id` from a creation payload.
    pub fn create(
        id: ContentBlockId,
        page_id: PageId,
        draft: ContentBlockCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(NewContentBlock::try_new(page_id, draft, now)?.into_block(id))
    }

    /// Return a copy with the provided fields overwritten and the revision
    /// bumped.
    pub fn apply(
        &self,
        update: &ContentBlockUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        update.validate()?;
        let mut next = self.clone();
        if let Some(title) = &update.title {
            next.title = Some(title.clone());
        }
        if let Some(content) = &update.content {
            next.content = content.clone();
        }
        if let Some(position) = update.position {
            next.position = position;
        }
        if let Some(is_visible) = update.is_visible {
            next.is_visible = is_visible;
        }
        if let Some(styling) = &update.styling {
            next.styling = styling.clone();
        }
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        Ok(next)
    }

    /// Return a copy moved to `position` with the revision bumped.
    pub fn moved_to(&self, position: i32, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.position = position;
        next.updated_at = now;
        next.revision = self.revision.saturating_add(1);
        next
    }
}

/// Sort blocks into render order.
pub fn sort_blocks(blocks: &mut [ContentBlock]) {
    blocks.sort_by_key(ContentBlock::order_key);
}

/// Creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ContentBlockCreate {
    /// Kind of content.
    #[serde(rename = "type")]
    pub block_type: ContentType,
    /// Optional heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Block content, `{}` when omitted.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub content: JsonObject,
    /// Ordering key, `0` when omitted.
    #[serde(default)]
    pub position: i32,
    /// Styling overrides, `{}` when omitted.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub styling: JsonObject,
}

impl ContentBlockCreate {
    /// Payload of the given kind at `position`; other fields default.
    pub fn new(block_type: ContentType, position: i32) -> Self {
        Self {
            block_type,
            title: None,
            content: JsonObject::new(),
            position,
            styling: JsonObject::new(),
        }
    }

    /// Check every field constraint without side effects.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(self.title.as_deref())
    }
}

/// A validated block awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContentBlock {
    /// Owning page.
    pub page_id: PageId,
    /// Kind of content.
    pub block_type: ContentType,
    /// Optional heading.
    pub title: Option<String>,
    /// Block content.
    pub content: JsonObject,
    /// Ordering key.
    pub position: i32,
    /// Whether the block is rendered.
    pub is_visible: bool,
    /// Styling overrides.
    pub styling: JsonObject,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewContentBlock {
    /// Validate `draft` and apply defaults.
    pub fn try_new(
        page_id: PageId,
        draft: ContentBlockCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            page_id,
            block_type: draft.block_type,
            title: draft.title,
            content: draft.content,
            position: draft.position,
            is_visible: default_visible(),
            styling: draft.styling,
            created_at: now,
        })
    }

    /// Attach the storage-assigned identifier.
    pub fn into_block(self, id: ContentBlockId) -> ContentBlock {
        ContentBlock {
            id,
            page_id: self.page_id,
            block_type: self.block_type,
            title: self.title,
            content: self.content,
            position: self.position,
            is_visible: self.is_visible,
            styling: self.styling,
            created_at: self.created_at,
            updated_at: self.created_at,
            revision: 1,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ContentBlockUpdate {
    /// New heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement content.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub content: Option<JsonObject>,
    /// New ordering key.
    #[serde(default)]
    pub position: Option<i32>,
    /// Show or hide the block.
    #[serde(default)]
    pub is_visible: Option<bool>,
    /// Replacement styling overrides.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub styling: Option<JsonObject>,
}

impl ContentBlockUpdate {
    /// Check the provided fields only.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(self.title.as_deref())
    }
}

/// One entry of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct BlockPosition {
    /// Block to move.
    pub block_id: ContentBlockId,
    /// New ordering key.
    pub position: i32,
}

/// Ensure a reorder request names each block at most once.
pub fn validate_reorder(moves: &[BlockPosition]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(moves.len());
    for entry in moves {
        if !seen.insert(entry.block_id) {
            return Err(ValidationError::Duplicate {
                field: "block_id",
                value: entry.block_id.get(),
            });
        }
    }
    Ok(())
}

/// Read-only projection of a [`ContentBlock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContentBlockResponse {
    /// Identifier.
    pub id: ContentBlockId,
    /// Owning page.
    pub page_id: PageId,
    /// Kind of content.
    #[serde(rename = "type")]
    pub block_type: ContentType,
    /// Heading.
    pub title: Option<String>,
    /// Block content.
    #[schema(value_type = Object)]
    pub content: JsonObject,
    /// Ordering key.
    pub position: i32,
    /// Whether the block is rendered.
    pub is_visible: bool,
    /// Styling overrides.
    #[schema(value_type = Object)]
    pub styling: JsonObject,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub revision: u32,
}

impl From<&ContentBlock> for ContentBlockResponse {
    fn from(block: &ContentBlock) -> Self {
        Self {
            id: block.id,
            page_id: block.page_id,
            block_type: block.block_type,
            title: block.title.clone(),
            content: block.content.clone(),
            position: block.position,
            is_visible: block.is_visible,
            styling: block.styling.clone(),
            created_at: block.created_at,
            updated_at: block.updated_at,
            revision: block.revision,
        }
    }
}
