//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed website-builder model (users,
//! websites, pages, content blocks, navigation, AI builder sessions and the
//! template/feature catalogue), its transfer schemas and validation, and the
//! services that drive it through the [`ports`].
//!
//! Public surface:
//! - Entities and their `*Create`, `*Update` and `*Response` schemas.
//! - [`Error`] and [`ErrorCode`]: stable failure kinds for every operation.
//! - [`NavigationForest`] and [`ensure_acyclic`]: the navigation hierarchy.
//! - Services such as [`UserService`] and [`CatalogueService`].
//!
//! The domain never depends on adapters; storage lives behind [`ports`].

mod macros;

pub mod ai_builder_service;
pub mod ai_session;
pub mod catalogue_service;
pub mod content_block;
pub mod content_block_service;
pub mod error;
pub mod feature;
mod ids;
mod json_object;
pub mod landing;
pub mod navigation;
pub mod navigation_service;
pub mod page;
pub mod page_service;
pub mod ports;
mod service_support;
#[cfg(test)]
mod service_test_support;
mod slug;
pub mod template;
pub mod user;
pub mod user_service;
pub mod validation;
pub mod website;
pub mod website_service;

pub use self::ai_builder_service::AiBuilderService;
pub use self::ai_session::{
    AiBuilderRequest, AiBuilderResponse, AiBuilderSession, AiSessionFeedback, AiSessionResponse,
    GeneratedContent, NewAiSession,
};
pub use self::catalogue_service::{CatalogueSeed, CatalogueService, SeedOutcome};
pub use self::content_block::{
    BlockPosition, ContentBlock, ContentBlockCreate, ContentBlockResponse, ContentBlockUpdate,
    ContentType, NewContentBlock, sort_blocks, validate_reorder,
};
pub use self::content_block_service::ContentBlockService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feature::{
    Feature, FeatureCreate, FeatureResponse, FeatureType, FeatureUpdate, NewFeature,
};
pub use self::ids::{
    AiSessionId, ContentBlockId, FeatureId, NavigationItemId, PageId, TemplateId, UserId, WebsiteId,
};
pub use self::json_object::{JsonObject, NotAnObject};
pub use self::landing::{LandingContent, LandingLink, LandingPageData};
pub use self::navigation::{
    NavigationError, NavigationForest, NavigationItem, NavigationItemCreate, NavigationItemResponse,
    NavigationItemUpdate, NavigationNode, NewNavigationItem, ensure_acyclic,
};
pub use self::navigation_service::NavigationService;
pub use self::page::{NewPage, Page, PageCreate, PageResponse, PageStatus, PageUpdate};
pub use self::page_service::PageService;
pub use self::slug::slugify;
pub use self::template::{NewTemplate, Template, TemplateCreate, TemplateResponse, TemplateUpdate};
pub use self::user::{NewUser, User, UserCreate, UserResponse, UserUpdate};
pub use self::user_service::UserService;
pub use self::validation::{ParseEnumError, ValidationError};
pub use self::website::{
    NewWebsite, Website, WebsiteCreate, WebsiteResponse, WebsiteStatus, WebsiteUpdate,
};
pub use self::website_service::WebsiteService;

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use sitecraft::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("page 7 not found"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
