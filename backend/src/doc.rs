//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! component document for every transfer schema:
//!
//! - **Create/Update schemas** validated at the boundary
//! - **Response schemas** returned to consumers
//! - **Shared enums and identifiers** referenced by the schemas above
//! - **Errors**: the [`Error`](crate::domain::Error) envelope and its codes
//!
//! The document carries no paths; HTTP routing lives outside this crate. It
//! is exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{
    AiBuilderRequest, AiBuilderResponse, AiSessionFeedback, AiSessionResponse, BlockPosition,
    ContentBlockCreate, ContentBlockResponse, ContentBlockUpdate, ContentType, Error, ErrorCode,
    FeatureCreate, FeatureResponse, FeatureType, FeatureUpdate, LandingLink, LandingPageData,
    NavigationItemCreate, NavigationItemResponse, NavigationItemUpdate, PageCreate, PageResponse,
    PageStatus, PageUpdate, TemplateCreate, TemplateResponse, TemplateUpdate, UserCreate,
    UserResponse, UserUpdate, WebsiteCreate, WebsiteResponse, WebsiteStatus, WebsiteUpdate,
};

/// OpenAPI component document for the website builder schemas.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sitecraft data model",
        description = "Create, update and response schemas for users, websites, pages, \
                       content blocks, navigation, AI builder sessions and the catalogue.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserCreate,
        UserUpdate,
        UserResponse,
        WebsiteStatus,
        WebsiteCreate,
        WebsiteUpdate,
        WebsiteResponse,
        PageStatus,
        PageCreate,
        PageUpdate,
        PageResponse,
        ContentType,
        ContentBlockCreate,
        ContentBlockUpdate,
        ContentBlockResponse,
        BlockPosition,
        NavigationItemCreate,
        NavigationItemUpdate,
        NavigationItemResponse,
        AiBuilderRequest,
        AiBuilderResponse,
        AiSessionFeedback,
        AiSessionResponse,
        TemplateCreate,
        TemplateUpdate,
        TemplateResponse,
        FeatureType,
        FeatureCreate,
        FeatureUpdate,
        FeatureResponse,
        LandingLink,
        LandingPageData,
    ))
)]
pub struct ApiDoc;
