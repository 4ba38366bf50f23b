//! Persistence errors shared by every site repository port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// A uniqueness constraint rejected the write.
        UniqueViolation { constraint: String } => "unique constraint violated: {constraint}",
        /// A foreign key pointed at a missing record.
        MissingReference { reference: String } => "referenced record does not exist: {reference}",
        /// Optimistic concurrency check failed.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
        /// The record to mutate does not exist.
        NotFound { entity: String } => "record not found: {entity}",
        /// A bulk write named records outside its scope.
        Inconsistent { message: String } => "inconsistent write rejected: {message}",
    }
}

/// Storage constraint names reported in [`RepositoryError::UniqueViolation`].
///
/// The names follow PostgreSQL's default `<table>_<columns>_key` scheme so
/// the Diesel adapter can forward the database's constraint name verbatim.
pub mod constraints {
    /// `users.email`.
    pub const USERS_EMAIL: &str = "users_email_key";
    /// `users.username`.
    pub const USERS_USERNAME: &str = "users_username_key";
    /// `websites.domain`.
    pub const WEBSITES_DOMAIN: &str = "websites_domain_key";
    /// `(pages.website_id, pages.slug)`.
    pub const PAGES_WEBSITE_SLUG: &str = "pages_website_id_slug_key";
    /// `ai_builder_sessions.session_id`.
    pub const AI_SESSIONS_SESSION_ID: &str = "ai_builder_sessions_session_id_key";
    /// `templates.name`.
    pub const TEMPLATES_NAME: &str = "templates_name_key";
    /// `features.name`.
    pub const FEATURES_NAME: &str = "features_name_key";
}

/// Foreign key names reported in [`RepositoryError::MissingReference`].
pub mod references {
    /// `websites.owner_id -> users.id`.
    pub const WEBSITE_OWNER: &str = "websites_owner_id_fkey";
    /// `pages.website_id -> websites.id`.
    pub const PAGE_WEBSITE: &str = "pages_website_id_fkey";
    /// `content_blocks.page_id -> pages.id`.
    pub const BLOCK_PAGE: &str = "content_blocks_page_id_fkey";
    /// `navigation_items.website_id -> websites.id`.
    pub const NAVIGATION_WEBSITE: &str = "navigation_items_website_id_fkey";
    /// `navigation_items.parent_id -> navigation_items.id`.
    pub const NAVIGATION_PARENT: &str = "navigation_items_parent_id_fkey";
    /// `ai_builder_sessions.user_id -> users.id`.
    pub const AI_SESSION_USER: &str = "ai_builder_sessions_user_id_fkey";
    /// `ai_builder_sessions.website_id -> websites.id`.
    pub const AI_SESSION_WEBSITE: &str = "ai_builder_sessions_website_id_fkey";
}
