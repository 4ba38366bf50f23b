//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! Every table carries a `revision` column used for optimistic concurrency.
//! Enumerations are stored as their lowercase text form.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Unique email address (max 255 characters).
        email -> Varchar,
        /// Unique handle (max 50 characters).
        username -> Varchar,
        /// Display name (max 100 characters).
        full_name -> Varchar,
        /// Whether the account may sign in.
        is_active -> Bool,
        /// Whether the account is on a paid plan.
        is_premium -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
        /// Optimistic concurrency counter.
        revision -> Int4,
    }
}

diesel::table! {
    /// Websites owned by users.
    websites (id) {
        /// Primary key.
        id -> Int8,
        /// Owning user; `ON DELETE CASCADE`.
        owner_id -> Int8,
        name -> Varchar,
        /// Unique when present.
        domain -> Nullable<Varchar>,
        description -> Nullable<Varchar>,
        /// One of `active`, `inactive`, `building`.
        status -> Varchar,
        theme -> Varchar,
        custom_css -> Nullable<Text>,
        seo_settings -> Jsonb,
        analytics_config -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        published_at -> Nullable<Timestamptz>,
        revision -> Int4,
    }
}

diesel::table! {
    /// Pages of a website; `(website_id, slug)` is unique.
    pages (id) {
        id -> Int8,
        /// Owning website; `ON DELETE CASCADE`.
        website_id -> Int8,
        title -> Varchar,
        slug -> Varchar,
        meta_description -> Nullable<Varchar>,
        content -> Jsonb,
        /// One of `draft`, `published`, `archived`.
        status -> Varchar,
        is_homepage -> Bool,
        template -> Varchar,
        custom_css -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        published_at -> Nullable<Timestamptz>,
        revision -> Int4,
    }
}

diesel::table! {
    /// Ordered content blocks of a page.
    content_blocks (id) {
        id -> Int8,
        /// Owning page; `ON DELETE CASCADE`.
        page_id -> Int8,
        block_type -> Varchar,
        title -> Nullable<Varchar>,
        content -> Jsonb,
        position -> Int4,
        is_visible -> Bool,
        styling -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        revision -> Int4,
    }
}

diesel::table! {
    /// Navigation items forming one forest per website.
    navigation_items (id) {
        id -> Int8,
        /// Owning website; `ON DELETE CASCADE`.
        website_id -> Int8,
        /// Parent item of the same website.
        parent_id -> Nullable<Int8>,
        label -> Varchar,
        url -> Varchar,
        position -> Int4,
        is_external -> Bool,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        revision -> Int4,
    }
}

diesel::table! {
    /// AI builder generation sessions.
    ai_builder_sessions (id) {
        id -> Int8,
        /// Unique correlation key.
        session_id -> Varchar,
        /// Requesting user; `ON DELETE CASCADE`.
        user_id -> Int8,
        /// Target website; `ON DELETE SET NULL`.
        website_id -> Nullable<Int8>,
        prompt -> Text,
        generated_content -> Jsonb,
        user_feedback -> Nullable<Text>,
        is_applied -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        revision -> Int4,
    }
}

diesel::table! {
    /// Reusable page templates.
    templates (id) {
        id -> Int8,
        /// Unique name.
        name -> Varchar,
        title -> Varchar,
        description -> Varchar,
        category -> Varchar,
        preview_image -> Nullable<Varchar>,
        structure -> Jsonb,
        default_styling -> Jsonb,
        is_premium -> Bool,
        is_active -> Bool,
        usage_count -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        revision -> Int4,
    }
}

diesel::table! {
    /// Marketing features shown on the landing page.
    features (id) {
        id -> Int8,
        /// Unique name.
        name -> Varchar,
        title -> Varchar,
        description -> Varchar,
        /// One of `core`, `ai_builder`, `cms`, `advanced`.
        feature_type -> Varchar,
        icon -> Nullable<Varchar>,
        is_active -> Bool,
        sort_order -> Int4,
        feature_metadata -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        revision -> Int4,
    }
}

diesel::joinable!(websites -> users (owner_id));
diesel::joinable!(pages -> websites (website_id));
diesel::joinable!(content_blocks -> pages (page_id));
diesel::joinable!(navigation_items -> websites (website_id));
diesel::joinable!(ai_builder_sessions -> users (user_id));
diesel::joinable!(ai_builder_sessions -> websites (website_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    websites,
    pages,
    content_blocks,
    navigation_items,
    ai_builder_sessions,
    templates,
    features,
);
