//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the site repository
//! ports backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel rows and domain types. Validation lives in the domain services.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//! - **Named constraints**: the database schema names every unique and foreign key
//!   constraint after the constants in `domain::ports`, so violations map to
//!   `RepositoryError` without string matching on messages.
//! - **Optimistic concurrency**: updates filter on `(id, revision)` and a
//!   zero-row result is resolved into a revision mismatch or a missing row.
//!
//! # Example
//!
//! ```ignore
//! use sitecraft::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/sitecraft")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_ai_session_repository;
mod diesel_catalogue_repository;
mod diesel_content_block_repository;
pub(crate) mod diesel_helpers;
mod diesel_navigation_repository;
mod diesel_page_repository;
mod diesel_user_repository;
mod diesel_website_repository;
mod models;
mod pool;
mod schema;

pub use diesel_ai_session_repository::DieselAiSessionRepository;
pub use diesel_catalogue_repository::{DieselFeatureRepository, DieselTemplateRepository};
pub use diesel_content_block_repository::DieselContentBlockRepository;
pub use diesel_navigation_repository::DieselNavigationRepository;
pub use diesel_page_repository::DieselPageRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_website_repository::DieselWebsiteRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
