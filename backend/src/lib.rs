//! Sitecraft: the data core of a website-building service.
//!
//! Users own websites; websites hold pages, ordered content blocks and a
//! navigation forest; an AI builder records generation sessions; templates
//! and marketing features make up the catalogue. The crate is laid out
//! hexagonally:
//!
//! - [`domain`]: entities, transfer schemas, validation, services and ports.
//! - [`outbound`]: the in-memory and PostgreSQL adapters behind the ports.
//! - [`config`], [`seeding`], [`telemetry`] and [`doc`]: ambient concerns used
//!   by the binaries.

pub mod config;
pub mod doc;
pub mod domain;
pub mod outbound;
pub mod seeding;
pub mod telemetry;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
