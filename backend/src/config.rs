//! Runtime settings loaded via OrthoConfig.
//!
//! Values layer from configuration files, then `SITECRAFT_*` environment
//! variables, then command-line flags.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Connections kept by the PostgreSQL pool when not configured.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

fn default_catalogue_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("catalogue.json")
}

/// Settings for the `sitecraft` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SITECRAFT")]
pub struct SiteSettings {
    /// PostgreSQL connection string; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Catalogue seed file override.
    pub catalogue_path: Option<PathBuf>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl SiteSettings {
    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the configured catalogue path, falling back to the bundled
    /// fixture.
    pub fn catalogue_path(&self) -> PathBuf {
        self.catalogue_path
            .clone()
            .unwrap_or_else(default_catalogue_path)
    }
}
