//! Sitecraft entry-point: loads settings, seeds the catalogue and prints the
//! landing page data as JSON.
//!
//! Storage is PostgreSQL when `SITECRAFT_DATABASE_URL` is set and the
//! in-memory store otherwise.

use std::io::Write as _;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::info;

use sitecraft::config::SiteSettings;
use sitecraft::domain::ports::{FeatureRepository, TemplateRepository};
use sitecraft::domain::{CatalogueService, LandingPageData};
use sitecraft::outbound::memory::InMemorySiteStore;
use sitecraft::outbound::persistence::{
    DbPool, DieselFeatureRepository, DieselTemplateRepository, PoolConfig,
};
use sitecraft::seeding::seed_catalogue_on_startup;
use sitecraft::telemetry::init_tracing;

/// Application bootstrap.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        SiteSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;
    let landing = match settings.database_url() {
        Some(url) => {
            let config = PoolConfig::new(url).with_max_size(settings.pool_max_size);
            let pool = DbPool::new(config)
                .await
                .wrap_err("failed to build database pool")?;
            info!(
                max_size = settings.pool_max_size,
                "using PostgreSQL storage"
            );
            let service = CatalogueService::new(
                Arc::new(DieselTemplateRepository::new(pool.clone())),
                Arc::new(DieselFeatureRepository::new(pool)),
                Arc::new(DefaultClock),
            );
            build_landing(&service, &settings).await?
        }
        None => {
            info!("using in-memory storage");
            let store = Arc::new(InMemorySiteStore::new());
            let service = CatalogueService::new(store.clone(), store, Arc::new(DefaultClock));
            build_landing(&service, &settings).await?
        }
    };

    let json = serde_json::to_string_pretty(&landing).wrap_err("failed to encode landing page")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").wrap_err("failed to write landing page")?;
    Ok(())
}

async fn build_landing<T, F>(
    service: &CatalogueService<T, F>,
    settings: &SiteSettings,
) -> Result<LandingPageData>
where
    T: TemplateRepository,
    F: FeatureRepository,
{
    let path = settings.catalogue_path();
    let (seed, _) = seed_catalogue_on_startup(service, &path)
        .await
        .wrap_err_with(|| format!("failed to seed catalogue from {}", path.display()))?;
    service
        .landing_page(seed.landing)
        .await
        .wrap_err("failed to assemble landing page")
}
