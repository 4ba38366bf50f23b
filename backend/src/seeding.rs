//! Catalogue seed file loading and startup seeding.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{FeatureRepository, TemplateRepository};
use crate::domain::{CatalogueSeed, CatalogueService, Error as DomainError, SeedOutcome};

/// Errors returned while loading or applying a catalogue seed.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// Seed file could not be read.
    #[error("failed to read catalogue seed at {path}: {source}")]
    Read {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not a valid catalogue document.
    #[error("failed to parse catalogue seed at {path}: {source}")]
    Parse {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// An entry was rejected by the catalogue service.
    #[error("catalogue seeding failed: {0}")]
    Apply(#[from] DomainError),
}

fn read_error(path: &Path, source: std::io::Error) -> SeedingError {
    SeedingError::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and parse a catalogue seed file.
///
/// # Errors
///
/// Returns [`SeedingError::Read`] when the file cannot be opened and
/// [`SeedingError::Parse`] when it is not a catalogue document.
pub fn load_catalogue_seed(path: &Path) -> Result<CatalogueSeed, SeedingError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "catalogue path must be a file",
            ),
        )
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|source| read_error(path, source))?;
    let payload = dir
        .read(Path::new(file_name))
        .map_err(|source| read_error(path, source))?;
    serde_json::from_slice(&payload).map_err(|source| SeedingError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the seed at `path` and insert every entry not yet present.
///
/// # Errors
///
/// Propagates file, parse and catalogue failures as [`SeedingError`].
pub async fn seed_catalogue_on_startup<T, F>(
    service: &CatalogueService<T, F>,
    path: &Path,
) -> Result<(CatalogueSeed, SeedOutcome), SeedingError>
where
    T: TemplateRepository,
    F: FeatureRepository,
{
    let seed = load_catalogue_seed(path)?;
    let outcome = service.seed(&seed).await?;
    info!(
        path = %path.display(),
        templates_created = outcome.templates_created,
        features_created = outcome.features_created,
        "catalogue seed applied"
    );
    Ok((seed, outcome))
}
