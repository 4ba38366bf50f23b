//! Tracing subscriber installation for the binaries.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// A second installation, for example from a test harness that already set
/// one, is reported and otherwise ignored.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
