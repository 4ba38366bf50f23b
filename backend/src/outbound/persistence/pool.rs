//! Shared `bb8` pool of async PostgreSQL connections.
//!
//! Every Diesel site repository holds a clone of one [`DbPool`]. Checkout
//! failures surface as [`PoolError`], which the repositories report as
//! `RepositoryError::Connection` so services answer `service_unavailable`.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::debug;

use crate::config::DEFAULT_POOL_MAX_SIZE;

/// Idle connections kept warm unless configured otherwise.
const DEFAULT_MIN_IDLE: u32 = 2;
/// Checkout deadline unless configured otherwise.
const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures building the pool or checking a connection out of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available before the timeout.
    #[error("no database connection available: {message}")]
    Checkout { message: String },

    /// The pool could not be created from its configuration.
    #[error("database pool could not be created: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Checkout failure with the given cause.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Build failure with the given cause.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Connection settings for [`DbPool`].
///
/// `min_idle` is clamped to `max_size` when the pool is built.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use sitecraft::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://sitecraft@localhost/sitecraft")
///     .with_max_size(1)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 1);
/// assert_eq!(config.effective_min_idle(), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Settings for `database_url` with the sitecraft defaults: ten
    /// connections, two kept idle, a thirty second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_POOL_MAX_SIZE,
            min_idle: Some(DEFAULT_MIN_IDLE),
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Cap the number of open connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Connections to keep open while idle; `None` keeps none.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// How long a checkout may wait for a free connection.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Upper bound on open connections.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Idle target after clamping to [`max_size`](Self::max_size).
    pub fn effective_min_idle(&self) -> Option<u32> {
        self.min_idle.map(|idle| idle.min(self.max_size))
    }
}

/// Cloneable handle onto the PostgreSQL connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool, opening the idle connections eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] for a zero-sized pool, a malformed URL or
    /// an unreachable database.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        if config.max_size == 0 {
            return Err(PoolError::build("max_size must be at least 1"));
        }
        let min_idle = config.effective_min_idle();
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        debug!(max_size = config.max_size, ?min_idle, "database pool ready");
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when none frees up within the
    /// configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const URL: &str = "postgres://sitecraft@localhost/sitecraft";

    #[rstest]
    fn defaults_follow_the_settings_default() {
        let config = PoolConfig::new(URL);

        assert_eq!(config.database_url(), URL);
        assert_eq!(config.max_size(), DEFAULT_POOL_MAX_SIZE);
        assert_eq!(config.effective_min_idle(), Some(DEFAULT_MIN_IDLE));
        assert_eq!(config.connection_timeout, DEFAULT_CONNECTION_TIMEOUT);
    }

    #[rstest]
    #[case(Some(5), 20, Some(5))]
    #[case(Some(5), 3, Some(3))]
    #[case(None, 3, None)]
    fn min_idle_never_exceeds_max_size(
        #[case] min_idle: Option<u32>,
        #[case] max_size: u32,
        #[case] expected: Option<u32>,
    ) {
        let config = PoolConfig::new(URL)
            .with_min_idle(min_idle)
            .with_max_size(max_size);

        assert_eq!(config.effective_min_idle(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn zero_sized_pool_is_rejected_before_connecting() {
        let result = DbPool::new(PoolConfig::new(URL).with_max_size(0)).await;

        assert!(matches!(result, Err(PoolError::Build { .. })));
    }

    #[rstest]
    fn errors_carry_their_cause() {
        assert!(
            PoolError::checkout("timed out")
                .to_string()
                .ends_with("timed out")
        );
        assert!(PoolError::build("bad url").to_string().ends_with("bad url"));
    }
}
