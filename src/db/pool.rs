use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::{debug, info, instrument};

use crate::config::DatabaseConfig;
use crate::errors::ScheduleError;

/// Database connection pool wrapper.
///
/// The pool is lazy: no connection is opened until a query runs, so an
/// unreachable store never stops the server from starting.
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: MySqlPool,
}

impl DbPool {
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            "Preparing database connection pool"
        );

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = MySqlPoolOptions::new().connect_lazy_with(options);
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check database connectivity with a trivial query.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), ScheduleError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ScheduleError::ConnectionFailed(e.to_string()))?;

        debug!("Database health check passed");
        Ok(())
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}
