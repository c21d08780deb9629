//! PostgreSQL coefficient source

pub mod coefficients;
pub mod config;

pub use config::{ConfigError, PoolConfig, PostgresConfig, TableConfig};

use boxcpq_core::{CpqError, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

/// PostgreSQL storage adapter
pub struct PostgresStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresStore {
    /// Connect with the given configuration
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        config.validate().map_err(|e| CpqError::ConfigInvalid {
            key: "postgres".to_string(),
            reason: e.to_string(),
        })?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .connect(&config.database_url)
            .await
            .map_err(|e| CpqError::SourceUnavailable {
                reason: format!("Failed to connect to database: {}", e),
            })?;

        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|e| CpqError::SourceUnavailable {
                reason: format!("Connection test failed: {}", e),
            })?;

        tracing::info!(
            constants_table = %config.tables.constants,
            fixed_costs_table = %config.tables.fixed_costs,
            "Connected to PostgreSQL coefficient source"
        );

        Ok(Self { pool, config })
    }
}
