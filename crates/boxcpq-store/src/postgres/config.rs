//! PostgreSQL configuration

use boxcpq_core::config::parse_table_name;
use std::time::Duration;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// PostgreSQL connection and table configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Connection pool configuration
    pub pool: PoolConfig,
    /// Names of the coefficient tables
    pub tables: TableConfig,
}

impl PostgresConfig {
    /// Load configuration from environment variables
    ///
    /// Requires DATABASE_URL environment variable to be set.
    /// Table names use defaults unless set with `with_tables`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?;

        Self::new(database_url).map_err(|e| match e {
            ConfigError::Invalid { reason, .. } => ConfigError::Invalid {
                key: "DATABASE_URL".to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Create a new configuration with the given database URL
    pub fn new(database_url: String) -> Result<Self, ConfigError> {
        if database_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "database_url".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        Ok(Self {
            database_url,
            pool: PoolConfig::default(),
            tables: TableConfig::default(),
        })
    }

    /// Override the coefficient table names
    pub fn with_tables(mut self, constants: &str, fixed_costs: &str) -> Result<Self, ConfigError> {
        self.tables = TableConfig::new(constants, fixed_costs)?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "database_url".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        self.pool.validate()?;
        self.tables.validate()?;

        Ok(())
    }
}

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum number of connections allowed
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout: Duration,
    /// Timeout for idle connections before they are closed
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

impl PoolConfig {
    /// Validate pool configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid {
                key: "pool.min_connections".to_string(),
                reason: format!(
                    "min_connections ({}) cannot be greater than max_connections ({})",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "pool.max_connections".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Names of the constants and fixed-cost tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub constants: String,
    pub fixed_costs: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            constants: "constants".to_string(),
            fixed_costs: "fixed_costs".to_string(),
        }
    }
}

impl TableConfig {
    pub fn new(constants: &str, fixed_costs: &str) -> Result<Self, ConfigError> {
        let tables = Self {
            constants: constants.trim().to_string(),
            fixed_costs: fixed_costs.trim().to_string(),
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Table names end up in SQL text, so they must be plain identifiers
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, name) in [
            ("tables.constants", &self.constants),
            ("tables.fixed_costs", &self.fixed_costs),
        ] {
            parse_table_name(key, name).map_err(|e| ConfigError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}
