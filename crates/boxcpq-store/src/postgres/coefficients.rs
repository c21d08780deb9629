//! CoefficientSource implementation for PostgreSQL

use async_trait::async_trait;
use boxcpq_core::models::normalize_line_item_name;
use boxcpq_core::{CpqError, Result};
use sqlx::Row;
use std::collections::BTreeMap;

use super::PostgresStore;
use crate::ports::CoefficientSource;

#[async_trait]
impl CoefficientSource for PostgresStore {
    async fn fetch_constants(&self) -> Result<BTreeMap<String, f64>> {
        let table = &self.config.tables.constants;
        // Table names are validated identifiers; see TableConfig::validate
        let sql = format!(
            "SELECT name, value::double precision AS value FROM {} WHERE value IS NOT NULL",
            table
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await.map_err(|e| {
            CpqError::SourceUnavailable {
                reason: format!("Failed to fetch constants from {}: {}", table, e),
            }
        })?;

        if rows.is_empty() {
            return Err(CpqError::SourceUnavailable {
                reason: format!("no data found in the {} table", table),
            });
        }

        let mut constants = BTreeMap::new();
        for row in rows {
            let name: String = row.try_get("name").map_err(|e| {
                CpqError::Serialization(format!("Invalid name column in {}: {}", table, e))
            })?;
            let value: f64 = row.try_get("value").map_err(|e| {
                CpqError::Serialization(format!("Invalid value for {} in {}: {}", name, table, e))
            })?;
            constants.insert(name.trim().to_string(), value);
        }

        tracing::debug!(table = %table, count = constants.len(), "Fetched constants");
        Ok(constants)
    }

    async fn fetch_fixed_costs(&self) -> Result<BTreeMap<String, f64>> {
        let table = &self.config.tables.fixed_costs;
        let sql = format!(
            "SELECT name, amount::double precision AS amount FROM {} WHERE amount IS NOT NULL",
            table
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await.map_err(|e| {
            CpqError::SourceUnavailable {
                reason: format!("Failed to fetch fixed costs from {}: {}", table, e),
            }
        })?;

        if rows.is_empty() {
            return Err(CpqError::SourceUnavailable {
                reason: format!("no data found in the {} table", table),
            });
        }

        let mut fixed_costs = BTreeMap::new();
        for row in rows {
            let name: String = row.try_get("name").map_err(|e| {
                CpqError::Serialization(format!("Invalid name column in {}: {}", table, e))
            })?;
            let amount: f64 = row.try_get("amount").map_err(|e| {
                CpqError::Serialization(format!("Invalid amount for {} in {}: {}", name, table, e))
            })?;
            fixed_costs.insert(normalize_line_item_name(&name), amount);
        }

        tracing::debug!(table = %table, count = fixed_costs.len(), "Fetched fixed costs");
        Ok(fixed_costs)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CpqError::SourceUnavailable {
                reason: format!("Health check failed: {}", e),
            })?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "postgres ({}, {})",
            self.config.tables.constants, self.config.tables.fixed_costs
        )
    }
}
