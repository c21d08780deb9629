use crate::error::{CpqError, Result};
use crate::models::ComplexityPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Where cost coefficients are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-memory tables, optionally seeded from a TOML file
    Memory,
    /// PostgreSQL tables (requires DATABASE_URL)
    Postgres,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => f.write_str("memory"),
            StorageBackend::Postgres => f.write_str("postgres"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = CpqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" | "pg" => Ok(StorageBackend::Postgres),
            _ => Err(CpqError::ConfigInvalid {
                key: "storage".to_string(),
                reason: format!("Invalid storage backend: {}. Use memory or postgres", s),
            }),
        }
    }
}

/// Layered configuration for boxcpq
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub storage: ConfigValue<StorageBackend>,
    pub coefficients_file: ConfigValue<Option<PathBuf>>,
    pub complexity: ConfigValue<ComplexityPolicy>,
    pub constants_table: ConfigValue<String>,
    pub fixed_costs_table: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            storage: ConfigValue::new(StorageBackend::Memory, ConfigSource::Default),
            coefficients_file: ConfigValue::new(None, ConfigSource::Default),
            complexity: ConfigValue::new(ComplexityPolicy::Ignore, ConfigSource::Default),
            constants_table: ConfigValue::new("constants".to_string(), ConfigSource::Default),
            fixed_costs_table: ConfigValue::new("fixed_costs".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CpqError::ConfigFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| CpqError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CpqError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(storage) = file_config.storage {
            self.storage.update(storage, ConfigSource::File);
        }

        if let Some(coefficients_file) = file_config.coefficients_file {
            // Relative paths are resolved against the config file's directory
            let resolved = match path.parent() {
                Some(dir) if coefficients_file.is_relative() => dir.join(coefficients_file),
                _ => coefficients_file,
            };
            self.coefficients_file.update(Some(resolved), ConfigSource::File);
        }

        if let Some(complexity) = file_config.complexity {
            self.complexity.update(complexity, ConfigSource::File);
        }

        if let Some(table) = file_config.constants_table {
            self.constants_table.update(parse_table_name("constants_table", &table)?, ConfigSource::File);
        }

        if let Some(table) = file_config.fixed_costs_table {
            self.fixed_costs_table
                .update(parse_table_name("fixed_costs_table", &table)?, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // BOXCPQ_STORAGE
        if let Ok(storage_str) = env::var("BOXCPQ_STORAGE") {
            match storage_str.parse::<StorageBackend>() {
                Ok(storage) => self.storage.update(storage, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid BOXCPQ_STORAGE value '{}': expected memory or postgres",
                    storage_str
                ),
            }
        }

        // BOXCPQ_COEFFICIENTS_FILE
        if let Ok(path) = env::var("BOXCPQ_COEFFICIENTS_FILE") {
            if !path.trim().is_empty() {
                self.coefficients_file
                    .update(Some(PathBuf::from(path)), ConfigSource::Environment);
            }
        }

        // BOXCPQ_COMPLEXITY
        if let Ok(policy_str) = env::var("BOXCPQ_COMPLEXITY") {
            match policy_str.parse::<ComplexityPolicy>() {
                Ok(policy) => self.complexity.update(policy, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid BOXCPQ_COMPLEXITY value '{}': expected ignore or apply",
                    policy_str
                ),
            }
        }

        // BOXCPQ_CONSTANTS_TABLE
        if let Ok(table) = env::var("BOXCPQ_CONSTANTS_TABLE") {
            match parse_table_name("constants_table", &table) {
                Ok(table) => self.constants_table.update(table, ConfigSource::Environment),
                Err(e) => tracing::warn!("Ignoring BOXCPQ_CONSTANTS_TABLE: {}", e),
            }
        }

        // BOXCPQ_FIXED_COSTS_TABLE
        if let Ok(table) = env::var("BOXCPQ_FIXED_COSTS_TABLE") {
            match parse_table_name("fixed_costs_table", &table) {
                Ok(table) => self.fixed_costs_table.update(table, ConfigSource::Environment),
                Err(e) => tracing::warn!("Ignoring BOXCPQ_FIXED_COSTS_TABLE: {}", e),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(storage) = overrides.storage {
            self.storage.update(storage, ConfigSource::Cli);
        }

        if let Some(path) = overrides.coefficients_file {
            self.coefficients_file.update(Some(path), ConfigSource::Cli);
        }

        if let Some(complexity) = overrides.complexity {
            self.complexity.update(complexity, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("storage".to_string(), (self.storage.value.to_string(), self.storage.source));

        map.insert(
            "coefficients_file".to_string(),
            (
                self.coefficients_file
                    .value
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
                self.coefficients_file.source,
            ),
        );

        map.insert(
            "complexity".to_string(),
            (self.complexity.value.to_string(), self.complexity.source),
        );

        map.insert(
            "constants_table".to_string(),
            (self.constants_table.value.clone(), self.constants_table.source),
        );

        map.insert(
            "fixed_costs_table".to_string(),
            (self.fixed_costs_table.value.clone(), self.fixed_costs_table.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    storage: Option<StorageBackend>,
    coefficients_file: Option<PathBuf>,
    complexity: Option<ComplexityPolicy>,
    constants_table: Option<String>,
    fixed_costs_table: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub storage: Option<StorageBackend>,
    pub coefficients_file: Option<PathBuf>,
    pub complexity: Option<ComplexityPolicy>,
}

/// Table names are interpolated into SQL, so only plain identifiers pass
pub fn parse_table_name(key: &str, s: &str) -> Result<String> {
    let name = s.trim();
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest {
        Ok(name.to_string())
    } else {
        Err(CpqError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("'{}' is not a valid table name", s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.storage.value, StorageBackend::Memory);
        assert_eq!(config.storage.source, ConfigSource::Default);
        assert_eq!(config.complexity.value, ComplexityPolicy::Ignore);
        assert!(config.coefficients_file.value.is_none());
        assert_eq!(config.constants_table.value, "constants");
        assert_eq!(config.fixed_costs_table.value, "fixed_costs");
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
storage = "postgres"
complexity = "apply"
fixed_costs_table = "custos_fixos"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.storage.value, StorageBackend::Postgres);
        assert_eq!(config.storage.source, ConfigSource::File);
        assert_eq!(config.complexity.value, ComplexityPolicy::Apply);
        assert_eq!(config.fixed_costs_table.value, "custos_fixos");
        assert_eq!(config.constants_table.source, ConfigSource::Default);
    }

    #[test]
    fn test_relative_coefficients_file_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("boxcpq.toml");
        fs::write(&config_path, "coefficients_file = \"coefficients.toml\"\n").unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(&config_path).unwrap();

        assert_eq!(
            config.coefficients_file.value,
            Some(dir.path().join("coefficients.toml"))
        );
    }

    #[test]
    fn test_missing_file() {
        let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/boxcpq.toml");
        assert!(matches!(result, Err(CpqError::ConfigFileNotFound { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            storage: Some(StorageBackend::Postgres),
            coefficients_file: None,
            complexity: Some(ComplexityPolicy::Apply),
        });

        assert_eq!(config.storage.value, StorageBackend::Postgres);
        assert_eq!(config.storage.source, ConfigSource::Cli);
        assert_eq!(config.complexity.value, ComplexityPolicy::Apply);
        assert_eq!(config.coefficients_file.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_table_name() {
        assert_eq!(parse_table_name("t", "fixed_costs").unwrap(), "fixed_costs");
        assert_eq!(parse_table_name("t", " _custom1 ").unwrap(), "_custom1");
        assert!(parse_table_name("t", "1costs").is_err());
        assert!(parse_table_name("t", "costs; DROP TABLE x").is_err());
        assert!(parse_table_name("t", "").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert_eq!(map.len(), 5);
        let (storage, source) = &map["storage"];
        assert_eq!(storage, "memory");
        assert_eq!(*source, ConfigSource::Default);
        assert_eq!(map["coefficients_file"].0, "(none)");
    }
}
