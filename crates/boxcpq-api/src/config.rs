use boxcpq_core::config::LayeredConfig;
use std::env;
use std::path::PathBuf;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Storage backend, coefficient file, complexity policy and table names
    pub settings: LayeredConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// `BOXCPQ_CONFIG` names an optional TOML file applied beneath the
    /// `BOXCPQ_*` variables; an unreadable file is logged and skipped.
    pub fn from_env() -> Self {
        let port = env::var("BOXCPQ_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

        let cors_origin =
            env::var("BOXCPQ_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let mut settings = LayeredConfig::with_defaults();
        if let Ok(path) = env::var("BOXCPQ_CONFIG") {
            let path = PathBuf::from(path);
            match settings.clone().load_from_file(&path) {
                Ok(loaded) => settings = loaded,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Ignoring config file"),
            }
        }

        Self {
            port,
            cors_origin,
            settings: settings.load_from_env(),
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
