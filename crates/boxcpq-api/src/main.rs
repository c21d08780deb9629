use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use axum::http::{header, HeaderValue, Method};
use boxcpq_core::config::{LayeredConfig, StorageBackend};
use boxcpq_pricing::CostEngine;
use boxcpq_store::postgres::{PostgresConfig, PostgresStore};
use boxcpq_store::{CoefficientSource, ConstantStore, MemoryCoefficientSource};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boxcpq_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxcpq_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    tracing::info!(
        port = config.port,
        storage = %config.settings.storage.value,
        complexity = %config.settings.complexity.value,
        "Starting boxcpq API server"
    );

    let source = init_source(&config.settings).await.map_err(|e| {
        tracing::error!(
            "Remediation:\n\
            1. For memory storage, set BOXCPQ_COEFFICIENTS_FILE to a TOML coefficients file\n\
            2. For postgres storage, verify DATABASE_URL and that both coefficient tables exist"
        );
        e
    })?;

    let store = Arc::new(ConstantStore::new(source));
    let engine = CostEngine::new(store).with_policy(config.settings.complexity.value);
    let state = Arc::new(AppState::new(engine));

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid BOXCPQ_CORS_ORIGIN '{}'", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Open the configured coefficient source
async fn init_source(settings: &LayeredConfig) -> Result<Arc<dyn CoefficientSource>> {
    match settings.storage.value {
        StorageBackend::Memory => {
            let path = settings
                .coefficients_file
                .value
                .as_ref()
                .ok_or_else(|| anyhow!("BOXCPQ_COEFFICIENTS_FILE is required for memory storage"))?;
            tracing::info!(path = %path.display(), "Using in-memory coefficient tables");
            let source = MemoryCoefficientSource::load_toml(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Ok(Arc::new(source))
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to PostgreSQL coefficient tables...");
            let pg_config = PostgresConfig::from_env()
                .context("Invalid DATABASE_URL")?
                .with_tables(&settings.constants_table.value, &settings.fixed_costs_table.value)
                .context("Invalid coefficient table names")?;
            let store = PostgresStore::new(pg_config)
                .await
                .context("Connection failed")?;
            Ok(Arc::new(store))
        }
    }
}
