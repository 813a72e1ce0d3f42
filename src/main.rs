//! Persona Survey server
//!
//! Loads configuration from the environment, wires the repositories, the
//! Gemini-backed question generator and the HTTP API, then serves until
//! Ctrl+C or SIGTERM.

use std::sync::Arc;

use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use persona_survey::adapters::ai::{AiQuestionGenerator, GeminiProvider};
use persona_survey::adapters::http::{api_router, AppState};
use persona_survey::adapters::storage::{FileStore, InMemoryStore};
use persona_survey::config::{AppConfig, ConfigError, LogFormat, ServerConfig, StorageBackend};
use persona_survey::ports::{
    AIError, AttemptRepository, ProfileRepository, ResponseRepository, TemplateRepository,
};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("AI provider setup failed: {0}")]
    Ai(#[from] AIError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

struct Repositories {
    templates: Arc<dyn TemplateRepository>,
    profiles: Arc<dyn ProfileRepository>,
    responses: Arc<dyn ResponseRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl Repositories {
    fn from_store<S>(store: S) -> Self
    where
        S: TemplateRepository
            + ProfileRepository
            + ResponseRepository
            + AttemptRepository
            + 'static,
    {
        let store = Arc::new(store);
        Self {
            templates: store.clone(),
            profiles: store.clone(),
            responses: store.clone(),
            attempts: store,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate().map_err(ConfigError::from)?;

    let repositories = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Repositories::from_store(InMemoryStore::new())
        }
        StorageBackend::File => {
            tracing::info!(data_dir = %config.storage.data_dir.display(), "Using file storage");
            Repositories::from_store(FileStore::new(&config.storage.data_dir))
        }
    };

    let gemini_config = config.ai.gemini_config().map_err(ConfigError::from)?;
    let provider = Arc::new(GeminiProvider::new(gemini_config)?);
    let mut generator = AiQuestionGenerator::new(provider);
    if let Some(temperature) = config.ai.temperature {
        generator = generator.with_temperature(temperature);
    }
    let generator = Arc::new(generator);

    let state = AppState::new(
        repositories.templates,
        repositories.profiles,
        repositories.responses,
        repositories.attempts,
        generator,
        config.features.survey_result_policy(),
    );

    let app = api_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server)?)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr().map_err(ConfigError::from)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        model = %config.ai.model,
        "Persona Survey listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let origins = server.cors_header_values()?;

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        tracing::warn!("No CORS origins configured; allowing any origin");
        Ok(layer.allow_origin(Any))
    } else {
        Ok(layer.allow_origin(AllowOrigin::list(origins)))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
