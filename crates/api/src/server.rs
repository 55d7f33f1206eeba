use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use complexity_common::SystemConfig;
use complexity_engine::ComplexityAnalyzer;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::{
    middleware::logging::{get_tracing_layer, logging_middleware},
    openapi::ApiDoc,
    routes,
    types::HealthResponse,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ComplexityAnalyzer>,
    pub config: Arc<SystemConfig>,
}

pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    /// Wire the production analyzer from configuration
    pub fn new(config: SystemConfig) -> anyhow::Result<Self> {
        let analyzer = ComplexityAnalyzer::from_config(&config)?;
        Ok(Self::with_analyzer(config, analyzer))
    }

    pub fn with_analyzer(config: SystemConfig, analyzer: ComplexityAnalyzer) -> Self {
        Self {
            state: AppState {
                analyzer: Arc::new(analyzer),
                config: Arc::new(config),
            },
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/analyze", post(routes::analyze::analyze_code))
            .route("/health", get(health_check))
            .route("/api-doc/openapi.json", get(openapi_json))
            .layer(DefaultBodyLimit::max(self.state.config.server.body_limit_bytes))
            .layer(axum::middleware::from_fn(logging_middleware))
            .layer(get_tracing_layer())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = format!(
            "{}:{}",
            self.state.config.server.host, self.state.config.server.port
        );
        let model = self.state.analyzer.model_client();
        if !model.has_credential() {
            warn!(
                "No model credential configured; analysis requests will fail until {} is set",
                complexity_common::API_KEY_ENV
            );
        }

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(address = %addr, model = model.model(), "Complexity analyzer listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model = state.analyzer.model_client();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: model.model().to_string(),
        credential_configured: model.has_credential(),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
