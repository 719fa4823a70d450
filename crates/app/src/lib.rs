//! Parley application composition root
//!
//! Composes the domain routers, the LLM service and the HTTP layers into a
//! single application.

use std::sync::Arc;

use axum::Router;
use parley_conversations::{ConversationsRepositories, ConversationsState};
use parley_llm::{LlmConfig, LlmService, LlmServiceFactory};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub async fn create_app(
    pool: SqlitePool,
    llm_config: Option<LlmConfig>,
) -> Result<Router, anyhow::Error> {
    let llm = build_llm_service(llm_config)?;
    let state = ConversationsState::new(ConversationsRepositories::new(pool), llm);

    Ok(build_router(state))
}

/// Turn the optional LLM config into the shared service handle
pub fn build_llm_service(
    config: Option<LlmConfig>,
) -> Result<Option<Arc<dyn LlmService>>, anyhow::Error> {
    match config {
        Some(config) => {
            let service = LlmServiceFactory::create(config)?;
            Ok(Some(Arc::from(service)))
        }
        None => {
            tracing::warn!("No LLM credential configured, assistant replies will be placeholders");
            Ok(None)
        }
    }
}

/// Router over an already-built domain state
pub fn build_router(state: ConversationsState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Parley API v0.0.1-SNAPSHOT" }),
        )
        .merge(parley_conversations::routes().with_state(state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

/// Open CORS policy: any origin, method and header, with credentials
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
